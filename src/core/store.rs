//! Task store abstraction: records, filter predicates, and the store trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::core::{Schema, StoreError};

/// Date format the store uses for day-precision values.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// One record as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Store-assigned identifier.
    pub id: String,
    /// Property payload keyed by property name.
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// Soft-delete flag.
    #[serde(default)]
    pub archived: bool,
}

impl Page {
    /// Raw `start` value of a date property, if set.
    pub fn date_start(&self, property: &str) -> Option<&str> {
        self.properties
            .get(property)?
            .get("date")?
            .get("start")?
            .as_str()
    }

    /// Day portion of a date property; any time-of-day suffix is dropped.
    pub fn date_day(&self, property: &str) -> Option<NaiveDate> {
        self.date_start(property).and_then(parse_day)
    }

    /// Name of the selected option of a select property.
    pub fn select_name(&self, property: &str) -> Option<&str> {
        self.properties
            .get(property)?
            .get("select")?
            .get("name")?
            .as_str()
    }

    /// Plain content of the first fragment of a title property.
    pub fn title(&self, property: &str) -> Option<&str> {
        self.properties
            .get(property)?
            .get("title")?
            .get(0)?
            .get("text")?
            .get("content")?
            .as_str()
    }
}

/// Parse the day portion of an ISO date or date-time string.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let day = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, DAY_FORMAT).ok()
}

/// Compound query predicate understood by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// All nested predicates must hold.
    And(Vec<Filter>),
    /// Select property equals the named option.
    SelectEquals {
        /// Property name.
        property: String,
        /// Option name.
        value: String,
    },
    /// Date property is unset.
    DateIsEmpty {
        /// Property name.
        property: String,
    },
    /// Date property is set.
    DateIsNotEmpty {
        /// Property name.
        property: String,
    },
    /// Date property falls on or after `date`.
    DateOnOrAfter {
        /// Property name.
        property: String,
        /// Inclusive lower bound.
        date: NaiveDate,
    },
    /// Date property falls on or before `date`.
    DateOnOrBefore {
        /// Property name.
        property: String,
        /// Inclusive upper bound.
        date: NaiveDate,
    },
}

impl Filter {
    /// Render as the store's filter body.
    pub fn to_json(&self) -> Value {
        match self {
            Self::And(parts) => json!({ "and": parts.iter().map(Self::to_json).collect::<Vec<_>>() }),
            Self::SelectEquals { property, value } => {
                json!({ "property": property, "select": { "equals": value } })
            }
            Self::DateIsEmpty { property } => {
                json!({ "property": property, "date": { "is_empty": true } })
            }
            Self::DateIsNotEmpty { property } => {
                json!({ "property": property, "date": { "is_not_empty": true } })
            }
            Self::DateOnOrAfter { property, date } => json!({
                "property": property,
                "date": { "on_or_after": date.format(DAY_FORMAT).to_string() }
            }),
            Self::DateOnOrBefore { property, date } => json!({
                "property": property,
                "date": { "on_or_before": date.format(DAY_FORMAT).to_string() }
            }),
        }
    }

    /// Evaluate the predicate against a record.
    pub fn matches(&self, page: &Page) -> bool {
        match self {
            Self::And(parts) => parts.iter().all(|p| p.matches(page)),
            Self::SelectEquals { property, value } => page.select_name(property) == Some(value.as_str()),
            Self::DateIsEmpty { property } => page.date_start(property).is_none(),
            Self::DateIsNotEmpty { property } => page.date_start(property).is_some(),
            Self::DateOnOrAfter { property, date } => {
                page.date_day(property).is_some_and(|d| d >= *date)
            }
            Self::DateOnOrBefore { property, date } => {
                page.date_day(property).is_some_and(|d| d <= *date)
            }
        }
    }
}

/// Abstraction over the hosted database holding task records.
///
/// Every call is independent; there are no retries at this layer.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetch the property schema of the target database.
    async fn fetch_schema(&self) -> Result<Schema, StoreError>;

    /// Return every non-archived record matching `filter`.
    async fn query(&self, filter: &Filter) -> Result<Vec<Page>, StoreError>;

    /// Create a record with the given property payload.
    async fn create(&self, properties: Map<String, Value>) -> Result<Page, StoreError>;

    /// Archive (soft-delete) a record.
    async fn archive(&self, page_id: &str) -> Result<(), StoreError>;
}
