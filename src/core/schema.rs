//! Property kinds and the per-database schema that drives property mapping.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Declared type of a named database property.
///
/// The store may report kinds this crate does not map; those are carried as
/// [`PropertyKind::Other`] and ignored by the codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// Boolean checkbox.
    Checkbox,
    /// Rich text fragments.
    RichText,
    /// Link.
    Url,
    /// Single choice from a fixed option list.
    Select,
    /// Date or date range.
    Date,
    /// The record's title.
    Title,
    /// Numeric value.
    Number,
    /// Any kind reported by the store that has no dedicated mapping.
    Other(String),
}

impl PropertyKind {
    /// Wire name used by the store.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Checkbox => "checkbox",
            Self::RichText => "rich_text",
            Self::Url => "url",
            Self::Select => "select",
            Self::Date => "date",
            Self::Title => "title",
            Self::Number => "number",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for PropertyKind {
    fn from(value: &str) -> Self {
        match value {
            "checkbox" => Self::Checkbox,
            "rich_text" => Self::RichText,
            "url" => Self::Url,
            "select" => Self::Select,
            "date" => Self::Date,
            "title" => Self::Title,
            "number" => Self::Number,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping of property name to declared kind for one database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    properties: BTreeMap<String, PropertyKind>,
}

impl Schema {
    /// Build a schema from `(name, kind)` pairs.
    pub fn from_pairs<I, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, PropertyKind)>,
        N: Into<String>,
    {
        Self {
            properties: pairs.into_iter().map(|(n, k)| (n.into(), k)).collect(),
        }
    }

    /// Parse the `properties` object of a database description.
    ///
    /// Entries without a string `type` are skipped.
    pub fn from_database_json(database: &Value) -> Self {
        let properties = database
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .filter_map(|(name, details)| {
                        let kind = details.get("type").and_then(Value::as_str)?;
                        Some((name.clone(), PropertyKind::from(kind)))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { properties }
    }

    /// Kind declared for `name`, if any.
    pub fn kind_of(&self, name: &str) -> Option<&PropertyKind> {
        self.properties.get(name)
    }

    /// True when `name` is declared with exactly `kind`.
    pub fn declares(&self, name: &str, kind: &PropertyKind) -> bool {
        self.kind_of(name) == Some(kind)
    }

    /// Iterate declared properties in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyKind)> {
        self.properties.iter().map(|(n, k)| (n.as_str(), k))
    }

    /// Number of declared properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// True when no property is declared.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
