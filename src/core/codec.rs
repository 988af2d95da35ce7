//! Schema-driven mapping between stored records and generic property maps.
//!
//! Extraction reads a template record into a [`PropertyMap`]; injection turns a
//! map plus a due date back into the property payload of a new record. Both
//! sides dispatch on [`PropertyKind`], so a property's handling is decided by
//! the schema rather than by its name.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::config::FieldNames;
use crate::core::store::{Page, DAY_FORMAT};
use crate::core::{CodecError, PropertyKind, Schema};

/// Name reported for a template whose properties could not be read.
pub const EXTRACTION_FAILED_NAME: &str = "Error extracting task";

/// A captured property value, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Checkbox state.
    Checkbox(bool),
    /// Rich text fragments in the store's native shape.
    RichText(Vec<Value>),
    /// Link, possibly unset.
    Url(Option<String>),
    /// Display name of the selected option.
    Select(String),
    /// Start of a date value, as stored.
    Date(String),
}

impl PropertyValue {
    /// Kind this value belongs to.
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Checkbox(_) => PropertyKind::Checkbox,
            Self::RichText(_) => PropertyKind::RichText,
            Self::Url(_) => PropertyKind::Url,
            Self::Select(_) => PropertyKind::Select,
            Self::Date(_) => PropertyKind::Date,
        }
    }

    /// Read a raw property object. `Ok(None)` means nothing worth carrying.
    fn extract(kind: &PropertyKind, property: &str, raw: &Value) -> Result<Option<Self>, CodecError> {
        let shape = |expected| CodecError::Shape {
            property: property.to_string(),
            expected,
        };
        if matches!(
            kind,
            PropertyKind::Title | PropertyKind::Number | PropertyKind::Other(_)
        ) {
            return Ok(None);
        }
        if !raw.is_object() {
            return Err(shape("property object"));
        }
        let inner = raw.get(kind.as_str()).filter(|v| !v.is_null());

        match kind {
            PropertyKind::Checkbox => match inner {
                None => Ok(Some(Self::Checkbox(false))),
                Some(Value::Bool(b)) => Ok(Some(Self::Checkbox(*b))),
                Some(_) => Err(shape("checkbox")),
            },
            PropertyKind::RichText => match inner {
                None => Ok(Some(Self::RichText(Vec::new()))),
                Some(Value::Array(items)) => Ok(Some(Self::RichText(items.clone()))),
                Some(_) => Err(shape("rich text array")),
            },
            PropertyKind::Url => match inner {
                None => Ok(Some(Self::Url(None))),
                Some(Value::String(s)) => Ok(Some(Self::Url(Some(s.clone())))),
                Some(_) => Err(shape("url")),
            },
            PropertyKind::Select => match inner {
                None => Ok(None),
                Some(Value::Object(option)) => match option.get("name") {
                    None | Some(Value::Null) => Ok(None),
                    Some(Value::String(name)) if name.is_empty() => Ok(None),
                    Some(Value::String(name)) => Ok(Some(Self::Select(name.clone()))),
                    Some(_) => Err(shape("select option")),
                },
                Some(_) => Err(shape("select option")),
            },
            PropertyKind::Date => match inner {
                None => Ok(None),
                Some(Value::Object(date)) => match date.get("start") {
                    None | Some(Value::Null) => Ok(None),
                    Some(Value::String(start)) if start.is_empty() => Ok(None),
                    Some(Value::String(start)) => Ok(Some(Self::Date(start.clone()))),
                    Some(_) => Err(shape("date")),
                },
                Some(_) => Err(shape("date")),
            },
            PropertyKind::Title | PropertyKind::Number | PropertyKind::Other(_) => Ok(None),
        }
    }

    /// Build the payload for `kind` from an optional captured value.
    ///
    /// Returns `None` when the property must be left out of the payload.
    fn inject(kind: &PropertyKind, captured: Option<&Self>) -> Option<Value> {
        match kind {
            PropertyKind::Checkbox => {
                let checked = matches!(captured, Some(Self::Checkbox(true)));
                Some(json!({ "checkbox": checked }))
            }
            PropertyKind::RichText => {
                let fragments = match captured {
                    Some(Self::RichText(items)) => items.clone(),
                    _ => Vec::new(),
                };
                Some(json!({ "rich_text": fragments }))
            }
            PropertyKind::Url => {
                // An empty string is rejected by the store; unset links go out as null.
                let url = match captured {
                    Some(Self::Url(Some(u))) if !u.is_empty() => Value::String(u.clone()),
                    _ => Value::Null,
                };
                Some(json!({ "url": url }))
            }
            PropertyKind::Select => match captured {
                Some(Self::Select(name)) if !name.is_empty() => {
                    Some(json!({ "select": { "name": name } }))
                }
                _ => None,
            },
            PropertyKind::Date => match captured {
                Some(Self::Date(start)) if !start.is_empty() => {
                    Some(json!({ "date": { "start": start } }))
                }
                _ => None,
            },
            PropertyKind::Title | PropertyKind::Number | PropertyKind::Other(_) => None,
        }
    }
}

/// Flattened key for a property: `{name}_{kind}`.
pub fn flat_key(property: &str, kind: &PropertyKind) -> String {
    format!("{property}_{kind}")
}

/// In-memory view of one template's properties.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMap {
    /// Display name taken from the title property.
    pub name: String,
    /// Interval between occurrences, in days.
    pub regularity_days: u32,
    values: BTreeMap<String, PropertyValue>,
}

impl PropertyMap {
    /// Empty map with the two well-known fields set.
    pub fn new(name: impl Into<String>, regularity_days: u32) -> Self {
        Self {
            name: name.into(),
            regularity_days,
            values: BTreeMap::new(),
        }
    }

    /// Map substituted for a record whose properties could not be read.
    pub fn placeholder() -> Self {
        Self::new(EXTRACTION_FAILED_NAME, 1)
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_value(mut self, property: impl Into<String>, value: PropertyValue) -> Self {
        self.insert(property, value);
        self
    }

    /// Store a captured value under its property name.
    pub fn insert(&mut self, property: impl Into<String>, value: PropertyValue) {
        self.values.insert(property.into(), value);
    }

    /// Captured value for a property name.
    pub fn get(&self, property: &str) -> Option<&PropertyValue> {
        self.values.get(property)
    }

    /// Captured value addressed by its flattened `{name}_{kind}` key.
    pub fn get_flat(&self, key: &str) -> Option<&PropertyValue> {
        self.values
            .iter()
            .find(|(name, value)| flat_key(name, &value.kind()) == key)
            .map(|(_, value)| value)
    }

    /// Flattened keys of every captured property, excluding the well-known fields.
    pub fn flat_keys(&self) -> Vec<String> {
        self.values
            .iter()
            .map(|(name, value)| flat_key(name, &value.kind()))
            .collect()
    }

    /// Number of captured properties beyond the well-known fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when only the well-known fields are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flattened JSON rendering, used for debug logging.
    pub fn to_flat_json(&self) -> Value {
        let mut out = Map::new();
        out.insert("name".into(), Value::String(self.name.clone()));
        out.insert("regularity_days".into(), json!(self.regularity_days));
        for (name, value) in &self.values {
            let rendered = match value {
                PropertyValue::Checkbox(b) => json!(b),
                PropertyValue::RichText(items) => Value::Array(items.clone()),
                PropertyValue::Url(u) => json!(u),
                PropertyValue::Select(s) | PropertyValue::Date(s) => json!(s),
            };
            out.insert(flat_key(name, &value.kind()), rendered);
        }
        Value::Object(out)
    }
}

/// Coerce a stored interval to a usable day count; anything below one becomes one.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn coerce_regularity(raw: Option<f64>) -> u32 {
    match raw {
        Some(n) if n.is_finite() && n >= 1.0 => n.trunc().min(f64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

/// Property mapper bound to one schema and one set of field names.
#[derive(Debug, Clone, Copy)]
pub struct PropertyCodec<'a> {
    schema: &'a Schema,
    fields: &'a FieldNames,
}

impl<'a> PropertyCodec<'a> {
    /// Create a codec for `schema`.
    pub const fn new(schema: &'a Schema, fields: &'a FieldNames) -> Self {
        Self { schema, fields }
    }

    /// Read a template record into a [`PropertyMap`].
    ///
    /// Never fails: a record with a malformed property yields
    /// [`PropertyMap::placeholder`] and the problem is logged.
    pub fn extract(&self, page: &Page) -> PropertyMap {
        tracing::debug!(page_id = %page.id, "extracting template properties");
        match self.try_extract(page) {
            Ok(map) => {
                tracing::info!(
                    page_id = %page.id,
                    name = %map.name,
                    regularity_days = map.regularity_days,
                    "extracted template properties"
                );
                tracing::debug!(properties = %map.to_flat_json(), "extracted property map");
                map
            }
            Err(e) => {
                tracing::error!(page_id = %page.id, error = %e, "failed to extract template properties");
                PropertyMap::placeholder()
            }
        }
    }

    fn try_extract(&self, page: &Page) -> Result<PropertyMap, CodecError> {
        let name = self.extract_title(page)?;
        let regularity_days = self.extract_regularity(page)?;
        let mut map = PropertyMap::new(name, regularity_days);

        for (property, raw) in &page.properties {
            if *property == self.fields.title || *property == self.fields.regularity {
                continue;
            }
            let Some(kind) = self.schema.kind_of(property) else {
                continue;
            };
            if let Some(value) = PropertyValue::extract(kind, property, raw)? {
                map.insert(property.clone(), value);
            }
        }
        Ok(map)
    }

    fn extract_title(&self, page: &Page) -> Result<String, CodecError> {
        let property = &self.fields.title;
        let shape = || CodecError::Shape {
            property: property.clone(),
            expected: "title",
        };
        let Some(raw) = page.properties.get(property) else {
            return Ok(String::new());
        };
        match raw.get("title") {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::Array(fragments)) => {
                let Some(first) = fragments.first() else {
                    return Ok(String::new());
                };
                let content = first
                    .get("text")
                    .and_then(|t| t.get("content"))
                    .or_else(|| first.get("plain_text"));
                match content {
                    None | Some(Value::Null) => Ok(String::new()),
                    Some(Value::String(s)) => Ok(s.clone()),
                    Some(_) => Err(shape()),
                }
            }
            Some(_) => Err(shape()),
        }
    }

    fn extract_regularity(&self, page: &Page) -> Result<u32, CodecError> {
        let Some(raw) = page.properties.get(&self.fields.regularity) else {
            return Ok(1);
        };
        match raw.get("number") {
            None | Some(Value::Null) => Ok(1),
            Some(Value::Number(n)) => Ok(coerce_regularity(n.as_f64())),
            Some(_) => Err(CodecError::Shape {
                property: self.fields.regularity.clone(),
                expected: "number",
            }),
        }
    }

    /// Build the property payload for one occurrence of `map` due on `due`.
    pub fn inject(&self, map: &PropertyMap, due: NaiveDate) -> Map<String, Value> {
        let f = self.fields;
        let mut out = Map::new();
        out.insert(
            f.title.clone(),
            json!({ "title": [{ "text": { "content": map.name } }] }),
        );
        out.insert(
            f.task_type.clone(),
            json!({ "select": { "name": f.templated_marker } }),
        );
        out.insert(
            f.date.clone(),
            json!({ "date": { "start": due.format(DAY_FORMAT).to_string() } }),
        );

        for (property, kind) in self.schema.iter() {
            if property == f.title || property == f.task_type || property == f.date {
                continue;
            }
            if let Some(value) = PropertyValue::inject(kind, map.get(property)) {
                out.insert(property.to_string(), value);
            }
        }

        // New occurrences always start unfinished.
        if self.schema.declares(&f.done, &PropertyKind::Checkbox) {
            out.insert(f.done.clone(), json!({ "checkbox": false }));
        }
        out
    }
}
