//! Consuming access to a flattened fragment.
//!
//! Every normalization step reads fields by *taking* them out of a
//! [`Fragment`]. Whatever is left at the end becomes the entity's
//! properties, so a consumed raw key can never show up twice.

use crate::model::{EntityRef, Severity};
use crate::raw::{self, Flattened, FLAT_TEXT_KEY};
use crate::utils::coerce;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// A flattened fragment whose fields are consumed as they are read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fragment {
    fields: Map<String, Value>,
}

impl Fragment {
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Flatten any raw value. A text-only value becomes a fragment holding
    /// that text under the `text` key.
    #[must_use]
    pub fn of(raw: &Value) -> Self {
        match raw::flatten(raw) {
            Flattened::Object(fields) => Self { fields },
            Flattened::Text(text) => {
                let mut fields = Map::new();
                fields.insert(FLAT_TEXT_KEY.to_string(), Value::String(text));
                Self { fields }
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Remove a field, keeping the order of the others.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    /// Text of a field; empty text counts as absent.
    pub fn take_text(&mut self, key: &str) -> Option<String> {
        self.take(key)
            .as_ref()
            .and_then(raw::text_of)
            .filter(|text| !text.is_empty())
    }

    /// Text of a field without consuming it.
    #[must_use]
    pub fn peek_text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(raw::text_of)
            .filter(|text| !text.is_empty())
    }

    pub fn take_yes_no(&mut self, key: &str) -> bool {
        coerce::parse_yes_no(self.take_text(key).as_deref())
    }

    pub fn take_int(&mut self, key: &str) -> Option<i64> {
        coerce::parse_int(self.take_text(key).as_deref())
    }

    pub fn take_count(&mut self, key: &str) -> Option<usize> {
        coerce::parse_count(self.take_text(key).as_deref())
    }

    pub fn take_float(&mut self, key: &str) -> Option<f64> {
        coerce::parse_float(self.take_text(key).as_deref())
    }

    pub fn take_date(&mut self, key: &str) -> Option<DateTime<Utc>> {
        coerce::parse_date(self.take_text(key).as_deref())
    }

    pub fn take_severity(&mut self, key: &str) -> Option<Severity> {
        coerce::parse_severity(self.take_text(key).as_deref())
    }

    pub fn take_severity_tenths(&mut self, key: &str) -> Option<Severity> {
        coerce::parse_severity_tenths(self.take_text(key).as_deref())
    }

    /// Items of a repeated field.
    pub fn take_items(&mut self, key: &str) -> Vec<Value> {
        raw::into_list(self.take(key))
    }

    /// Items of a repeated child inside a wrapper field
    /// (`<tasks><task/><task/></tasks>`).
    pub fn take_list(&mut self, key: &str, child: &str) -> Vec<Value> {
        match self.take(key) {
            Some(Value::Object(mut wrapper)) => raw::into_list(wrapper.shift_remove(child)),
            _ => Vec::new(),
        }
    }

    pub fn take_ref(&mut self, key: &str) -> Option<EntityRef> {
        self.take(key).as_ref().and_then(entity_ref)
    }

    pub fn take_refs(&mut self, key: &str, child: &str) -> Vec<EntityRef> {
        self.take_list(key, child)
            .iter()
            .filter_map(entity_ref)
            .collect()
    }

    /// Drop fields that carry nothing worth keeping.
    pub fn discard(&mut self, keys: &[&str]) {
        for key in keys {
            self.fields.shift_remove(*key);
        }
    }

    /// Remaining fields, text-only objects collapsed to their text.
    #[must_use]
    pub fn into_properties(self) -> Map<String, Value> {
        self.fields
            .into_iter()
            .map(|(key, value)| (key, raw::collapse_text(value)))
            .collect()
    }
}

/// Reference to another entity: `id` attribute plus a `name` child, or
/// inline text as the name (`<scanner id="s1">OpenVAS Default</scanner>`).
#[must_use]
pub fn entity_ref(value: &Value) -> Option<EntityRef> {
    let id = raw::attr(value, "id")
        .and_then(raw::text_of)
        .filter(|id| !id.is_empty())?;
    let name = raw::child(value, "name")
        .and_then(raw::text_of)
        .or_else(|| raw::text_of(value))
        .filter(|name| !name.is_empty());
    Some(EntityRef::new(id, name))
}

/// Text of a child element or attribute; empty text counts as absent.
#[must_use]
pub fn text(value: &Value, name: &str) -> Option<String> {
    raw::field_text(value, name).filter(|text| !text.is_empty())
}

/// Text of every item of a repeated child.
#[must_use]
pub fn texts(value: Option<&Value>) -> Vec<String> {
    raw::as_list(value)
        .into_iter()
        .filter_map(raw::text_of)
        .filter(|text| !text.is_empty())
        .collect()
}
