//! Raw response fragments and the conventions used to read them.
//!
//! A fragment is a [`serde_json::Value`] in the shape produced by an
//! XML-to-object conversion of a protocol response:
//!
//! - attributes of an element are keys with the [`ATTRIBUTE_PREFIX`]
//!   (`<task id="x">` becomes `{"_id": "x"}`),
//! - inline text of an element that also has attributes or children is kept
//!   under [`TEXT_KEY`],
//! - an element with only text becomes a plain string,
//! - repeated child elements become an array, a single one does not.
//!
//! The last rule is why almost every list access goes through [`as_list`].
//!
//! [`flatten`] is the single place where attribute and child keys are merged.
//! Every entity family is normalized on top of its output.

pub mod xml;

use serde_json::{Map, Value};

/// Prefix marking an attribute key.
pub const ATTRIBUTE_PREFIX: char = '_';

/// Key holding the inline text of an element.
pub const TEXT_KEY: &str = "__text";

/// Key under which inline text is kept when a flattened fragment has other keys too.
pub const FLAT_TEXT_KEY: &str = "text";

/// Result of flattening a fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Flattened {
    /// The fragment carried nothing but inline text
    Text(String),
    /// Attributes and children merged into one object
    Object(Map<String, Value>),
}

impl Flattened {
    /// The merged object, or `None` if the fragment collapsed to text.
    #[must_use]
    pub fn into_object(self) -> Option<Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            Self::Text(_) => None,
        }
    }
}

/// Merge attribute keys (prefix stripped) and child keys into one flat object.
///
/// Attributes are inserted first, children afterwards; a child with the same
/// name as an attribute replaces the attribute's value. A fragment that has
/// nothing but inline text collapses to [`Flattened::Text`].
#[must_use]
pub fn flatten(raw: &Value) -> Flattened {
    let map = match raw {
        Value::Object(map) => map,
        Value::Null | Value::Array(_) => return Flattened::Object(Map::new()),
        scalar => return Flattened::Text(scalar_text(scalar).unwrap_or_default()),
    };

    if map.len() == 1 {
        if let Some(text) = map.get(TEXT_KEY) {
            return Flattened::Text(text_of(text).unwrap_or_default());
        }
    }

    let mut flat = Map::with_capacity(map.len());
    for (key, value) in map {
        if let Some(name) = attribute_name(key) {
            flat.insert(name.to_string(), value.clone());
        }
    }
    for (key, value) in map {
        if key == TEXT_KEY {
            flat.insert(FLAT_TEXT_KEY.to_string(), value.clone());
        } else if attribute_name(key).is_none() {
            flat.insert(key.clone(), value.clone());
        }
    }
    Flattened::Object(flat)
}

/// The attribute name of a key, if the key denotes an attribute.
#[must_use]
pub fn attribute_name(key: &str) -> Option<&str> {
    if key == TEXT_KEY {
        return None;
    }
    key.strip_prefix(ATTRIBUTE_PREFIX)
}

/// Text value of a fragment, preferring inline text over structure.
///
/// Strings are returned as-is, numbers and booleans are rendered, and an
/// object yields its inline text if it has one. Arrays and objects without
/// text have no text value.
#[must_use]
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.get(TEXT_KEY).and_then(text_of),
        Value::Array(_) | Value::Null => None,
        scalar => scalar_text(scalar),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        _ => None,
    }
}

/// Treat a possibly-singleton, possibly-absent value as a list.
///
/// An empty element (`<tags/>`, converted to `""`) is an empty list.
#[must_use]
pub fn as_list(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(other) => vec![other],
    }
}

/// Owned variant of [`as_list`].
#[must_use]
pub fn into_list(value: Option<Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(other) => vec![other],
    }
}

/// Child element of a fragment.
#[must_use]
pub fn child<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    value.as_object().and_then(|map| map.get(name))
}

/// Attribute of a fragment.
#[must_use]
pub fn attr<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    let map = value.as_object()?;
    map.iter()
        .find(|(key, _)| attribute_name(key) == Some(name))
        .map(|(_, v)| v)
}

/// Text of a child element, falling back to an attribute of the same name.
#[must_use]
pub fn field_text(value: &Value, name: &str) -> Option<String> {
    child(value, name)
        .or_else(|| attr(value, name))
        .and_then(text_of)
}

/// Follow a path of child element names.
#[must_use]
pub fn get_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, name| child(current, name))
}

/// Recursively replace objects that only hold inline text by that text.
#[must_use]
pub fn collapse_text(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            if map.len() == 1 && map.contains_key(TEXT_KEY) {
                return text_of(&Value::Object(map)).map_or(Value::Null, Value::String);
            }
            Value::Object(
                map.into_iter()
                    .map(|(key, v)| (key, collapse_text(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(collapse_text).collect()),
        other => other,
    }
}
