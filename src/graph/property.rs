use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::BTreeMap;

/// String-in-string JSON is decoded at most this many times.
pub const MAX_DECODE_PASSES: usize = 2;

/// Ordered property bag of a shape or of a nested object property.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// A single property value on an editor shape.
///
/// Editor documents are free-form: the same property may arrive as text, as
/// a number, as an object or as text containing JSON. Converters inspect the
/// variant explicitly instead of probing an untyped tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "JsonValue", into = "JsonValue")]
pub enum PropertyValue {
    #[default]
    Null,
    Scalar(Scalar),
    Object(PropertyMap),
    Array(Vec<PropertyValue>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl PropertyValue {
    pub fn text(value: impl Into<String>) -> Self {
        PropertyValue::Scalar(Scalar::Text(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        PropertyValue::Scalar(Scalar::Bool(value))
    }

    /// Builds an object from `(key, value)` pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PropertyValue)>,
    {
        PropertyValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Scalar(Scalar::Text(_)) => "text",
            PropertyValue::Scalar(Scalar::Number(_)) => "number",
            PropertyValue::Scalar(Scalar::Bool(_)) => "boolean",
            PropertyValue::Object(_) => "object",
            PropertyValue::Array(_) => "array",
        }
    }

    /// Borrowed text, only for text scalars.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Scalar(Scalar::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Text rendering of any scalar. Objects, arrays and null have none.
    pub fn as_text(&self) -> Option<String> {
        match self {
            PropertyValue::Scalar(Scalar::Text(text)) => Some(text.clone()),
            PropertyValue::Scalar(Scalar::Number(number)) => Some(number.to_string()),
            PropertyValue::Scalar(Scalar::Bool(flag)) => Some(flag.to_string()),
            _ => None,
        }
    }

    /// Scalar text that is not empty.
    pub fn non_empty_text(&self) -> Option<String> {
        self.as_text().filter(|text| !text.is_empty())
    }

    /// Reads a boolean flag. Text is accepted case-insensitively as "true".
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            PropertyValue::Scalar(Scalar::Bool(flag)) => Some(*flag),
            PropertyValue::Scalar(Scalar::Text(text)) => Some(text.eq_ignore_ascii_case("true")),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Field lookup on an object. Null fields count as absent.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.as_object()
            .and_then(|map| map.get(key))
            .filter(|value| !value.is_null())
    }

    /// Non-empty text of an object field.
    pub fn field_text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(PropertyValue::non_empty_text)
    }

    /// Decodes text that holds JSON, possibly encoded twice.
    ///
    /// Returns `None` when the value never yields an object or array. Empty
    /// text and the literal `"null"` count as no data.
    pub fn decode_nested(&self) -> Option<PropertyValue> {
        let mut current = self.clone();
        for _ in 0..MAX_DECODE_PASSES {
            let PropertyValue::Scalar(Scalar::Text(text)) = &current else {
                break;
            };
            if text.trim().is_empty() || text == "null" {
                return None;
            }
            match serde_json::from_str::<JsonValue>(text) {
                Ok(decoded) => current = decoded.into(),
                Err(err) => {
                    log::debug!("Text property is not JSON ({err}): {text}");
                    return None;
                }
            }
        }
        match current {
            PropertyValue::Object(_) | PropertyValue::Array(_) => Some(current),
            _ => None,
        }
    }

    /// Returns structured values as-is and decodes text that holds JSON.
    pub fn structured(&self) -> Option<PropertyValue> {
        match self {
            PropertyValue::Object(_) | PropertyValue::Array(_) => Some(self.clone()),
            PropertyValue::Scalar(Scalar::Text(_)) => self.decode_nested(),
            _ => None,
        }
    }

    pub fn parse_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<JsonValue>(text).map(Into::into)
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            PropertyValue::Null => JsonValue::Null,
            PropertyValue::Scalar(Scalar::Text(text)) => JsonValue::String(text.clone()),
            PropertyValue::Scalar(Scalar::Number(number)) => JsonValue::Number(number.clone()),
            PropertyValue::Scalar(Scalar::Bool(flag)) => JsonValue::Bool(*flag),
            PropertyValue::Object(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            PropertyValue::Array(items) => {
                JsonValue::Array(items.iter().map(PropertyValue::to_json).collect())
            }
        }
    }

    /// Compact JSON text of this value.
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }
}

impl From<JsonValue> for PropertyValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => PropertyValue::Null,
            JsonValue::Bool(flag) => PropertyValue::Scalar(Scalar::Bool(flag)),
            JsonValue::Number(number) => PropertyValue::Scalar(Scalar::Number(number)),
            JsonValue::String(text) => PropertyValue::Scalar(Scalar::Text(text)),
            JsonValue::Array(items) => {
                PropertyValue::Array(items.into_iter().map(Into::into).collect())
            }
            JsonValue::Object(map) => {
                PropertyValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<PropertyValue> for JsonValue {
    fn from(value: PropertyValue) -> Self {
        value.to_json()
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::text(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::text(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::bool(value)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(items: Vec<PropertyValue>) -> Self {
        PropertyValue::Array(items)
    }
}
