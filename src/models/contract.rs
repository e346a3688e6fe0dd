//! Caller-supplied option contract. The shape is not validated; every
//! field is optional and read on demand.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contract(Map<String, Value>);

impl Contract {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build from any JSON value; non-objects become an empty contract.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Look a field up by exact key, then case-insensitively. Null, empty
    /// strings, zero and `false` count as absent.
    pub fn field(&self, key: &str) -> Option<String> {
        let value = self.0.get(key).or_else(|| {
            self.0
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })?;
        render(value)
    }

    pub fn field_or_placeholder(&self, key: &str) -> String {
        self.field(key).unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    pub fn expiration(&self) -> Option<String> {
        self.field("Expire").or_else(|| self.field("Expiration"))
    }

    /// CALL / PUT, upper-cased
    pub fn option_type(&self) -> Option<String> {
        self.field("Type").map(|t| t.to_uppercase())
    }

    /// BUY / SELL, upper-cased
    pub fn side(&self) -> Option<String> {
        self.field("Side").map(|s| s.to_uppercase())
    }

    pub fn strike(&self) -> Option<String> {
        self.field("Strike")
    }

    pub fn implied_volatility(&self) -> Option<String> {
        self.field("IV")
    }

    /// Compact JSON of the raw fields, in the order the caller sent them
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => (n.as_f64() != Some(0.0)).then(|| n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(a) if a.is_empty() => None,
        Value::Object(o) if o.is_empty() => None,
        other => Some(other.to_string()),
    }
}
