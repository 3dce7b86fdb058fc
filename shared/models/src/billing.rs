use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// A single purchasable plan as published by the subscription service.
///
/// The shape of a plan belongs to the subscription service, so the record is
/// kept open: every field the service sends is carried through untouched and
/// in the order it was received.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionPlan {
    fields: Map<String, Value>,
}

/// Plans in the order the subscription service returned them.
pub type PlanCatalog = Vec<SubscriptionPlan>;

#[derive(Debug, Error, PartialEq)]
pub enum PlanRecordError {
    #[error("expected a JSON object for a subscription plan, got {0}")]
    NotAnObject(&'static str),
}

impl SubscriptionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, mostly useful for fixtures.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Plan identifier rendered as a string. Services use both string and
    /// numeric ids.
    pub fn id(&self) -> Option<String> {
        match self.fields.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for SubscriptionPlan {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for SubscriptionPlan {
    type Error = PlanRecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            Value::Null => Err(PlanRecordError::NotAnObject("null")),
            Value::Bool(_) => Err(PlanRecordError::NotAnObject("boolean")),
            Value::Number(_) => Err(PlanRecordError::NotAnObject("number")),
            Value::String(_) => Err(PlanRecordError::NotAnObject("string")),
            Value::Array(_) => Err(PlanRecordError::NotAnObject("array")),
        }
    }
}

/// JSON body of every error response: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
