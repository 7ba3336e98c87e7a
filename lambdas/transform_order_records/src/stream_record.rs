use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attributes stay raw until read, so an unused malformed attribute cannot fail the record.
pub type Image = HashMap<String, serde_json::Value>;

/// A DynamoDB Streams change record as it arrives inside a Firehose payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeEnvelope {
    #[serde(rename = "eventName")]
    pub event_name: String,
    pub dynamodb: StreamRecord,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamRecord {
    pub new_image: Option<Image>,
    pub approximate_creation_date_time: Option<f64>,
}

/// Type-tagged attribute value in DynamoDB JSON, e.g. `{"S": "Laptop"}` or `{"N": "2"}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum AttributeValue {
    S(String),
    N(String),
    B(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    #[serde(rename = "BS")]
    Bs(Vec<String>),
    M(HashMap<String, AttributeValue>),
    L(Vec<AttributeValue>),
}

impl AttributeValue {
    pub fn from_json(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        AttributeValue::deserialize(value)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            AttributeValue::S(_) => "S",
            AttributeValue::N(_) => "N",
            AttributeValue::B(_) => "B",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::Null(_) => "NULL",
            AttributeValue::Ss(_) => "SS",
            AttributeValue::Ns(_) => "NS",
            AttributeValue::Bs(_) => "BS",
            AttributeValue::M(_) => "M",
            AttributeValue::L(_) => "L",
        }
    }

    pub fn as_s(&self) -> Result<&String, &Self> {
        match self {
            AttributeValue::S(s) => Ok(s),
            other => Err(other),
        }
    }

    pub fn as_n(&self) -> Result<&String, &Self> {
        match self {
            AttributeValue::N(n) => Ok(n),
            other => Err(other),
        }
    }
}
