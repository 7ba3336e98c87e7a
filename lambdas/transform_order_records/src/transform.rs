use crate::firehose::{FirehoseInputRecord, FirehoseOutputRecord};
use crate::stream_record::{AttributeValue, ChangeEnvelope, Image};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Datelike};
use serde::Serialize;
use shared::core::Order;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("payload is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("payload does not match the change record schema: {0}")]
    Schema(#[from] SchemaError),
    #[error("cannot convert value: {0}")]
    Coercion(#[from] CoercionError),
    #[error("cannot serialize transformed record: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{0}")]
    Envelope(#[source] serde_json::Error),
    #[error("missing attribute `{0}`")]
    MissingAttribute(&'static str),
    #[error("attribute `{attribute}` is not a tagged value: {source}")]
    MalformedAttribute {
        attribute: &'static str,
        source: serde_json::Error,
    },
    #[error("attribute `{attribute}` is tagged {found}, expected {expected}")]
    WrongTag {
        attribute: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum CoercionError {
    #[error("quantity `{value}` is not an integer: {source}")]
    Quantity {
        value: String,
        source: ParseIntError,
    },
    #[error("price `{value}` is not a number: {source}")]
    Price {
        value: String,
        source: ParseFloatError,
    },
    #[error("price `{0}` is not a finite number")]
    NonFinitePrice(String),
    #[error("timestamp {0} is outside the supported date range")]
    Timestamp(f64),
}

/// The flattened line delivered downstream for every change to an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderChangeRecord {
    #[serde(flatten)]
    pub order: Order,
    pub cdc_event_type: String,
    pub creation_datetime: String,
}

pub fn transform_record(
    record: &FirehoseInputRecord,
) -> Result<FirehoseOutputRecord, TransformError> {
    let change = decode_change_record(&record.data)?;
    let data = encode_line(&change)?;
    Ok(FirehoseOutputRecord::ok(record.record_id.clone(), data))
}

pub fn decode_change_record(data: &str) -> Result<OrderChangeRecord, TransformError> {
    let bytes = STANDARD.decode(data)?;
    let payload: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(TransformError::Parse)?;
    let envelope: ChangeEnvelope =
        serde_json::from_value(payload).map_err(SchemaError::Envelope)?;

    let new_image = envelope
        .dynamodb
        .new_image
        .as_ref()
        .ok_or(SchemaError::MissingAttribute("NewImage"))?;
    let order = order_from_image(new_image)?;

    let created_at = envelope
        .dynamodb
        .approximate_creation_date_time
        .ok_or(SchemaError::MissingAttribute("ApproximateCreationDateTime"))?;

    Ok(OrderChangeRecord {
        order,
        cdc_event_type: envelope.event_name,
        creation_datetime: format_creation_datetime(created_at)?,
    })
}

/// Serializes as a single JSON line, newline terminated, then base64 encodes it.
pub fn encode_line(change: &OrderChangeRecord) -> Result<String, TransformError> {
    let mut line = serde_json::to_vec(change).map_err(TransformError::Encode)?;
    line.push(b'\n');
    Ok(STANDARD.encode(line))
}

fn order_from_image(image: &Image) -> Result<Order, TransformError> {
    let orderid = string_attribute(image, "orderid")?;
    let product_name = string_attribute(image, "product_name")?;

    let quantity = number_attribute(image, "quantity")?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|source| CoercionError::Quantity {
            value: quantity.clone(),
            source,
        })?;

    let price = number_attribute(image, "price")?;
    let price = price
        .trim()
        .parse::<f64>()
        .map_err(|source| CoercionError::Price {
            value: price.clone(),
            source,
        })
        .and_then(|parsed| {
            if parsed.is_finite() {
                Ok(parsed)
            } else {
                Err(CoercionError::NonFinitePrice(price.clone()))
            }
        })?;

    Ok(Order::new(orderid, product_name, quantity, price))
}

fn attribute(image: &Image, name: &'static str) -> Result<AttributeValue, SchemaError> {
    let value = image
        .get(name)
        .ok_or(SchemaError::MissingAttribute(name))?;
    AttributeValue::from_json(value).map_err(|source| SchemaError::MalformedAttribute {
        attribute: name,
        source,
    })
}

fn string_attribute(image: &Image, name: &'static str) -> Result<String, SchemaError> {
    attribute(image, name)?
        .as_s()
        .cloned()
        .map_err(|other| SchemaError::WrongTag {
            attribute: name,
            expected: "S",
            found: other.tag(),
        })
}

fn number_attribute(image: &Image, name: &'static str) -> Result<String, SchemaError> {
    attribute(image, name)?
        .as_n()
        .cloned()
        .map_err(|other| SchemaError::WrongTag {
            attribute: name,
            expected: "N",
            found: other.tag(),
        })
}

/// Renders epoch seconds as a UTC ISO-8601 string with a trailing `Z`.
///
/// Sub-second precision is rounded to microseconds (half to even) and only
/// printed when non-zero: `2023-11-14T22:13:20Z` or `2023-11-14T22:13:20.500000Z`.
pub fn format_creation_datetime(epoch_seconds: f64) -> Result<String, CoercionError> {
    if !epoch_seconds.is_finite() {
        return Err(CoercionError::Timestamp(epoch_seconds));
    }

    let mut seconds = epoch_seconds.trunc();
    let mut micros = ((epoch_seconds - seconds) * 1_000_000.0).round_ties_even();
    if micros >= 1_000_000.0 {
        seconds += 1.0;
        micros -= 1_000_000.0;
    } else if micros < 0.0 {
        seconds -= 1.0;
        micros += 1_000_000.0;
    }

    if seconds < i64::MIN as f64 || seconds > i64::MAX as f64 {
        return Err(CoercionError::Timestamp(epoch_seconds));
    }
    let micros = micros as u32;
    let datetime = DateTime::from_timestamp(seconds as i64, micros * 1_000)
        .filter(|datetime| (1..=9999).contains(&datetime.year()))
        .ok_or(CoercionError::Timestamp(epoch_seconds))?;

    let mut formatted = datetime.format("%Y-%m-%dT%H:%M:%S").to_string();
    if micros != 0 {
        formatted.push_str(&format!(".{:06}", micros));
    }
    formatted.push('Z');
    Ok(formatted)
}
