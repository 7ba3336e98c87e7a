use serde::{Deserialize, Serialize};

/// Request sent by Kinesis Data Firehose to a data transformation function.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirehoseTransformationEvent {
    pub invocation_id: Option<String>,
    pub delivery_stream_arn: Option<String>,
    pub source_kinesis_stream_arn: Option<String>,
    pub region: Option<String>,
    pub records: Vec<FirehoseInputRecord>,
}

/// `data` is kept as the raw base64 text so a failed record can be handed back untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirehoseInputRecord {
    pub record_id: String,
    pub data: String,
    pub approximate_arrival_timestamp: Option<f64>,
    pub kinesis_record_metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ProcessingResult {
    Ok,
    Dropped,
    ProcessingFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirehoseOutputRecord {
    pub record_id: String,
    pub result: ProcessingResult,
    pub data: String,
}

impl FirehoseOutputRecord {
    pub fn ok(record_id: String, data: String) -> Self {
        Self {
            record_id,
            result: ProcessingResult::Ok,
            data,
        }
    }

    /// Echoes the original payload back so it can be recovered from the failure bucket.
    pub fn failed(record: &FirehoseInputRecord) -> Self {
        Self {
            record_id: record.record_id.clone(),
            result: ProcessingResult::ProcessingFailed,
            data: record.data.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FirehoseTransformationResponse {
    pub records: Vec<FirehoseOutputRecord>,
}
