use crate::firehose::{
    FirehoseInputRecord, FirehoseOutputRecord, FirehoseTransformationEvent,
    FirehoseTransformationResponse, ProcessingResult,
};
use crate::transform::transform_record;
use lambda_runtime::{tracing, Error, LambdaEvent};

#[tracing::instrument(skip(event), fields(request_id = %event.context.request_id))]
pub(crate) async fn function_handler(
    event: LambdaEvent<FirehoseTransformationEvent>,
) -> Result<FirehoseTransformationResponse, Error> {
    let payload = event.payload;
    tracing::debug!(
        "Received {} records from {:?}",
        payload.records.len(),
        payload.delivery_stream_arn
    );

    // Output order must follow input order, one entry per recordId.
    let records: Vec<FirehoseOutputRecord> =
        payload.records.iter().map(process_record).collect();

    let failed = records
        .iter()
        .filter(|record| record.result == ProcessingResult::ProcessingFailed)
        .count();
    tracing::info!(
        "Transformed {} records: {} ok, {} failed",
        records.len(),
        records.len() - failed,
        failed
    );

    Ok(FirehoseTransformationResponse { records })
}

fn process_record(record: &FirehoseInputRecord) -> FirehoseOutputRecord {
    match transform_record(record) {
        Ok(output) => output,
        Err(e) => {
            tracing::error!("Error processing record {}: {}", record.record_id, e);
            FirehoseOutputRecord::failed(record)
        }
    }
}
