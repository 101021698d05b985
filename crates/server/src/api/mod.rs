use std::sync::Arc;

use shared::{
    domain::{PersonRecord, RecordId},
    error::{ApiError, ErrorCode},
};
use storage::RecordRepository;

#[derive(Clone)]
pub struct ApiContext {
    pub records: Arc<dyn RecordRepository>,
}

impl ApiContext {
    pub fn new(records: Arc<dyn RecordRepository>) -> Self {
        Self { records }
    }
}

pub async fn list_records(ctx: &ApiContext) -> Result<Vec<PersonRecord>, ApiError> {
    ctx.records.list_records().await.map_err(internal)
}

pub async fn get_record(ctx: &ApiContext, id: &RecordId) -> Result<PersonRecord, ApiError> {
    ctx.records
        .get_record(id)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::not_found(id))
}

/// Stores a new record. A missing id is filled in server-side.
pub async fn create_record(
    ctx: &ApiContext,
    mut record: PersonRecord,
) -> Result<PersonRecord, ApiError> {
    if record.id.is_empty() {
        record.id = RecordId::generate();
    }

    let inserted = ctx.records.insert_record(&record).await.map_err(internal)?;
    if !inserted {
        return Err(ApiError::new(
            ErrorCode::Conflict,
            format!("record {} already exists", record.id),
        ));
    }
    Ok(record)
}

/// Full replace; the path id wins over whatever id the body carries.
pub async fn replace_record(
    ctx: &ApiContext,
    id: &RecordId,
    mut record: PersonRecord,
) -> Result<PersonRecord, ApiError> {
    record.id = id.clone();
    let replaced = ctx
        .records
        .replace_record(id, &record)
        .await
        .map_err(internal)?;
    if !replaced {
        return Err(ApiError::not_found(id));
    }
    Ok(record)
}

pub async fn delete_record(ctx: &ApiContext, id: &RecordId) -> Result<(), ApiError> {
    let deleted = ctx.records.delete_record(id).await.map_err(internal)?;
    if !deleted {
        return Err(ApiError::not_found(id));
    }
    Ok(())
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
