use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::{PersonRecord, RecordId},
    error::{ApiError, ErrorCode},
    routes::COLLECTION_PATH,
};
use storage::Storage;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::{create_record, delete_record, get_record, list_records, replace_record};
use app_state::AppState;
use config::load_settings;

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let database_url = settings.database_url.clone();
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;

    let app = build_router(Arc::new(AppState::new(storage)));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, collection = COLLECTION_PATH, "records server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            COLLECTION_PATH,
            get(http_list_records).post(http_create_record),
        )
        .route(
            &format!("{COLLECTION_PATH}/:id"),
            get(http_get_record)
                .put(http_replace_record)
                .delete(http_delete_record),
        )
        .with_state(state)
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<&'static str, StatusCode> {
    state.db.health_check().await.map_err(|error| {
        error!(%error, "health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok("ok")
}

fn status_for(err: &ApiError) -> StatusCode {
    match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(operation: &'static str, err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = status_for(&err);
    if status.is_server_error() {
        error!(operation, message = %err.message, "records request failed");
    } else {
        warn!(operation, %status, message = %err.message, "records request rejected");
    }
    (status, Json(err))
}

async fn http_list_records(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<PersonRecord>>> {
    let records = list_records(&state.api)
        .await
        .map_err(|e| reject("list", e))?;
    Ok(Json(records))
}

async fn http_get_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PersonRecord>> {
    let record = get_record(&state.api, &RecordId(id))
        .await
        .map_err(|e| reject("get", e))?;
    Ok(Json(record))
}

async fn http_create_record(
    State(state): State<Arc<AppState>>,
    Json(record): Json<PersonRecord>,
) -> ApiResult<(StatusCode, Json<PersonRecord>)> {
    let stored = create_record(&state.api, record)
        .await
        .map_err(|e| reject("create", e))?;
    info!(id = %stored.id, "record created");
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn http_replace_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(record): Json<PersonRecord>,
) -> ApiResult<Json<PersonRecord>> {
    let updated = replace_record(&state.api, &RecordId(id), record)
        .await
        .map_err(|e| reject("update", e))?;
    info!(id = %updated.id, "record replaced");
    Ok(Json(updated))
}

async fn http_delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let id = RecordId(id);
    delete_record(&state.api, &id)
        .await
        .map_err(|e| reject("delete", e))?;
    info!(%id, "record deleted");
    Ok(Json(serde_json::json!({})))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
