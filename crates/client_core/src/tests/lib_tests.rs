use std::sync::Arc;

use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::routes::COLLECTION_PATH;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    rows: Arc<Mutex<Vec<PersonRecord>>>,
    posted: Arc<Mutex<Vec<PersonRecord>>>,
}

async fn handle_list(State(state): State<ServerState>) -> Json<Vec<PersonRecord>> {
    Json(state.rows.lock().await.clone())
}

async fn handle_create(
    State(state): State<ServerState>,
    Json(record): Json<PersonRecord>,
) -> (StatusCode, Json<PersonRecord>) {
    state.posted.lock().await.push(record.clone());
    state.rows.lock().await.push(record.clone());
    (StatusCode::CREATED, Json(record))
}

async fn handle_update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(record): Json<PersonRecord>,
) -> Result<Json<PersonRecord>, StatusCode> {
    let mut rows = state.rows.lock().await;
    let slot = rows
        .iter_mut()
        .find(|r| r.id.as_str() == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = record.clone();
    Ok(Json(record))
}

async fn handle_delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut rows = state.rows.lock().await;
    let before = rows.len();
    rows.retain(|r| r.id.as_str() != id);
    if rows.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(serde_json::json!({})))
}

async fn spawn_router(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn spawn_records_server(seed: Vec<PersonRecord>) -> (HttpRecordsClient, ServerState) {
    let state = ServerState::default();
    *state.rows.lock().await = seed;
    let app = Router::new()
        .route(COLLECTION_PATH, get(handle_list).post(handle_create))
        .route(
            &format!("{COLLECTION_PATH}/:id"),
            axum::routing::put(handle_update).delete(handle_delete),
        )
        .with_state(state.clone());
    let base = spawn_router(app).await;
    let client = HttpRecordsClient::new(config::collection_url(&base).expect("url"));
    (client, state)
}

fn person(id: &str, name: &str) -> PersonRecord {
    let mut record = PersonRecord::blank(RecordId::from(id));
    record.name = name.to_string();
    record.email = format!("{}@example.com", name.to_ascii_lowercase());
    record
}

#[tokio::test]
async fn list_decodes_collection() {
    let (client, _state) =
        spawn_records_server(vec![person("0001", "Ada"), person("0002", "Bob")]).await;
    let records = client.list().await.expect("list");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].name, "Bob");
}

#[tokio::test]
async fn create_posts_client_generated_id() {
    let (client, state) = spawn_records_server(Vec::new()).await;
    let mut record = PersonRecord::blank(RecordId::generate());
    record.name = "Ada".to_string();
    record.email = "ada@x.com".to_string();

    let stored = client.create(&record).await.expect("create");
    assert_eq!(stored, record);
    let posted = state.posted.lock().await.clone();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].id, record.id);
}

#[tokio::test]
async fn update_puts_full_record_to_item_path() {
    let (client, state) = spawn_records_server(vec![person("a1b2", "Ada")]).await;
    let mut changed = person("a1b2", "Ada Lovelace");
    changed.is_student = true;

    let updated = client
        .update(&RecordId::from("a1b2"), &changed)
        .await
        .expect("update");
    assert_eq!(updated, changed);
    assert_eq!(state.rows.lock().await.clone(), vec![changed]);
}

#[tokio::test]
async fn non_2xx_maps_to_operation_specific_errors() {
    let (client, _state) = spawn_records_server(Vec::new()).await;
    let missing = RecordId::from("dead");

    let err = client
        .update(&missing, &person("dead", "Nobody"))
        .await
        .expect_err("404");
    assert_eq!(err, ClientError::Update(RequestFailure::Status(404)));

    let err = client.remove(&missing).await.expect_err("404");
    assert_eq!(err, ClientError::Delete(RequestFailure::Status(404)));
}

#[tokio::test]
async fn remove_deletes_item() {
    let (client, state) = spawn_records_server(vec![person("0001", "Ada")]).await;
    client
        .remove(&RecordId::from("0001"))
        .await
        .expect("delete");
    assert!(state.rows.lock().await.is_empty());
}

#[tokio::test]
async fn malformed_list_body_is_a_decode_failure() {
    let app = Router::new().route(COLLECTION_PATH, get(|| async { "not json" }));
    let base = spawn_router(app).await;
    let client = HttpRecordsClient::new(config::collection_url(&base).expect("url"));

    let err = client.list().await.expect_err("decode");
    assert!(
        matches!(err, ClientError::Fetch(RequestFailure::Decode(_))),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn server_error_on_create_is_reported_once() {
    let app = Router::new().route(
        COLLECTION_PATH,
        axum::routing::post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_router(app).await;
    let client = HttpRecordsClient::new(config::collection_url(&base).expect("url"));

    let err = client
        .create(&person("0001", "Ada"))
        .await
        .expect_err("500");
    assert_eq!(err, ClientError::Create(RequestFailure::Status(500)));
    assert_eq!(err.toast_message(), "Failed to create");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client =
        HttpRecordsClient::new(config::collection_url(&format!("http://{addr}")).expect("url"));
    let err = client.list().await.expect_err("refused");
    assert!(
        matches!(err, ClientError::Fetch(RequestFailure::Transport(_))),
        "unexpected error: {err:?}"
    );
}

#[test]
fn record_url_appends_escaped_id() {
    let client =
        HttpRecordsClient::new(config::collection_url("http://localhost:3001").expect("url"));
    assert_eq!(
        client.record_url(&RecordId::from("a1b2")).as_str(),
        "http://localhost:3001/formData/a1b2"
    );
    assert_eq!(
        client.record_url(&RecordId::from("a b")).as_str(),
        "http://localhost:3001/formData/a%20b"
    );
}

#[tokio::test]
async fn perform_round_trips_through_http_adapter() {
    let (client, _state) = spawn_records_server(vec![person("0001", "Ada")]).await;
    let outcome = perform(&client, RecordOp::Delete(RecordId::from("0001"))).await;
    assert_eq!(outcome, RecordOutcome::Deleted(RecordId::from("0001")));

    let outcome = perform(&client, RecordOp::Load).await;
    assert_eq!(outcome, RecordOutcome::Loaded(Vec::new()));
}
