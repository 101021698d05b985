use super::*;
use axum::{body, body::Body, http::Request, response::Response};
use tower::ServiceExt;

async fn test_app() -> Router {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    build_router(Arc::new(AppState::new(storage)))
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app().await;
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn post_then_list_echoes_client_generated_id() {
    let app = test_app().await;
    let create = json_request(
        "POST",
        "/formData",
        serde_json::json!({ "id": "c0de", "name": "Ada", "email": "ada@x.com", "rating": 7 }),
    );
    let response = app.clone().oneshot(create).await.expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: PersonRecord = read_json(response).await;
    assert_eq!(created.id, RecordId::from("c0de"));
    assert_eq!(created.rating, 7.0);

    let list = Request::get("/formData").body(Body::empty()).expect("request");
    let response = app.oneshot(list).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let records: Vec<PersonRecord> = read_json(response).await;
    assert_eq!(records, vec![created]);
}

#[tokio::test]
async fn duplicate_post_is_conflict() {
    let app = test_app().await;
    let body = serde_json::json!({ "id": "c0de", "name": "Ada", "email": "ada@x.com" });
    let first = app
        .clone()
        .oneshot(json_request("POST", "/formData", body.clone()))
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_request("POST", "/formData", body))
        .await
        .expect("response");
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let err: ApiError = read_json(second).await;
    assert_eq!(err.code, ErrorCode::Conflict);
}

#[tokio::test]
async fn put_replaces_and_delete_removes() {
    let app = test_app().await;
    app.clone()
        .oneshot(json_request(
            "POST",
            "/formData",
            serde_json::json!({ "id": "0001", "name": "Ada", "email": "ada@x.com" }),
        ))
        .await
        .expect("create");

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/formData/0001",
            serde_json::json!({ "id": "0001", "name": "Ada L", "email": "ada@x.com", "isStudent": true }),
        ))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: PersonRecord = read_json(response).await;
    assert_eq!(updated.name, "Ada L");
    assert!(updated.is_student);

    let delete = Request::delete("/formData/0001")
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(delete).await.expect("delete");
    assert_eq!(response.status(), StatusCode::OK);

    let get = Request::get("/formData/0001")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(get).await.expect("get");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_and_delete_on_missing_id_are_not_found() {
    let app = test_app().await;
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/formData/zzzz",
            serde_json::json!({ "name": "x", "email": "y" }),
        ))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let delete = Request::delete("/formData/zzzz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(delete).await.expect("delete");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
