use super::*;
use storage::Storage;

async fn setup() -> ApiContext {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    ApiContext::new(Arc::new(storage))
}

fn person(id: &str, name: &str) -> PersonRecord {
    let mut record = PersonRecord::blank(RecordId::from(id));
    record.name = name.to_string();
    record.email = "someone@example.com".to_string();
    record
}

#[tokio::test]
async fn create_keeps_client_supplied_id() {
    let ctx = setup().await;
    let stored = create_record(&ctx, person("a1b2", "Ada"))
        .await
        .expect("create");
    assert_eq!(stored.id, RecordId::from("a1b2"));
    assert_eq!(get_record(&ctx, &stored.id).await.expect("get"), stored);
}

#[tokio::test]
async fn create_without_id_generates_one() {
    let ctx = setup().await;
    let stored = create_record(&ctx, person("", "Ada"))
        .await
        .expect("create");
    assert!(!stored.id.is_empty());
    assert_eq!(list_records(&ctx).await.expect("list").len(), 1);
}

#[tokio::test]
async fn duplicate_id_is_a_conflict() {
    let ctx = setup().await;
    create_record(&ctx, person("dupe", "Ada"))
        .await
        .expect("create");
    let err = create_record(&ctx, person("dupe", "Bob"))
        .await
        .expect_err("should fail");
    assert_eq!(err.code, ErrorCode::Conflict);
}

#[tokio::test]
async fn replace_forces_path_id_into_body() {
    let ctx = setup().await;
    create_record(&ctx, person("0001", "Ada"))
        .await
        .expect("create");

    let updated = replace_record(&ctx, &RecordId::from("0001"), person("9999", "Ada L"))
        .await
        .expect("replace");
    assert_eq!(updated.id, RecordId::from("0001"));
    assert_eq!(updated.name, "Ada L");
    let err = get_record(&ctx, &RecordId::from("9999"))
        .await
        .expect_err("no such id");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let ctx = setup().await;
    let missing = RecordId::from("nope");
    let err = replace_record(&ctx, &missing, person("nope", "x"))
        .await
        .expect_err("replace missing");
    assert_eq!(err.code, ErrorCode::NotFound);
    let err = delete_record(&ctx, &missing)
        .await
        .expect_err("delete missing");
    assert_eq!(err.code, ErrorCode::NotFound);
}
