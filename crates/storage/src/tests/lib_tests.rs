use super::*;
use shared::domain::Gender;

fn person(id: &str, name: &str) -> PersonRecord {
    let mut record = PersonRecord::blank(RecordId::from(id));
    record.name = name.to_string();
    record.email = format!("{}@example.com", name.to_ascii_lowercase());
    record
}

#[tokio::test]
async fn lists_records_in_insertion_order() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    for (id, name) in [("00c1", "Zed"), ("00a1", "Ada"), ("00b1", "Bob")] {
        assert!(storage.insert_record(&person(id, name)).await.expect("insert"));
    }

    let names: Vec<String> = storage
        .list_records()
        .await
        .expect("list")
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Zed", "Ada", "Bob"]);
}

#[tokio::test]
async fn duplicate_insert_is_reported_and_keeps_original() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert!(storage.insert_record(&person("beef", "Ada")).await.expect("insert"));
    assert!(!storage
        .insert_record(&person("beef", "Impostor"))
        .await
        .expect("insert"));

    let stored = storage
        .get_record(&RecordId::from("beef"))
        .await
        .expect("get")
        .expect("present");
    assert_eq!(stored.name, "Ada");
}

#[tokio::test]
async fn replace_swaps_the_whole_body() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.insert_record(&person("0001", "Ada")).await.expect("insert");

    let mut updated = person("0001", "Ada Lovelace");
    updated.gender = Gender::Female;
    updated.rating = 9.0;
    assert!(storage
        .replace_record(&RecordId::from("0001"), &updated)
        .await
        .expect("replace"));
    assert!(!storage
        .replace_record(&RecordId::from("ffff"), &updated)
        .await
        .expect("replace missing"));

    let records = storage.list_records().await.expect("list");
    assert_eq!(records, vec![updated]);
}

#[tokio::test]
async fn delete_reports_whether_a_row_matched() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.insert_record(&person("0001", "Ada")).await.expect("insert");

    assert!(storage.delete_record(&RecordId::from("0001")).await.expect("delete"));
    assert!(!storage.delete_record(&RecordId::from("0001")).await.expect("delete again"));
    assert!(storage
        .get_record(&RecordId::from("0001"))
        .await
        .expect("get")
        .is_none());
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("records.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    storage.insert_record(&person("0001", "Ada")).await.expect("insert");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    let reopened = Storage::new(&database_url).await.expect("reopen");
    assert_eq!(reopened.list_records().await.expect("list").len(), 1);
}

#[test]
fn sqlite_path_ignores_memory_and_query_suffix() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/records.db?mode=rwc"),
        Some(PathBuf::from("./data/records.db"))
    );
}
