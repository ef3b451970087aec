//! Command execution tests against the in-memory store.

use std::sync::Arc;

use common::AppError;
use domain::{PageRequest, UserDetails};
use user_service_lib::repository::MemoryUserStore;
use user_service_lib::service::UserManager;
use user_service_lib::{execute, exit_code, failure_report, Command};

fn service() -> UserManager {
    UserManager::new(Arc::new(MemoryUserStore::new()))
}

#[tokio::test]
async fn test_create_renders_stored_record() {
    let service = service();
    let details = UserDetails::new("Kiran", "south", 300).with_identity_number("5555");

    let output = execute(&service, Command::Create(details)).await.unwrap().unwrap();

    assert_eq!(output["id"], 1);
    assert_eq!(output["name"], "Kiran");
    assert_eq!(output["region"], "south");
    assert_eq!(output["amount"], 300);
    assert_eq!(output["identity_number"], "5555");
}

#[tokio::test]
async fn test_get_missing_renders_null() {
    let service = service();

    let output = execute(&service, Command::Get(42)).await.unwrap();

    assert_eq!(output, Some(serde_json::Value::Null));
}

#[tokio::test]
async fn test_list_renders_page_metadata() {
    let service = service();
    for name in ["A", "B", "C"] {
        execute(&service, Command::Create(UserDetails::new(name, "east", 1)))
            .await
            .unwrap();
    }

    let request = PageRequest::new(1, 2).unwrap();
    let output = execute(&service, Command::List(request)).await.unwrap().unwrap();

    assert_eq!(output["total"], 3);
    assert_eq!(output["total_pages"], 2);
    assert_eq!(output["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(output["items"][0]["name"], "C");
}

#[tokio::test]
async fn test_find_and_delete() {
    let service = service();
    execute(
        &service,
        Command::Create(UserDetails::new("Dev", "west", 9).with_identity_number("ID-9")),
    )
    .await
    .unwrap();

    let found = execute(&service, Command::Find("ID-9".to_string()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found["name"], "Dev");

    let deleted = execute(&service, Command::Delete(1)).await.unwrap();
    assert!(deleted.is_none());

    let again = execute(&service, Command::Delete(1)).await;
    assert!(matches!(again, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_update_conflict_surfaces() {
    let service = service();
    execute(
        &service,
        Command::Create(UserDetails::new("A", "west", 1).with_identity_number("X")),
    )
    .await
    .unwrap();
    execute(
        &service,
        Command::Create(UserDetails::new("B", "west", 1).with_identity_number("Y")),
    )
    .await
    .unwrap();

    let result = execute(
        &service,
        Command::Update(2, UserDetails::new("B", "west", 1).with_identity_number("X")),
    )
    .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_failed_command_reports_code_and_message() {
    let service = service();
    execute(
        &service,
        Command::Create(UserDetails::new("A", "west", 1).with_identity_number("X")),
    )
    .await
    .unwrap();

    let conflict = execute(
        &service,
        Command::Create(UserDetails::new("B", "west", 1).with_identity_number("X")),
    )
    .await
    .unwrap_err();
    assert_eq!(
        failure_report(&conflict),
        "CONFLICT: Identity number already exists"
    );
    assert_eq!(exit_code(&conflict), 2);

    let missing = execute(&service, Command::Delete(99)).await.unwrap_err();
    assert_eq!(failure_report(&missing), "NOT_FOUND: Resource not found");
    assert_eq!(exit_code(&missing), 2);

    let invalid = execute(&service, Command::Create(UserDetails::new("  ", "west", 1)))
        .await
        .unwrap_err();
    assert!(failure_report(&invalid).starts_with("VALIDATION_ERROR: "));
    assert_eq!(exit_code(&invalid), 2);
}

#[test]
fn test_store_failure_hides_details_and_exits_one() {
    let err = AppError::internal("lock poisoned");

    assert_eq!(
        failure_report(&err),
        "INTERNAL_ERROR: An internal error occurred"
    );
    assert_eq!(exit_code(&err), 1);
}
