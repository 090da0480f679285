//! In-memory integration tests for service-level error handling.

use cachet::task::{
    domain::{CreateTaskInput, PageParams, TaskDomainError, TaskId},
    ports::{CacheStore, TaskRepositoryError},
    services::TaskServiceError,
};
use rstest::rstest;

use super::helpers::{Harness, harness};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_identifier_is_not_found(harness: Harness) {
    let err = harness
        .service
        .find_by_id(TaskId::new(77))
        .await
        .expect_err("lookup should fail");

    assert!(err.is_not_found());
    assert!(
        !harness
            .cache
            .contains_key("task:77")
            .expect("cache readable")
    );
}

#[rstest]
#[case(PageParams::new(0, 10), TaskDomainError::InvalidPage(0))]
#[case(PageParams::new(1, -1), TaskDomainError::InvalidPageSize(-1))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_pagination_is_reported_as_input_error(
    harness: Harness,
    #[case] params: PageParams,
    #[case] expected: TaskDomainError,
) {
    let err = harness
        .service
        .find_all(params)
        .await
        .expect_err("listing should fail");

    assert!(err.is_invalid_input());
    assert!(matches!(err, TaskServiceError::Domain(ref found) if *found == expected));
    assert_eq!(harness.store.read_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_cache_entry_is_reported_not_bypassed(harness: Harness) {
    let created = harness
        .service
        .create(CreateTaskInput::new("Victim", ""))
        .await
        .expect("create should succeed");
    let key = format!("task:{}", created.id());
    harness
        .cache
        .set(&key, "{\"id\":")
        .await
        .expect("cache write should succeed");

    let err = harness
        .service
        .find_by_id(created.id())
        .await
        .expect_err("corrupt entry should fail the read");

    assert!(matches!(
        err,
        TaskServiceError::Repository(TaskRepositoryError::Decode { key: ref found, .. })
            if *found == key
    ));
    assert_eq!(harness.store.read_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_tasks_round_trip_through_service(harness: Harness) {
    let created = harness
        .service
        .create(CreateTaskInput::new("Round trip", "check fields").with_completed(true))
        .await
        .expect("create should succeed");

    let found = harness
        .service
        .find_by_id(created.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(found.title(), "Round trip");
    assert_eq!(found.todo(), "check fields");
    assert!(found.completed());
    assert!(found.deleted_at().is_none());
}
