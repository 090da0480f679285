//! In-memory integration tests for read-through population and write
//! invalidation.

use cachet::task::{
    domain::{CreateTaskInput, PageParams, UpdateTaskInput},
    ports::{CacheStoreError, TaskRepositoryError, TaskStore, TaskStoreError},
    services::TaskServiceError,
};
use rstest::rstest;

use super::helpers::{Harness, harness};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_read_is_served_from_cache(harness: Harness) {
    let created = harness
        .service
        .create(CreateTaskInput::new("Read me", "twice"))
        .await
        .expect("create should succeed");
    let key = format!("task:{}", created.id());

    let first = harness
        .service
        .find_by_id(created.id())
        .await
        .expect("first read should succeed");
    assert_eq!(harness.store.read_count(), 1);
    assert!(harness.cache.contains_key(&key).expect("cache readable"));

    let second = harness
        .service
        .find_by_id(created.id())
        .await
        .expect("second read should succeed");

    assert_eq!(harness.store.read_count(), 1);
    assert_eq!(first, created);
    assert_eq!(second, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_drops_cached_pages_and_count(harness: Harness) {
    harness.seed(2).await.expect("seeding should succeed");
    harness
        .service
        .find_all(PageParams::default())
        .await
        .expect("listing should succeed");
    assert!(harness.cache.contains_key("task").expect("cache readable"));
    assert!(harness.cache.contains_key("task:count").expect("cache readable"));

    harness
        .service
        .create(CreateTaskInput::new("Third", ""))
        .await
        .expect("create should succeed");

    assert!(!harness.cache.contains_key("task").expect("cache readable"));
    assert!(!harness.cache.contains_key("task:count").expect("cache readable"));
    let page = harness
        .service
        .find_all(PageParams::default())
        .await
        .expect("listing should succeed");
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn count_reflects_delete_after_being_cached(harness: Harness) {
    let created = harness.seed(3).await.expect("seeding should succeed");
    let before = harness
        .service
        .find_all(PageParams::default())
        .await
        .expect("listing should succeed");
    assert_eq!(before.total, 3);

    let doomed = created.first().expect("seeded task").id();
    harness
        .service
        .delete_by_id(doomed)
        .await
        .expect("delete should succeed");

    let after = harness
        .service
        .find_all(PageParams::default())
        .await
        .expect("listing should succeed");
    assert_eq!(after.total, 2);
    assert!(after.items.iter().all(|task| task.id() != doomed));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_is_no_longer_served_from_cache(harness: Harness) {
    let created = harness
        .service
        .create(CreateTaskInput::new("Short lived", ""))
        .await
        .expect("create should succeed");
    harness
        .service
        .find_by_id(created.id())
        .await
        .expect("read should populate the cache");

    harness
        .service
        .delete_by_id(created.id())
        .await
        .expect("delete should succeed");

    let err = harness
        .service
        .find_by_id(created.id())
        .await
        .expect_err("deleted task should not be found");
    assert!(err.is_not_found());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_returns_stored_row_and_repopulates_cache(harness: Harness) {
    let created = harness
        .service
        .create(CreateTaskInput::new("Draft", "first pass"))
        .await
        .expect("create should succeed");
    harness
        .service
        .find_by_id(created.id())
        .await
        .expect("read should populate the cache");

    let updated = harness
        .service
        .update(
            created.id(),
            UpdateTaskInput::new().with_title("Final").with_completed(true),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.id(), created.id());
    assert_eq!(updated.title(), "Final");
    assert_eq!(updated.todo(), "first pass");
    assert!(updated.completed());
    assert_eq!(updated.created_at(), created.created_at());
    assert!(updated.updated_at() >= created.updated_at());

    let reads = harness.store.read_count();
    let reread = harness
        .service
        .find_by_id(created.id())
        .await
        .expect("read should succeed");
    assert_eq!(reread, updated);
    assert_eq!(harness.store.read_count(), reads);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_task_is_not_found(harness: Harness) {
    let err = harness
        .service
        .update(
            cachet::task::domain::TaskId::new(999),
            UpdateTaskInput::new().with_todo("nothing"),
        )
        .await
        .expect_err("update should fail");

    assert!(err.is_not_found());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unavailable_cache_fails_reads_without_touching_store(harness: Harness) {
    let created = harness
        .service
        .create(CreateTaskInput::new("Unreachable", ""))
        .await
        .expect("create should succeed");
    harness.cache.set_available(false);

    let err = harness
        .service
        .find_by_id(created.id())
        .await
        .expect_err("read should fail while the cache is down");

    assert!(matches!(
        err,
        TaskServiceError::Repository(TaskRepositoryError::Cache(CacheStoreError::Unavailable(_)))
    ));
    assert_eq!(harness.store.read_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn write_commits_even_when_invalidation_fails(harness: Harness) {
    harness.cache.set_available(false);

    let err = harness
        .service
        .create(CreateTaskInput::new("Committed", ""))
        .await
        .expect_err("invalidation failure should surface");

    assert!(matches!(
        err,
        TaskServiceError::Repository(TaskRepositoryError::Cache(_))
    ));
    assert_eq!(harness.store.len().expect("store readable"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_commits_even_when_invalidation_fails(harness: Harness) {
    let created = harness
        .service
        .create(CreateTaskInput::new("A", "keep"))
        .await
        .expect("create should succeed");
    harness.cache.set_available(false);

    let err = harness
        .service
        .update(created.id(), UpdateTaskInput::new().with_title("B"))
        .await
        .expect_err("invalidation failure should surface");

    assert!(matches!(
        err,
        TaskServiceError::Repository(TaskRepositoryError::Cache(CacheStoreError::Unavailable(_)))
    ));
    let stored = harness
        .store
        .find_by_id(created.id())
        .await
        .expect("updated row should be stored");
    assert_eq!(stored.title(), "B");
    assert_eq!(stored.todo(), "keep");

    harness.cache.set_available(true);
    let reread = harness
        .service
        .find_by_id(created.id())
        .await
        .expect("read should succeed once the cache is back");
    assert_eq!(reread.title(), "B");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_commits_even_when_invalidation_fails(harness: Harness) {
    let created = harness
        .service
        .create(CreateTaskInput::new("Doomed", ""))
        .await
        .expect("create should succeed");
    harness.cache.set_available(false);

    let err = harness
        .service
        .delete_by_id(created.id())
        .await
        .expect_err("invalidation failure should surface");

    assert!(matches!(
        err,
        TaskServiceError::Repository(TaskRepositoryError::Cache(_))
    ));
    assert!(matches!(
        harness.store.find_by_id(created.id()).await,
        Err(TaskStoreError::NotFound(id)) if id == created.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_absent_task_succeeds(harness: Harness) {
    harness
        .service
        .delete_by_id(cachet::task::domain::TaskId::new(424_242))
        .await
        .expect("deleting an absent task should succeed");

    assert!(harness.store.is_empty().expect("store readable"));
}
