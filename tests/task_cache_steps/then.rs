//! Then steps for cache-aside task BDD scenarios.

use super::world::TaskCacheWorld;
use cachet::task::{
    ports::{CacheStoreError, TaskRepositoryError},
    services::TaskServiceError,
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then("the store served {reads:usize} reads")]
fn store_served_reads(world: &TaskCacheWorld, reads: usize) -> Result<(), eyre::Report> {
    let served = world.store.read_count();
    eyre::ensure!(served == reads, "expected {reads} store reads, found {served}");
    Ok(())
}

#[then("the cache holds the latest task")]
fn cache_holds_latest(world: &TaskCacheWorld) -> Result<(), eyre::Report> {
    let key = format!("task:{}", world.latest()?.id());
    let cached = world.cache.contains_key(&key).wrap_err("inspect cache")?;
    eyre::ensure!(cached, "expected cache entry {key}");
    Ok(())
}

#[then("the listed total is {total:i64}")]
fn listed_total(world: &TaskCacheWorld, total: i64) -> Result<(), eyre::Report> {
    let page = world.page()?;
    eyre::ensure!(
        page.total == total,
        "expected total {total}, found {}",
        page.total
    );
    Ok(())
}

#[then("the page holds {count:usize} tasks")]
fn page_holds(world: &TaskCacheWorld, count: usize) -> Result<(), eyre::Report> {
    let page = world.page()?;
    eyre::ensure!(
        page.items.len() == count,
        "expected {count} tasks on the page, found {}",
        page.items.len()
    );
    Ok(())
}

#[then(r#"the first listed task is "{title}""#)]
fn first_listed(world: &TaskCacheWorld, title: String) -> Result<(), eyre::Report> {
    let first = world
        .page()?
        .items
        .first()
        .ok_or_else(|| eyre::eyre!("page is empty"))?;
    eyre::ensure!(
        first.title() == title,
        "expected first task {title}, found {}",
        first.title()
    );
    Ok(())
}

#[then("the listing fails with an invalid input error")]
fn listing_invalid(world: &TaskCacheWorld) -> Result<(), eyre::Report> {
    match world.page_result()? {
        Err(err) if err.is_invalid_input() => Ok(()),
        other => Err(eyre::eyre!("expected invalid input error, got {other:?}")),
    }
}

#[then(r#"the read task has title "{title}""#)]
fn read_task_title(world: &TaskCacheWorld, title: String) -> Result<(), eyre::Report> {
    let task = world
        .last_read
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing read result"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("read failed: {err}"))?;
    eyre::ensure!(
        task.title() == title,
        "expected title {title}, found {}",
        task.title()
    );
    Ok(())
}

#[then("the read fails with a cache error")]
fn read_fails_with_cache_error(world: &TaskCacheWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_read
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing read result"))?;
    if !matches!(
        result,
        Err(TaskServiceError::Repository(TaskRepositoryError::Cache(
            CacheStoreError::Unavailable(_)
        )))
    ) {
        return Err(eyre::eyre!("expected cache unavailable error, got {result:?}"));
    }
    Ok(())
}
