//! Given steps for cache-aside task BDD scenarios.

use super::world::{TaskCacheWorld, run_async};
use cachet::task::domain::{CreateTaskInput, PageParams};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a task service over an empty store and cache")]
fn empty_service(world: &TaskCacheWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.store.is_empty().wrap_err("inspect store")?,
        "scenario store should start empty"
    );
    Ok(())
}

#[given("the store holds {count:usize} tasks")]
fn store_holds_tasks(world: &mut TaskCacheWorld, count: usize) -> Result<(), eyre::Report> {
    for index in 1..=count {
        let task = run_async(
            world
                .service
                .create(CreateTaskInput::new(format!("task-{index}"), "seeded")),
        )
        .wrap_err("seed task for scenario")?;
        world.created.push(task);
    }
    Ok(())
}

#[given("the task list has been read")]
fn task_list_read(world: &mut TaskCacheWorld) -> Result<(), eyre::Report> {
    run_async(world.service.find_all(PageParams::default()))
        .wrap_err("warm the list cache")?;
    Ok(())
}

#[given("the latest task has been read")]
fn latest_task_read(world: &mut TaskCacheWorld) -> Result<(), eyre::Report> {
    let id = world.latest()?.id();
    run_async(world.service.find_by_id(id)).wrap_err("warm the task cache")?;
    Ok(())
}

#[given("the cache is unavailable")]
fn cache_unavailable(world: &mut TaskCacheWorld) {
    world.cache.set_available(false);
}
