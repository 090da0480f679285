//! When steps for cache-aside task BDD scenarios.

use super::world::{TaskCacheWorld, run_async};
use cachet::task::domain::{PageParams, UpdateTaskInput};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the latest task is read {times:usize} times")]
fn latest_task_read_times(world: &mut TaskCacheWorld, times: usize) -> Result<(), eyre::Report> {
    let id = world.latest()?.id();
    for _ in 0..times {
        let result = run_async(world.service.find_by_id(id));
        let failed = result.is_err();
        world.last_read = Some(result);
        if failed {
            break;
        }
    }
    Ok(())
}

#[when("the latest task is deleted")]
fn latest_task_deleted(world: &mut TaskCacheWorld) -> Result<(), eyre::Report> {
    let id = world.latest()?.id();
    run_async(world.service.delete_by_id(id)).wrap_err("delete latest task")?;
    world.created.pop();
    Ok(())
}

#[when("page {page:i64} of size {size:i64} is read")]
fn page_read(world: &mut TaskCacheWorld, page: i64, size: i64) {
    world.last_page = Some(run_async(
        world.service.find_all(PageParams::new(page, size)),
    ));
}

#[when(r#"the latest task is renamed to "{title}""#)]
fn latest_task_renamed(world: &mut TaskCacheWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.latest()?.id();
    let updated = run_async(
        world
            .service
            .update(id, UpdateTaskInput::new().with_title(title)),
    )
    .wrap_err("rename latest task")?;
    if let Some(slot) = world.created.last_mut() {
        *slot = updated;
    }
    Ok(())
}
