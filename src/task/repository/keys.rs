//! Cache key scheme for task entries.
//!
//! | Entry | Key |
//! |---|---|
//! | single task | `task:<id>` |
//! | total count | `task:count` |
//! | list page bucket | hash `task` |
//! | one page | field `task:page:<page>:size:<size>` in `task` |

use crate::task::domain::{PageQuery, TaskId};

const ENTITY: &str = "task";

/// Hash bucket holding every cached list page.
pub const LIST_BUCKET: &str = ENTITY;

/// Key holding the cached total count.
pub const COUNT_KEY: &str = "task:count";

/// Key holding a single cached task.
#[must_use]
pub fn task_key(id: TaskId) -> String {
    format!("{ENTITY}:{id}")
}

/// Field within [`LIST_BUCKET`] holding one cached page.
#[must_use]
pub fn page_field(query: PageQuery) -> String {
    format!(
        "{ENTITY}:page:{page}:size:{size}",
        page = query.page(),
        size = query.size()
    )
}
