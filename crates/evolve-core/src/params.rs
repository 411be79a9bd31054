//! Parameter structures for engine operations.
//!
//! These carry no interface-specific derives. Front ends define their own
//! argument types (clap in the CLI) and convert into these with `From`.

use jiff::civil::Date;

use crate::models::{Difficulty, TaskKind, TaskStatus};

/// Parameters for the quick-add path of the task view.
///
/// Unset fields take the quick-add defaults: a `single` task of `medium`
/// difficulty in the `daily` category, due today.
#[derive(Debug, Clone, Default)]
pub struct AddTask {
    pub title: String,
    pub description: Option<String>,
    pub kind: Option<TaskKind>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
    /// Required for counting tasks, defaults to 1
    pub target_count: Option<u32>,
    pub unit: Option<String>,
    pub due_date: Option<Date>,
}

impl AddTask {
    /// Quick-add with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

/// Field-wise edit of an existing task. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct EditTask {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
    pub target_count: Option<u32>,
    pub unit: Option<String>,
    pub due_date: Option<Date>,
}

/// Filter for task listings.
#[derive(Debug, Clone, Default)]
pub struct ListTasks {
    pub status: Option<TaskStatus>,
    pub plan_id: Option<String>,
}
