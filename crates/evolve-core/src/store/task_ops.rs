//! Task lifecycle rules: toggling, counting, creation and edits.
//!
//! Every operation here is a pure in-memory mutation. The engine runs the
//! completion watcher and the snapshot writer after each of them.

use log::debug;

use super::EntityStore;
use crate::{
    error::{CoachError, Result},
    models::{Task, TaskKind, TaskStatus},
};

/// Status a counting task must have for the given count: `completed` once
/// the target is reached, `active` otherwise.
pub(crate) fn counting_status(count: u32, target: u32) -> TaskStatus {
    if count >= target {
        TaskStatus::Completed
    } else {
        TaskStatus::Active
    }
}

impl EntityStore {
    fn task_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoachError::TaskNotFound { id: id.to_string() })
    }

    /// Flips a task between `active` and `completed`.
    ///
    /// Any status other than `completed` moves to `completed`. Counting tasks
    /// complete through [`EntityStore::increment_task`] instead.
    ///
    /// # Errors
    ///
    /// `TaskNotFound`, `LockedTask`, or `InvalidTaskKind` for counting tasks.
    /// The task is unchanged on error.
    pub fn toggle_task(&mut self, id: &str) -> Result<&Task> {
        let task = self.task_mut(id)?;
        if task.is_locked {
            return Err(CoachError::LockedTask { id: id.to_string() });
        }
        if task.kind == TaskKind::Counting {
            return Err(CoachError::InvalidTaskKind {
                operation: "toggle",
                kind: task.kind,
            });
        }
        task.status = if task.status == TaskStatus::Completed {
            TaskStatus::Active
        } else {
            TaskStatus::Completed
        };
        debug!("Toggled task {} to {}", task.id, task.status.as_str());
        Ok(task)
    }

    /// Adds `delta` to a counting task, clamping at zero.
    ///
    /// The status becomes `completed` iff the new count reaches the target.
    pub fn increment_task(&mut self, id: &str, delta: i64) -> Result<&Task> {
        let task = self.task_mut(id)?;
        if task.is_locked {
            return Err(CoachError::LockedTask { id: id.to_string() });
        }
        if task.kind != TaskKind::Counting {
            return Err(CoachError::InvalidTaskKind {
                operation: "increment",
                kind: task.kind,
            });
        }
        let current = i64::from(task.current_count.unwrap_or(0));
        let next = u32::try_from(current.saturating_add(delta).max(0)).unwrap_or(u32::MAX);
        let target = task.effective_target();
        task.current_count = Some(next);
        task.target_count = Some(target);
        task.status = counting_status(next, target);
        debug!("Task {} count {next}/{target}", task.id);
        Ok(task)
    }

    /// Inserts a task at the head of the collection.
    pub fn create_task(&mut self, mut task: Task) -> Result<&Task> {
        Self::validate_task(&task)?;
        if self.task(&task.id).is_some() {
            return Err(CoachError::invalid_input("id")
                .with_reason(format!("Task ID {} already exists", task.id)));
        }
        if task.kind == TaskKind::Counting {
            let count = task.current_count.unwrap_or(0);
            task.current_count = Some(count);
            task.status = counting_status(count, task.effective_target());
        }
        self.tasks.insert(0, task);
        Ok(&self.tasks[0])
    }

    /// Replaces a task by identifier.
    ///
    /// Returns `Ok(false)` without touching anything when the id is unknown;
    /// callers that care must check existence first.
    ///
    /// # Errors
    ///
    /// `LockedTask` when the stored task is locked, `InvalidInput` when the
    /// replacement breaks a task invariant.
    pub fn update_task(&mut self, mut task: Task) -> Result<bool> {
        let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) else {
            debug!("Ignoring update for unknown task {}", task.id);
            return Ok(false);
        };
        if slot.is_locked {
            return Err(CoachError::LockedTask { id: task.id });
        }
        Self::validate_task(&task)?;
        if task.kind == TaskKind::Counting {
            let count = task.current_count.unwrap_or(0);
            task.current_count = Some(count);
            task.status = counting_status(count, task.effective_target());
        } else {
            task.current_count = None;
        }
        *slot = task;
        Ok(true)
    }
}
