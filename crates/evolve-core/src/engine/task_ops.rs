//! Task operations for the Engine.

use log::debug;

use super::{today, Engine};
use crate::{
    error::{CoachError, Result},
    ids,
    models::{Task, TaskKind, TaskSource, TaskStatus, USER_TASK_EXP},
    params::{AddTask, EditTask, ListTasks},
};

const QUICK_ADD_CATEGORY: &str = "daily";

impl Engine {
    /// Flips a task between active and completed.
    pub async fn toggle_task(&mut self, id: &str) -> Result<Task> {
        let task = self.store.toggle_task(id)?.clone();
        self.after_mutation().await;
        Ok(task)
    }

    /// Adds `delta` (possibly negative) to a counting task.
    pub async fn increment_task(&mut self, id: &str, delta: i64) -> Result<Task> {
        let task = self.store.increment_task(id, delta)?.clone();
        self.after_mutation().await;
        Ok(task)
    }

    /// Quick-adds a user task at the head of the list.
    pub async fn add_task(&mut self, params: &AddTask) -> Result<Task> {
        let title = params.title.trim();
        if title.is_empty() {
            return Err(CoachError::invalid_input("title").with_reason("Task title cannot be empty"));
        }
        let kind = params.kind.unwrap_or_default();
        let counting = kind == TaskKind::Counting;

        let task = Task {
            id: ids::new_id(),
            plan_id: None,
            title: title.to_string(),
            description: params.description.clone().filter(|d| !d.trim().is_empty()),
            source: TaskSource::UserCreated,
            kind,
            status: TaskStatus::Active,
            difficulty: params.difficulty.unwrap_or_default(),
            category: params
                .category
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| QUICK_ADD_CATEGORY.to_string()),
            exp_value: USER_TASK_EXP,
            due_date: params.due_date.unwrap_or_else(today),
            current_count: counting.then_some(0),
            target_count: if counting {
                Some(params.target_count.unwrap_or(1))
            } else {
                params.target_count
            },
            unit: params.unit.clone(),
            is_locked: false,
        };
        self.create_task(task).await
    }

    /// Inserts a fully specified task at the head of the list.
    pub async fn create_task(&mut self, task: Task) -> Result<Task> {
        let task = self.store.create_task(task)?.clone();
        debug!("Created task {} '{}'", task.id, task.title);
        self.after_mutation().await;
        Ok(task)
    }

    /// Replaces a task by id; `Ok(false)` when the id is unknown.
    pub async fn update_task(&mut self, task: Task) -> Result<bool> {
        let updated = self.store.update_task(task)?;
        if updated {
            self.after_mutation().await;
        }
        Ok(updated)
    }

    /// Applies a field-wise edit and returns the stored task.
    pub async fn edit_task(&mut self, params: &EditTask) -> Result<Task> {
        let mut task = self
            .store
            .task(&params.id)
            .cloned()
            .ok_or_else(|| CoachError::TaskNotFound {
                id: params.id.clone(),
            })?;

        if let Some(title) = &params.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = &params.description {
            task.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
        }
        if let Some(difficulty) = params.difficulty {
            task.difficulty = difficulty;
        }
        if let Some(category) = &params.category {
            task.category = category.clone();
        }
        if let Some(target) = params.target_count {
            task.target_count = Some(target);
        }
        if let Some(unit) = &params.unit {
            task.unit = Some(unit.clone());
        }
        if let Some(due_date) = params.due_date {
            task.due_date = due_date;
        }

        self.update_task(task).await?;
        self.store
            .task(&params.id)
            .cloned()
            .ok_or_else(|| CoachError::TaskNotFound {
                id: params.id.clone(),
            })
    }

    /// Resolves a full task id or a unique prefix of one.
    pub fn resolve_task_id(&self, prefix: &str) -> Result<String> {
        let prefix = prefix.trim();
        if let Some(task) = self.store.task(prefix) {
            return Ok(task.id.clone());
        }
        let mut matches = self
            .store
            .tasks()
            .iter()
            .filter(|t| !prefix.is_empty() && t.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Ok(task.id.clone()),
            (Some(_), Some(_)) => Err(CoachError::invalid_input("id")
                .with_reason(format!("Prefix '{prefix}' matches more than one task"))),
            (None, _) => Err(CoachError::TaskNotFound {
                id: prefix.to_string(),
            }),
        }
    }

    /// Tasks matching the filter, in store order.
    pub fn list_tasks(&self, filter: &ListTasks) -> Vec<Task> {
        self.store
            .tasks()
            .iter()
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .filter(|t| {
                filter
                    .plan_id
                    .as_deref()
                    .map_or(true, |plan_id| t.belongs_to(plan_id))
            })
            .cloned()
            .collect()
    }
}
