//! Plan operations for the Engine.

use log::info;

use super::{today, Engine};
use crate::{
    error::{CoachError, Result},
    lifecycle,
    models::{Plan, PlanStatus, Task},
    projector,
};

impl Engine {
    /// Activates a drafted plan and projects its first phase into tasks.
    ///
    /// All-or-nothing: the tasks are synthesized before the store changes.
    ///
    /// # Errors
    ///
    /// `InvalidPlanState` when the plan is not drafted or a plan with the
    /// same id already exists; `InvalidInput` when it has no phases.
    pub async fn activate_plan(&mut self, plan: Plan) -> Result<Vec<Task>> {
        let tasks = self.apply_activation(plan)?;
        self.after_mutation().await;
        Ok(tasks)
    }

    /// In-memory part of [`Engine::activate_plan`].
    pub(crate) fn apply_activation(&mut self, mut plan: Plan) -> Result<Vec<Task>> {
        if let Some(existing) = self.store.plan(&plan.id) {
            return Err(CoachError::InvalidPlanState {
                id: plan.id.clone(),
                status: existing.status,
            });
        }
        let tasks = projector::project_first_phase(&plan, today())?;

        info!(
            "Activating plan {} '{}' with {} tasks",
            plan.id,
            plan.title,
            tasks.len()
        );
        plan.status = PlanStatus::Active;
        self.store.commit_activation(plan, tasks.clone());
        lifecycle::on_plan_activated(&mut self.store);
        Ok(tasks)
    }

    pub fn plan(&self, id: &str) -> Option<&Plan> {
        self.store.plan(id)
    }

    pub fn active_plan(&self) -> Option<&Plan> {
        self.store.active_plan()
    }

    /// Tasks projected from the given plan.
    pub fn plan_tasks(&self, plan_id: &str) -> Vec<Task> {
        self.store.plan_tasks(plan_id).cloned().collect()
    }
}
