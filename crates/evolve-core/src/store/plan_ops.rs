//! Plan batches applied to the store.

use log::info;

use super::EntityStore;
use crate::models::{Plan, PlanStatus, Task};

impl EntityStore {
    /// Applies an activation as one batch: closes any previously active
    /// plan, inserts the now-active plan and appends its projected tasks.
    ///
    /// A superseded plan becomes `stage_completed` when all of its tasks are
    /// done and `abandoned` otherwise, so at most one plan is ever active.
    pub(crate) fn commit_activation(&mut self, plan: Plan, tasks: Vec<Task>) {
        let superseded: Vec<(usize, PlanStatus)> = self
            .plans
            .iter()
            .enumerate()
            .filter(|(_, p)| p.status == PlanStatus::Active)
            .map(|(i, p)| {
                let mut own = self.plan_tasks(&p.id).peekable();
                let finished = own.peek().is_some() && own.all(Task::is_completed);
                let status = if finished {
                    PlanStatus::StageCompleted
                } else {
                    PlanStatus::Abandoned
                };
                (i, status)
            })
            .collect();

        for (i, status) in superseded {
            info!(
                "Closing plan {} as {} in favour of {}",
                self.plans[i].id,
                status.as_str(),
                plan.id
            );
            self.plans[i].status = status;
        }

        self.plans.push(plan);
        self.tasks.extend(tasks);
    }
}
