//! In-memory entity store.
//!
//! The [`EntityStore`] holds the canonical collections (tasks, plans, the
//! transcript), the lifecycle state, the current energy level and the set of
//! answered cards. It owns no collaborators: persistence and the advisory
//! service are driven by [`crate::engine::Engine`], which is the only writer.
//!
//! Mutation rules for tasks live in [`task_ops`]; plan batches in
//! [`plan_ops`].

use std::collections::BTreeSet;

use crate::{
    error::{CoachError, Result},
    models::{ChatMessage, EnergyLevel, LifecycleState, Plan, PlanStatus, Task, TaskKind},
};

pub mod plan_ops;
pub mod task_ops;


/// Canonical single-user state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    pub(crate) tasks: Vec<Task>,
    pub(crate) plans: Vec<Plan>,
    pub(crate) messages: Vec<ChatMessage>,
    pub(crate) lifecycle: LifecycleState,
    pub(crate) energy: EnergyLevel,
    pub(crate) answered_cards: BTreeSet<usize>,
}

impl EntityStore {
    /// Empty store in the `idle` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks, most recently created first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// The full transcript in append order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn energy(&self) -> EnergyLevel {
        self.energy
    }

    /// Transcript indices of cards that were already answered.
    pub fn answered_cards(&self) -> &BTreeSet<usize> {
        &self.answered_cards
    }

    pub fn is_card_answered(&self, index: usize) -> bool {
        self.answered_cards.contains(&index)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn plan(&self, id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// The plan currently being executed, if any.
    pub fn active_plan(&self) -> Option<&Plan> {
        self.plans.iter().find(|p| p.status == PlanStatus::Active)
    }

    /// Tasks projected from the given plan.
    pub fn plan_tasks<'a>(&'a self, plan_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.belongs_to(plan_id))
    }

    pub(crate) fn set_lifecycle_state(&mut self, state: LifecycleState) {
        self.lifecycle = state;
    }

    pub(crate) fn set_energy(&mut self, energy: EnergyLevel) {
        self.energy = energy;
    }

    /// Appends to the transcript and returns the new entry's index.
    pub(crate) fn append_message(&mut self, message: ChatMessage) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub(crate) fn mark_card_answered(&mut self, index: usize) {
        self.answered_cards.insert(index);
    }

    /// Checks the data-model invariants of a single task.
    pub fn validate_task(task: &Task) -> Result<()> {
        if task.id.trim().is_empty() {
            return Err(CoachError::invalid_input("id").with_reason("Task ID cannot be empty"));
        }
        if task.title.trim().is_empty() {
            return Err(
                CoachError::invalid_input("title").with_reason("Task title cannot be empty")
            );
        }
        if task.kind == TaskKind::Counting {
            match task.target_count {
                Some(target) if target >= 1 => {}
                _ => {
                    return Err(CoachError::invalid_input("target_count")
                        .with_reason("Counting tasks need a target of at least 1"))
                }
            }
        }
        Ok(())
    }

    /// Repairs invariants of data loaded from outside the engine.
    ///
    /// Counting tasks get a target of at least 1, a count, and a status that
    /// agrees with the count; answered-card indices beyond the transcript are
    /// dropped.
    pub(crate) fn normalize(&mut self) {
        for task in self.tasks.iter_mut().filter(|t| t.kind == TaskKind::Counting) {
            task.target_count = Some(task.effective_target());
            let count = task.current_count.unwrap_or(0);
            task.current_count = Some(count);
            task.status = task_ops::counting_status(count, task.effective_target());
        }
        let len = self.messages.len();
        self.answered_cards.retain(|&i| i < len);
    }
}
