//! The orchestrating engine.
//!
//! [`Engine`] owns the [`EntityStore`], the advisory service and the path of
//! the snapshot database. It is the only writer of the store: every
//! mutating entry point takes `&mut self`, runs the completion watcher and
//! then writes a snapshot.
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────────┐   ┌──────────────────┐
//! │ Presentation │──▶│       Engine        │──▶│ AdvisoryService  │
//! │ (CLI, tests) │   │ store + lifecycle   │   └──────────────────┘
//! └──────────────┘   │ + dialogue + cards  │──▶┌──────────────────┐
//!                    └─────────────────────┘   │ SQLite snapshot  │
//!                                              └──────────────────┘
//! ```
//!
//! Persistence is best-effort: a failed write is logged and never undoes the
//! in-memory change.
//!
//! # Examples
//!
//! ```rust
//! use evolve_core::{params::AddTask, EngineBuilder, OfflineAdvisor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = EngineBuilder::new()
//!     .with_database_path(Some("evolve.db"))
//!     .with_advisor(OfflineAdvisor)
//!     .build()
//!     .await?;
//!
//! let task = engine.add_task(&AddTask::titled("Drink water")).await?;
//! engine.toggle_task(&task.id).await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use jiff::civil::Date;
use log::{info, warn};
use tokio::task;

use crate::{
    config::EngineConfig,
    db::Database,
    dialogue::{turn::turn_count, AdvisoryService},
    error::CoachError,
    lifecycle::{self, InitialView},
    models::{ChatMessage, CoachMode, EnergyLevel, LifecycleState, Plan, Task},
    store::EntityStore,
};

pub mod builder;
pub mod card_ops;
pub mod dialogue_ops;
pub mod plan_ops;
pub mod task_ops;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use card_ops::CardOutcome;
pub use dialogue_ops::TurnOutcome;

/// Single-user coaching engine.
pub struct Engine {
    pub(crate) store: EntityStore,
    pub(crate) db_path: PathBuf,
    pub(crate) advisor: Box<dyn AdvisoryService>,
    pub(crate) config: EngineConfig,
    /// Lifecycle state found in the database at startup
    pub(crate) persisted_state: Option<LifecycleState>,
}

/// Today's civil date in the system time zone.
pub(crate) fn today() -> Date {
    jiff::Zoned::now().date()
}

impl Engine {
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn plans(&self) -> &[Plan] {
        self.store.plans()
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.store.lifecycle_state()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        self.store.messages()
    }

    pub fn energy(&self) -> EnergyLevel {
        self.store.energy()
    }

    /// Turn number of the next request, derived from the transcript.
    pub fn turn_count(&self) -> usize {
        turn_count(self.store.messages().len())
    }

    pub fn coach_mode(&self) -> CoachMode {
        lifecycle::coach_mode(&self.store)
    }

    /// View to open on a cold start, from the state found at startup.
    pub fn initial_view(&self) -> InitialView {
        lifecycle::initial_view(self.persisted_state)
    }

    /// Index of the most recent card that has not been answered yet.
    pub fn pending_card(&self) -> Option<usize> {
        self.store
            .messages()
            .iter()
            .enumerate()
            .rev()
            .find(|(i, m)| m.card.is_some() && !self.store.is_card_answered(*i))
            .map(|(i, _)| i)
    }

    pub async fn set_energy(&mut self, energy: EnergyLevel) -> EnergyLevel {
        self.store.set_energy(energy);
        self.persist().await;
        energy
    }

    /// Advances energy high → medium → low → high.
    pub async fn cycle_energy(&mut self) -> EnergyLevel {
        let next = self.store.energy().next();
        self.set_energy(next).await
    }

    /// Sets the lifecycle state explicitly, e.g. to mark being stuck.
    ///
    /// The completion watcher is not re-run, so an explicit choice sticks
    /// until the next task or plan mutation.
    pub async fn set_lifecycle_state(&mut self, state: LifecycleState) -> LifecycleState {
        if state != self.store.lifecycle_state() {
            info!(
                "Lifecycle state set {} -> {}",
                self.store.lifecycle_state().as_str(),
                state.as_str()
            );
        }
        self.store.set_lifecycle_state(state);
        self.persist().await;
        state
    }

    /// Runs the completion watcher and writes a snapshot.
    pub(crate) async fn after_mutation(&mut self) {
        lifecycle::watch(&mut self.store);
        self.persist().await;
    }

    /// Writes the full store. Failures are logged, never returned.
    pub(crate) async fn persist(&self) {
        let db_path = self.db_path.clone();
        let snapshot = self.store.clone();

        let result = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.save_store(&snapshot)
        })
        .await
        .map_err(|e| CoachError::Configuration {
            message: format!("Task join error: {e}"),
        })
        .and_then(|r| r);

        if let Err(e) = result {
            warn!("Failed to persist snapshot to {}: {e}", self.db_path.display());
        }
    }
}
