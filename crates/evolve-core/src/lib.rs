//! Core library for the Evolve coaching engine.
//!
//! Evolve guides a single user from open-ended reflection to an executed
//! plan. A dialogue with a hosted advisory service moves through an ordered
//! workshop (truth snapshot, strategy choice, plan preview); an accepted
//! plan is projected into concrete tasks whose completion drives the user's
//! lifecycle state.
//!
//! # Layout
//!
//! - [`models`]: plain data types (tasks, plans, messages, cards, statuses)
//! - [`store`]: the in-memory entity store and task lifecycle rules
//! - [`projector`]: plan-to-task projection
//! - [`lifecycle`]: lifecycle state machine, coach mode, completion watcher
//! - [`dialogue`]: turn counting, context assembly, reply normalization,
//!   phase gate and the advisory service seam
//! - [`cards`]: card answers as commitment sentences
//! - [`db`]: SQLite snapshot persistence
//! - [`engine`]: the orchestrating [`Engine`] and its builder
//! - [`display`]: markdown formatting
//!
//! # Quick Start
//!
//! ```rust
//! use evolve_core::{params::AddTask, EngineBuilder, OfflineAdvisor};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = EngineBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .with_advisor(OfflineAdvisor)
//!     .build()
//!     .await?;
//!
//! let outcome = engine.send_user_turn("I want to start running").await?;
//! println!("{}", outcome.message);
//!
//! let task = engine.add_task(&AddTask::titled("Lace up shoes")).await?;
//! engine.toggle_task(&task.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod cards;
pub mod config;
pub mod db;
pub mod dialogue;
pub mod display;
pub mod engine;
pub mod error;
pub mod ids;
pub mod lifecycle;
pub mod models;
pub mod params;
pub mod projector;
pub mod store;

pub use cards::{CardAnswer, READY_TO_EXECUTE};
pub use config::{AdvisoryConfig, EngineConfig};
pub use db::Database;
pub use dialogue::{AdvisoryError, AdvisoryRequest, AdvisoryService, GeminiClient, OfflineAdvisor};
pub use display::{OperationStatus, Plans, StatusReport, Tasks, Transcript};
pub use engine::{CardOutcome, Engine, EngineBuilder, TurnOutcome};
pub use error::{CoachError, Result};
pub use lifecycle::InitialView;
pub use models::{
    CardKind, ChatMessage, CoachCard, CoachMode, EnergyLevel, LifecycleState, Plan, PlanStatus,
    Task, TaskKind, TaskStatus,
};
pub use store::EntityStore;
