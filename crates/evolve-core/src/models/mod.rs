//! Data models for the coaching engine.
//!
//! These are plain data types with serde derives; behavior lives in the
//! [`crate::store`] (task lifecycle rules), [`crate::projector`] (plan
//! projection) and [`crate::lifecycle`] (state machine) modules. Display
//! implementations are in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use evolve_core::models::{CoachCard, CardKind};
//!
//! let raw = r#"{"type":"truth_card","data":{"energy":["low","high"],"time_budget":["5 min"],"blockers":[]}}"#;
//! let card: CoachCard = serde_json::from_str(raw).unwrap();
//! assert_eq!(card.kind(), CardKind::Truth);
//! ```

pub mod card;
pub mod message;
pub mod plan;
pub mod status;
pub mod task;


pub use card::{CardKind, ChoiceOption, ChoiceSet, CoachCard, PlanPreview, TruthSnapshot};
pub use message::{ChatMessage, Role};
pub use plan::{Plan, PlanPhase, TaskTemplate};
pub use status::{
    CoachMode, Difficulty, EnergyLevel, LifecycleState, PlanStatus, TaskKind, TaskSource,
    TaskStatus,
};
pub use task::{Task, PLAN_TASK_EXP, USER_TASK_EXP};
