//! Markdown display formatting.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and composite views use the newtype wrappers below. All
//! output is markdown, rendered by the CLI's terminal renderer or printed
//! as-is.
//!
//! - [`collections`]: `Tasks`, `Plans` and `Transcript` wrappers
//! - [`status`]: `OperationStatus` and the `StatusReport` overview
//! - [`datetime`]: local formatting of message timestamps
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use evolve_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Energy set to high".to_string());
//! assert!(status.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod status;

pub use collections::{Plans, Tasks, Transcript};
pub use datetime::MessageTime;
pub use status::{OperationStatus, StatusReport};
