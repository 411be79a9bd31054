//! SQLite snapshot persistence.
//!
//! State is stored as a handful of named slots, each holding one
//! JSON-serialized collection. Slots are read independently so that one
//! corrupt value only resets that slot, and written together in a single
//! transaction.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod slot_queries;

pub use slot_queries::Slot;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
