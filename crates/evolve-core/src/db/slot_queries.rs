//! Slot reads and snapshot writes.

use jiff::Timestamp;
use log::{debug, warn};
use rusqlite::{params, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::{DatabaseResultExt, Result},
    store::EntityStore,
};

const SELECT_SLOT_SQL: &str = "SELECT value FROM slots WHERE key = ?1";
const UPSERT_SLOT_SQL: &str = "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

/// Logical persistence slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Tasks,
    Plans,
    UserState,
    Messages,
    Energy,
    AnsweredCards,
}

impl Slot {
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Tasks => "tasks",
            Slot::Plans => "plans",
            Slot::UserState => "user_state",
            Slot::Messages => "messages",
            Slot::Energy => "energy",
            Slot::AnsweredCards => "answered_cards",
        }
    }
}

/// Reads one slot, falling back to the default when it is absent or
/// unreadable.
fn load_or_default<T: DeserializeOwned + Default>(db: &super::Database, slot: Slot) -> T {
    match db.read_slot(slot) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!("Resetting slot '{}': {e}", slot.key());
            T::default()
        }
    }
}

impl super::Database {
    /// Reads and deserializes a single slot.
    ///
    /// Returns `Ok(None)` when the slot was never written.
    pub fn read_slot<T: DeserializeOwned>(&self, slot: Slot) -> Result<Option<T>> {
        let raw: Option<String> = self
            .connection
            .query_row(SELECT_SLOT_SQL, params![slot.key()], |row| row.get(0))
            .optional()
            .db_context("Failed to read slot")?;

        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serializes and writes a single slot.
    pub fn write_slot<T: Serialize>(&self, slot: Slot, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.connection
            .execute(
                UPSERT_SLOT_SQL,
                params![slot.key(), json, Timestamp::now().to_string()],
            )
            .db_context("Failed to write slot")?;
        Ok(())
    }

    /// Loads the whole store, one slot at a time.
    pub fn load_store(&self) -> EntityStore {
        let store = EntityStore {
            tasks: load_or_default(self, Slot::Tasks),
            plans: load_or_default(self, Slot::Plans),
            lifecycle: load_or_default(self, Slot::UserState),
            messages: load_or_default(self, Slot::Messages),
            energy: load_or_default(self, Slot::Energy),
            answered_cards: load_or_default(self, Slot::AnsweredCards),
        };
        debug!(
            "Loaded {} tasks, {} plans, {} messages",
            store.tasks.len(),
            store.plans.len(),
            store.messages.len()
        );
        store
    }

    /// Whether the lifecycle slot has ever been written.
    pub fn has_user_state(&self) -> Result<bool> {
        let raw: Option<String> = self
            .connection
            .query_row(SELECT_SLOT_SQL, params![Slot::UserState.key()], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to read slot")?;
        Ok(raw.is_some())
    }

    /// Writes every slot in one transaction.
    pub fn save_store(&mut self, store: &EntityStore) -> Result<()> {
        let now = Timestamp::now().to_string();
        let values = [
            (Slot::Tasks, serde_json::to_string(&store.tasks)?),
            (Slot::Plans, serde_json::to_string(&store.plans)?),
            (Slot::UserState, serde_json::to_string(&store.lifecycle)?),
            (Slot::Messages, serde_json::to_string(&store.messages)?),
            (Slot::Energy, serde_json::to_string(&store.energy)?),
            (
                Slot::AnsweredCards,
                serde_json::to_string(&store.answered_cards)?,
            ),
        ];

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        for (slot, json) in &values {
            tx.execute(UPSERT_SLOT_SQL, params![slot.key(), json, &now])
                .db_context("Failed to write slot")?;
        }
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}
