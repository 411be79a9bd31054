//! Opaque identifier generation.

/// Returns a fresh, time-ordered identifier.
pub fn new_id() -> String {
    uuid::Uuid::now_v7().simple().to_string()
}
