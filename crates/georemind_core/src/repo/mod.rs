//! Persistence layer for reminder records.
//!
//! # Responsibility
//! - Define the record store contract used by the async repository.
//! - Isolate SQLite query details from use-case orchestration.
//!
//! # Invariants
//! - Store writes enforce `Reminder::validate()` before persistence.
//! - Store APIs report absence as `None`/no-op, never as an error.

pub mod reminder_store;
