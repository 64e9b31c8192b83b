//! Domain model for location reminders.
//!
//! # Responsibility
//! - Define the canonical reminder record persisted by the store.
//! - Define the UI form shape and the result wire shape.
//!
//! # Invariants
//! - Every reminder is identified by a stable `ReminderId`.
//! - The identifier is the sole lookup key and never changes once assigned.

pub mod data_item;
pub mod outcome;
pub mod reminder;
