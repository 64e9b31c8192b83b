//! View-model glue between the UI and the reminder repository.
//!
//! # Responsibility
//! - Turn repository results into observable UI signals.
//! - Validate form input before anything reaches the repository.
//!
//! # Invariants
//! - `show_loading` is true while a repository call is in flight and false
//!   afterwards, whatever the outcome.
//! - Signals are only written by view-model methods, on the caller's task.

pub mod list;
pub mod save;
pub mod signal;
