//! Core use-case services.
//!
//! # Responsibility
//! - Wrap the blocking record store into the async repository contract.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod reminder_repository;
