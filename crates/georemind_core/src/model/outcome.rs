//! Serializable success/error envelope for repository results.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Tagged result shape handed across the UI boundary.
///
/// Serialized as `{"status":"success","payload":...}` or
/// `{"status":"error","message":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success { payload: T },
    Error { message: String },
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the error message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Error { message } => Some(message.as_str()),
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for Outcome<T> {
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(payload) => Self::Success { payload },
            Err(err) => Self::Error {
                message: err.to_string(),
            },
        }
    }
}
