//! Authorization error types.

use smartbudget_shared::AppError;
use thiserror::Error;

use super::guard::{Action, ResourceKind};

/// Errors raised by the authorization guard.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    /// The resource does not exist.
    #[error("not found {}: {id}", .kind.id_label())]
    NotFound {
        /// Kind of resource looked up.
        kind: ResourceKind,
        /// Requested id.
        id: i32,
    },

    /// The resource exists but belongs to someone else.
    #[error("you don't have permission to {} this {}", .action.verb(), .kind.noun())]
    Forbidden {
        /// Kind of resource.
        kind: ResourceKind,
        /// Attempted action.
        action: Action,
    },

    /// The token subject no longer exists.
    #[error("user token invalid")]
    InvalidActor,
}

impl From<AccessError> for AppError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::NotFound { .. } => Self::NotFound(e.to_string()),
            AccessError::Forbidden { .. } | AccessError::InvalidActor => {
                Self::Unauthorized(e.to_string())
            }
        }
    }
}
