//! Repository error type.

use sea_orm::DbErr;
use smartbudget_core::access::AccessError;
use smartbudget_shared::AppError;
use thiserror::Error;

/// Result type alias for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by repositories.
///
/// Business rule failures arrive already classified as `AppError`; driver
/// failures stay as `DbErr` until they reach the API boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A business rule rejected the operation.
    #[error(transparent)]
    App(#[from] AppError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccessError> for StoreError {
    fn from(e: AccessError) -> Self {
        Self::App(e.into())
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::App(app) => app,
            StoreError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

impl StoreError {
    /// Returns the business error, if this is one.
    #[must_use]
    pub const fn as_app(&self) -> Option<&AppError> {
        match self {
            Self::App(app) => Some(app),
            Self::Database(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartbudget_core::access::ResourceKind;

    #[test]
    fn test_access_error_keeps_kind() {
        let error: StoreError = AccessError::NotFound {
            kind: ResourceKind::Sheet,
            id: 4,
        }
        .into();

        assert_eq!(
            error.as_app(),
            Some(&AppError::NotFound("not found sheetId: 4".into()))
        );
    }

    #[test]
    fn test_db_error_becomes_database() {
        let error = StoreError::from(DbErr::Custom("boom".into()));
        let app: AppError = error.into();

        assert!(matches!(app, AppError::Database(_)));
    }
}
