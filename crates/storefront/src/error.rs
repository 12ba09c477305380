//! Unified error handling.
//!
//! Each concern has its own error enum; this module folds them into one
//! `AppError` for callers that drive the whole application (the CLI, the
//! integration tests). No error here is fatal: every failure path returns
//! control to the user for another attempt.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::orders::OrderError;
use crate::reviews::ReviewError;
use crate::session::SessionError;
use crate::store::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog load failed (network, status, or parse).
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Local store operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Order lifecycle operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Review operation failed.
    #[error("Review error: {0}")]
    Review(#[from] ReviewError),

    /// Session transition was not allowed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Export document could not be serialized.
    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),
}

impl AppError {
    /// Whether this error is recoverable user input (retry immediately)
    /// rather than an infrastructure failure.
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::Session(_) | Self::Review(ReviewError::MissingFields) | Self::Order(OrderError::NotFound(_))
        )
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use footwa_core::OrderId;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(OrderError::NotFound(OrderId::from("ORD-1")));
        assert_eq!(err.to_string(), "Order error: no active order ORD-1");

        let err = AppError::from(ReviewError::MissingFields);
        assert_eq!(
            err.to_string(),
            "Review error: a name and a comment are both required"
        );
    }

    #[test]
    fn test_user_input_classification() {
        assert!(AppError::from(ReviewError::MissingFields).is_user_input());
        assert!(AppError::from(OrderError::NotFound(OrderId::from("ORD-1"))).is_user_input());
        assert!(
            !AppError::from(CatalogError::Status(reqwest::StatusCode::BAD_GATEWAY))
                .is_user_input()
        );
    }
}
