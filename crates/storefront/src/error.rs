//! Unified error handling.
//!
//! Cart mutations never fail; these errors cover the edges around them:
//! loading configuration, opening storage, reading catalog input and
//! rendering pages.

use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend could not be opened or used.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog data did not match the product shape.
    #[error("Invalid catalog data: {0}")]
    Catalog(#[from] serde_json::Error),

    /// A page template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
