use thiserror::Error;

use crate::document::validate::ValidationError;

/// Failures reported by a document store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("invalid address: {0}")]
    Invalid(#[from] ValidationError),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Gateway failures. Messages are stable and safe to show to users; the
/// underlying store error is logged where it is caught.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("failed to fetch records")]
    Fetch,

    #[error("failed to add record")]
    Create,

    #[error("failed to update record")]
    Update,

    #[error("failed to delete record")]
    Delete,
}
