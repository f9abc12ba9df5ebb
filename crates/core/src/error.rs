use crate::types::DbId;

/// Failures surfaced by the lesson plan domain.
///
/// The HTTP layer maps each variant to exactly one status code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No row of `entity` exists with `id`.
    #[error("No {entity} found for ID [{id}]")]
    NotFound { entity: &'static str, id: DbId },

    /// Request content failed structural or field validation.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Missing, malformed, or expired caller credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated caller lacks the lesson plan management capability.
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The persistence gateway failed.
    #[error("Storage failure: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience alias for results carrying a [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
