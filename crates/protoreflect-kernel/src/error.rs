//! Error types for protoreflect kernel operations.
//!
//! The reflected nodes themselves never fail: recognition and construction
//! from JSON are total. Errors only arise at the edges where raw text is
//! parsed or a permissive id is narrowed to an integer.

/// Errors arising from the fallible edges of the reflection kernel.
#[derive(Debug, thiserror::Error)]
pub enum ReflectError {
    /// Raw schema text was not well-formed JSON.
    #[error("malformed schema json: {0}")]
    Json(#[from] serde_json::Error),

    /// An enum id that is not an integer was read as one.
    #[error("enum id is not an integer: {id}")]
    NonIntegerId { id: String },
}
