//! Error types for the manipulation engine.
//!
//! Only contract violations are errors. Stale samples, degenerate sizes and a
//! missing pointer origin are absorbed by the engine and never reach callers.

use crate::objects::ObjectKind;
use thiserror::Error;

/// Errors raised by the manipulation engine.
#[derive(Debug, Error)]
pub enum ManipulationError {
    #[error("no geometry adapter registered for object kind `{kind}`")]
    NoAdapter { kind: ObjectKind },
    #[error("object kind `{kind}` expects {expected} geometry, got {found}")]
    AdapterMismatch {
        kind: ObjectKind,
        expected: &'static str,
        found: &'static str,
    },
    #[error("object kind `{kind}` cannot be rotated")]
    RotationUnsupported { kind: ObjectKind },
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}

/// Result type for manipulation operations.
pub type ManipulationResult<T> = Result<T, ManipulationError>;
