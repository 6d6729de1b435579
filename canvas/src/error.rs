//! Engine error type.
//!
//! Every variant is a sequencing or input bug surfaced to the host rather
//! than a panic. The host logs it and carries on from an idle engine.

use thiserror::Error;

use crate::doc::{ShapeId, ShapeKind};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("shape {0} not found")]
    ShapeNotFound(ShapeId),

    #[error("shape {id} is a {found}, expected a {expected}")]
    KindMismatch { id: ShapeId, expected: ShapeKind, found: ShapeKind },

    #[error("index {index} out of range for {len} shapes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{kind} has no attribute `{key}`")]
    UnknownAttribute { kind: ShapeKind, key: String },

    #[error("attribute `{key}` expects a number, got `{value}`")]
    InvalidNumber { key: String, value: String },

    #[error("a polygon needs at least {min} sides, got `{value}`")]
    InvalidSides { min: u32, value: String },
}
