use std::fmt;

use thiserror::Error;

use crate::model::{ProcessId, Units};

/// Invalid-input errors raised while building or checking a scenario.
///
/// An unsafe state is not an error; it is reported through
/// [`SafetyVerdict::Unsafe`](crate::safety::SafetyVerdict::Unsafe).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankerError {
    #[error("ragged matrix: row {row} has {found} entries, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("shape mismatch in {context}: expected {expected}, got {found}")]
    ShapeMismatch {
        context: &'static str,
        expected: Shape,
        found: Shape,
    },

    #[error("available vector has {found} resource types, expected {expected}")]
    VectorLength { expected: usize, found: usize },

    #[error(
        "negative need for {process} resource {resource}: maximum {maximum} < allocation {allocation}"
    )]
    NegativeNeed {
        process: ProcessId,
        resource: usize,
        maximum: Units,
        allocation: Units,
    },
}

/// Matrix dimensions as processes × resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape(pub usize, pub usize);

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.1)
    }
}

impl BankerError {
    pub(crate) fn shape(context: &'static str, expected: (usize, usize), found: (usize, usize)) -> Self {
        Self::ShapeMismatch {
            context,
            expected: Shape(expected.0, expected.1),
            found: Shape(found.0, found.1),
        }
    }
}

pub type Result<T> = std::result::Result<T, BankerError>;
