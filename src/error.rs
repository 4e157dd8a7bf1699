//! Rejection type returned by the validation pipeline.

use thiserror::Error;

use crate::models::{Violation, ViolationKind};
use crate::validation::ShapeError;

/// Why a candidate entry was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The entry itself is malformed; no constraint check ran.
    #[error("malformed schedule entry: {}", join_messages(.0))]
    Malformed(Vec<ShapeError>),

    /// The first constraint check that failed.
    #[error("{0}")]
    Violation(Violation),
}

fn join_messages(errors: &[ShapeError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl Rejection {
    /// Returns true if the entry failed shape validation.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Rejection::Malformed(_))
    }

    /// The constraint violation, if this is one.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Rejection::Violation(v) => Some(v),
            Rejection::Malformed(_) => None,
        }
    }

    /// The violation kind, if this is a constraint violation.
    pub fn kind(&self) -> Option<ViolationKind> {
        self.violation().map(|v| v.kind)
    }
}

impl From<Violation> for Rejection {
    fn from(v: Violation) -> Self {
        Rejection::Violation(v)
    }
}
