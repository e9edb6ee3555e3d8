use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// Coarse classification of a failed remote call.
///
/// An empty history or a missing result is a state, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Transport failure, connection failure or non-success status.
    NetworkError,
    /// Success status with a body that does not have the expected shape.
    MalformedResponse,
}

impl Display for FailureKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match *self {
            Self::NetworkError => write!(f, "network error"),
            Self::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
