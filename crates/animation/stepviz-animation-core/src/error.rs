//! Error types for the animation engine

use serde::{Deserialize, Serialize};
use stepviz_api_core::{AttrError, StructureId};

/// Errors surfaced by timeline recording and replay.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// Operation not valid in the current recording state
    #[error("Invalid state for {operation}: timeline is {state}")]
    InvalidState { operation: String, state: String },

    /// Step index outside [0, total]
    #[error("Step {step} out of range (total steps: {total})")]
    StepOutOfRange { step: usize, total: usize },

    /// Effect refers to a structure the registry does not hold
    #[error("Structure not found: {id:?}")]
    StructureNotFound { id: StructureId },

    /// Attribute-level failure while applying or undoing an effect
    #[error("Attribute error: {0}")]
    Attr(#[from] AttrError),

    /// Serialization error (event payloads, exported timelines)
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl AnimationError {
    pub fn invalid_state(operation: &str, state: impl std::fmt::Display) -> Self {
        Self::InvalidState {
            operation: operation.to_string(),
            state: state.to_string(),
        }
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidState { .. } => "state",
            Self::StepOutOfRange { .. } => "range",
            Self::StructureNotFound { .. } | Self::Attr(_) => "structure",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
