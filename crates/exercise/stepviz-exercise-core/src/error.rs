//! Error types for exercise grading

use serde::{Deserialize, Serialize};
use stepviz_animation_core::AnimationError;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ExerciseError {
    /// Student and model structure sets differ in count or kind; grading
    /// setup error surfaced to the host, never silently ignored.
    #[error("Structure set mismatch: student has {student} comparable structures, model has {model} ({detail})")]
    StructureSetMismatch {
        student: usize,
        model: usize,
        detail: String,
    },

    /// Replay failure in one of the driven timelines
    #[error("Animation error during grading: {0}")]
    Animation(#[from] AnimationError),

    /// Exercise construction failure (model solution or reset builder)
    #[error("Exercise setup error: {reason}")]
    Setup { reason: String },
}

impl ExerciseError {
    pub fn setup(reason: impl Into<String>) -> Self {
        Self::Setup {
            reason: reason.into(),
        }
    }

    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::StructureSetMismatch { .. } => "mismatch",
            Self::Animation(err) => err.category(),
            Self::Setup { .. } => "setup",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let mismatch = ExerciseError::StructureSetMismatch {
            student: 1,
            model: 2,
            detail: "count".into(),
        };
        assert_eq!(mismatch.category(), "mismatch");

        let wrapped = ExerciseError::Animation(AnimationError::StepOutOfRange { step: 4, total: 2 });
        assert_eq!(wrapped.category(), "range");
    }
}
