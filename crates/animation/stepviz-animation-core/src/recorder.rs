//! Recording-phase state machine.
//!
//! Building -> Recorded is one-way: once a timeline is finalized no further
//! steps may be appended, only cursor navigation. Finalization is
//! idempotent.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::Result;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingState {
    #[default]
    Building,
    Recorded,
}

impl std::fmt::Display for RecordingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordingState::Building => write!(f, "building"),
            RecordingState::Recorded => write!(f, "recorded"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Recorder {
    state: RecordingState,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> RecordingState {
        self.state
    }

    #[inline]
    pub fn is_recorded(&self) -> bool {
        self.state == RecordingState::Recorded
    }

    /// Guard for operations that append to the timeline.
    pub fn ensure_building(&self, operation: &str) -> Result<()> {
        match self.state {
            RecordingState::Building => Ok(()),
            RecordingState::Recorded => {
                Err(AnimationError::invalid_state(operation, self.state))
            }
        }
    }

    /// Guard for cursor navigation, which needs a finalized timeline.
    pub fn ensure_recorded(&self, operation: &str) -> Result<()> {
        match self.state {
            RecordingState::Recorded => Ok(()),
            RecordingState::Building => {
                Err(AnimationError::invalid_state(operation, self.state))
            }
        }
    }

    /// Transition to Recorded. Returns true on the first call, false on
    /// repeats (idempotent).
    pub fn finalize(&mut self) -> bool {
        match self.state {
            RecordingState::Building => {
                self.state = RecordingState::Recorded;
                true
            }
            RecordingState::Recorded => false,
        }
    }

    /// Back to Building; only the full-session reset uses this.
    pub fn reset(&mut self) {
        self.state = RecordingState::Building;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_is_idempotent() {
        let mut rec = Recorder::new();
        assert!(rec.finalize());
        assert!(!rec.finalize());
        assert!(rec.is_recorded());
    }

    #[test]
    fn building_guard_fires_after_finalize() {
        let mut rec = Recorder::new();
        assert!(rec.ensure_building("record").is_ok());
        rec.finalize();
        let err = rec.ensure_building("record").unwrap_err();
        assert!(matches!(err, AnimationError::InvalidState { .. }));
    }
}
