//! Discrete semantic signals emitted by the engine.
//!
//! The host installs an `EventSink` to observe them (logging student
//! actions, driving UI chrome); the engine never waits on the sink. The
//! narration hook is likewise fire-and-forget.

use serde::{Deserialize, Serialize};

/// Discrete semantic signals emitted during recording and navigation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationEvent {
    StepRecorded {
        index: usize,
        effects: usize,
        gradeable: bool,
    },
    RecordingFinalized {
        total_steps: usize,
    },
    SteppedForward {
        from: usize,
        to: usize,
    },
    SteppedBackward {
        from: usize,
        to: usize,
    },
    MessageShown {
        text: String,
    },
    NarrationRequested {
        text: String,
    },
    TimelineCleared,
    /// Host-supplied payload via `log_event`, stamped with the current step.
    Custom {
        step: usize,
        data: serde_json::Value,
    },
}

/// Callback installed by the host; invoked synchronously, must not block.
pub type EventSink = Box<dyn FnMut(&AnimationEvent)>;

/// Optional narration side effect for message-display effects.
/// Fire-and-forget: the engine does not wait for speech to finish.
pub trait Narrator {
    fn narrate(&self, text: &str);
}
