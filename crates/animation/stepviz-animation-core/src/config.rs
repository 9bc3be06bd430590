//! Per-session configuration.
//!
//! One explicit config struct passed at engine construction; there is no
//! process-wide mutable default object.

use serde::{Deserialize, Serialize};

/// Slideshow behavior. `None` disables slideshow chrome on the host side;
/// the log/replay contract is unchanged.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    #[default]
    Normal,
    None,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    pub animation_mode: AnimationMode,
    /// When true, message-display effects invoke the narration hook.
    pub narration: bool,
    /// Host hint: recalculate layout bounds after each displayed step.
    pub autoresize: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            animation_mode: AnimationMode::Normal,
            narration: false,
            autoresize: true,
        }
    }
}
