//! Exercise configuration.

use serde::{Deserialize, Serialize};

use crate::snapshot::CompareTarget;

/// When feedback is given: after every gradeable step, or once at the end.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackMode {
    Continuous,
    #[default]
    AtEnd,
}

/// What continuous grading does with an incorrect student step.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixMode {
    /// Revert the incorrect step and mark it wrong.
    #[default]
    Undo,
    /// Overwrite student state to match the model and mark it wrong.
    Fix,
    /// Leave divergent, mark wrong.
    None,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraderKind {
    /// Step-by-step comparison of gradeable steps.
    #[default]
    Default,
    /// Compare terminal states only; coarser and cheaper.
    FinalStep,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExerciseOptions {
    /// Which attributes to compare, e.g. css background-color as a proxy
    /// for "highlighted".
    pub compare: Vec<CompareTarget>,
    #[serde(default)]
    pub feedback: FeedbackMode,
    #[serde(default)]
    pub fixmode: FixMode,
    #[serde(default)]
    pub grader: GraderKind,
    /// Log grading diagnostics for exercise developers.
    #[serde(default)]
    pub debug: bool,
}

impl ExerciseOptions {
    pub fn new(compare: Vec<CompareTarget>) -> Self {
        Self {
            compare,
            feedback: FeedbackMode::default(),
            fixmode: FixMode::default(),
            grader: GraderKind::default(),
            debug: false,
        }
    }

    pub fn with_feedback(mut self, feedback: FeedbackMode) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn with_fixmode(mut self, fixmode: FixMode) -> Self {
        self.fixmode = fixmode;
        self
    }

    pub fn with_grader(mut self, grader: GraderKind) -> Self {
        self.grader = grader;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_documented_surface() {
        let opts = ExerciseOptions::new(vec![CompareTarget::css("background-color")]);
        assert_eq!(opts.feedback, FeedbackMode::AtEnd);
        assert_eq!(opts.fixmode, FixMode::Undo);
        assert_eq!(opts.grader, GraderKind::Default);
    }
}
