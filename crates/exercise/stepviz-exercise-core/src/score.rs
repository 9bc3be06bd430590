//! The grading score record.

use serde::{Deserialize, Serialize};

/// Produced per grading run, not persisted across runs.
///
/// `total` is the number of gradeable steps in the model solution,
/// `student` the number in the student solution after interventions,
/// `correct` the matching steps, and `undo`/`fix` the intervention counts
/// from continuous-feedback grading.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub total: usize,
    pub correct: usize,
    pub student: usize,
    pub undo: usize,
    pub fix: usize,
}

impl Score {
    /// Fraction of model steps matched, in [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}
