//! The effect log: one timeline's append-only substrate.
//!
//! The log holds a baseline (effects folded in by `display_init`) plus the
//! ordered step sequence. Step numbering is dense, 0..N-1, in creation
//! order. Effects within a step replay in recorded order forward and in
//! reverse recorded order when undoing; the log itself never applies
//! anything.

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::error::AnimationError;
use crate::Result;

/// A maximal contiguous run of effects replayed atomically as one
/// slideshow unit. Empty steps are valid synchronization points.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub effects: Vec<Effect>,
    /// Marked by `gradeable_step()`; grading walks these when any exist.
    #[serde(default)]
    pub gradeable: bool,
}

/// Summary counts, useful when tuning slideshow complexity.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AnimInfo {
    pub steps: usize,
    pub effects: usize,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EffectLog {
    /// Baseline effects: part of the initial display, not navigable.
    initial: Vec<Effect>,
    steps: Vec<Step>,
    /// Effects recorded since the last step boundary.
    open: Vec<Effect>,
    /// True once any step was flagged gradeable, even if interventions later
    /// removed every flagged step.
    #[serde(default)]
    had_flags: bool,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reversible effect to the currently open step.
    pub fn record(&mut self, effect: Effect) {
        self.open.push(effect);
    }

    /// Seal the open step (empty is fine) and open a new one, returning the
    /// sealed step's index.
    pub fn close_step(&mut self, gradeable: bool) -> usize {
        let step = Step {
            effects: std::mem::take(&mut self.open),
            gradeable,
        };
        self.had_flags |= gradeable;
        log::debug!(
            "closed step {} ({} effects, gradeable={})",
            self.steps.len(),
            step.effects.len(),
            gradeable
        );
        self.steps.push(step);
        self.steps.len() - 1
    }

    /// Fold the open effects into the baseline (initial display).
    pub fn fold_into_initial(&mut self) {
        self.initial.append(&mut self.open);
    }

    pub fn initial_effects(&self) -> &[Effect] {
        &self.initial
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn has_open_effects(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn step(&self, index: usize) -> Result<&Step> {
        self.steps
            .get(index)
            .ok_or(AnimationError::StepOutOfRange {
                step: index,
                total: self.steps.len(),
            })
    }

    /// Ordered effects of one step, for replay.
    pub fn effects_in_step(&self, index: usize) -> Result<&[Effect]> {
        Ok(self.step(index)?.effects.as_slice())
    }

    /// Step indices that participate in grading: every step when the
    /// timeline was never flagged, otherwise the currently flagged ones
    /// (possibly none, after interventions removed them all).
    pub fn gradeable_indices(&self) -> Vec<usize> {
        if !self.had_flags {
            return (0..self.steps.len()).collect();
        }
        self.steps
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.gradeable.then_some(i))
            .collect()
    }

    pub fn anim_info(&self) -> AnimInfo {
        AnimInfo {
            steps: self.steps.len(),
            effects: self.initial.len()
                + self.open.len()
                + self.steps.iter().map(|s| s.effects.len()).sum::<usize>(),
        }
    }

    /// Remove one step, shifting later indices down. Grading interventions
    /// are the only caller; ordinary timelines never shrink.
    pub fn truncate_step(&mut self, index: usize) -> Result<Step> {
        if index >= self.steps.len() {
            return Err(AnimationError::StepOutOfRange {
                step: index,
                total: self.steps.len(),
            });
        }
        log::warn!("truncating step {index} (grading intervention)");
        Ok(self.steps.remove(index))
    }

    /// Replace one step's effects in place (grading fix intervention).
    pub fn replace_step(&mut self, index: usize, step: Step) -> Result<Step> {
        if index >= self.steps.len() {
            return Err(AnimationError::StepOutOfRange {
                step: index,
                total: self.steps.len(),
            });
        }
        log::warn!("replacing step {index} (grading intervention)");
        self.had_flags |= step.gradeable;
        Ok(std::mem::replace(&mut self.steps[index], step))
    }

    /// Drop everything: baseline, steps, and open effects.
    pub fn clear(&mut self) {
        self.initial.clear();
        self.steps.clear();
        self.open.clear();
        self.had_flags = false;
    }
}
