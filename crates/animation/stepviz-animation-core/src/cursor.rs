//! Timeline cursor: a position within the recorded step sequence.
//!
//! `current` is always in `[0, total_steps]`: position k means steps
//! `0..k` are applied. Every operation is atomic with respect to step
//! boundaries; a replay failure mid-step rolls the partial step back before
//! propagating, so the cursor never points mid-step.

use serde::{Deserialize, Serialize};

use crate::log::EffectLog;
use crate::ops::OpTable;
use crate::state::SessionState;
use crate::AnimationError;
use crate::Result;

/// Outcome of a cursor movement.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum StepSignal {
    /// The cursor crossed one step boundary.
    Moved,
    /// `backward` at position 0.
    AtStart,
    /// `forward` at position `total_steps`.
    AtEnd,
    /// A supplied predicate declined the move.
    Blocked,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TimelineCursor {
    current: usize,
}

impl TimelineCursor {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn current_step(&self) -> usize {
        self.current
    }

    /// Force the position without replay; used while recording, where the
    /// live state already matches the log tail.
    pub(crate) fn set_position(&mut self, position: usize) {
        self.current = position;
    }

    /// Apply all effects of step `current` in order, then advance.
    pub fn forward(
        &mut self,
        log: &EffectLog,
        state: &mut SessionState,
        table: &OpTable,
    ) -> Result<StepSignal> {
        if self.current >= log.total_steps() {
            return Ok(StepSignal::AtEnd);
        }
        self.apply_step(log, state, table, self.current)?;
        self.current += 1;
        Ok(StepSignal::Moved)
    }

    /// `forward`, gated by a per-step predicate. The predicate sees the index
    /// of the step about to be applied; returning false blocks the move.
    pub fn forward_if(
        &mut self,
        log: &EffectLog,
        state: &mut SessionState,
        table: &OpTable,
        pred: impl FnOnce(usize) -> bool,
    ) -> Result<StepSignal> {
        if self.current >= log.total_steps() {
            return Ok(StepSignal::AtEnd);
        }
        if !pred(self.current) {
            return Ok(StepSignal::Blocked);
        }
        self.forward(log, state, table)
    }

    /// Decrement, then apply undo operations of the step just left in
    /// reverse recorded order.
    pub fn backward(
        &mut self,
        log: &EffectLog,
        state: &mut SessionState,
        table: &OpTable,
    ) -> Result<StepSignal> {
        if self.current == 0 {
            return Ok(StepSignal::AtStart);
        }
        let target = self.current - 1;
        self.invert_step(log, state, table, target)?;
        self.current = target;
        Ok(StepSignal::Moved)
    }

    /// `backward`, gated by a per-step predicate over the step being left.
    pub fn backward_if(
        &mut self,
        log: &EffectLog,
        state: &mut SessionState,
        table: &OpTable,
        pred: impl FnOnce(usize) -> bool,
    ) -> Result<StepSignal> {
        if self.current == 0 {
            return Ok(StepSignal::AtStart);
        }
        if !pred(self.current - 1) {
            return Ok(StepSignal::Blocked);
        }
        self.backward(log, state, table)
    }

    /// Replay until `current == step`. Fails with a range error, leaving the
    /// position untouched, when `step` is outside `[0, total_steps]`.
    pub fn jump_to_step(
        &mut self,
        log: &EffectLog,
        state: &mut SessionState,
        table: &OpTable,
        step: usize,
    ) -> Result<()> {
        if step > log.total_steps() {
            return Err(AnimationError::StepOutOfRange {
                step,
                total: log.total_steps(),
            });
        }
        while self.current < step {
            self.forward(log, state, table)?;
        }
        while self.current > step {
            self.backward(log, state, table)?;
        }
        Ok(())
    }

    pub fn begin(
        &mut self,
        log: &EffectLog,
        state: &mut SessionState,
        table: &OpTable,
    ) -> Result<()> {
        self.jump_to_step(log, state, table, 0)
    }

    pub fn end(
        &mut self,
        log: &EffectLog,
        state: &mut SessionState,
        table: &OpTable,
    ) -> Result<()> {
        self.jump_to_step(log, state, table, log.total_steps())
    }

    /// Apply one full step; on failure, roll back the effects already
    /// applied so the state stays at the entry boundary.
    fn apply_step(
        &self,
        log: &EffectLog,
        state: &mut SessionState,
        table: &OpTable,
        index: usize,
    ) -> Result<()> {
        let effects = log.effects_in_step(index)?;
        for (i, effect) in effects.iter().enumerate() {
            if let Err(err) = table.apply(state, effect) {
                for done in effects[..i].iter().rev() {
                    let _ = table.invert(state, done);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Invert one full step in reverse recorded order; on failure, re-apply
    /// the effects already inverted.
    fn invert_step(
        &self,
        log: &EffectLog,
        state: &mut SessionState,
        table: &OpTable,
        index: usize,
    ) -> Result<()> {
        let effects = log.effects_in_step(index)?;
        for (i, effect) in effects.iter().rev().enumerate() {
            if let Err(err) = table.invert(state, effect) {
                let n = effects.len();
                for done in effects[n - i..].iter() {
                    let _ = table.apply(state, done);
                }
                return Err(err);
            }
        }
        Ok(())
    }
}
