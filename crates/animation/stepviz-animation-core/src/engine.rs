//! Engine: data ownership and the public timeline surface.
//!
//! One engine owns one session: the structure registry, the effect log, the
//! cursor, the pre-recording undo/redo stacks, and the recording state
//! machine. Recording and live display are the same act: an effect is
//! applied to the session state the moment it is pushed, and replay later
//! reconstructs any intermediate state from the log alone.

use stepviz_api_core::{AttrKey, StructureId, Value};
use stepviz_structures_core::StructureRegistry;

use crate::config::SessionConfig;
use crate::cursor::{StepSignal, TimelineCursor};
use crate::effect::Effect;
use crate::error::AnimationError;
use crate::events::{AnimationEvent, EventSink, Narrator};
use crate::log::{AnimInfo, EffectLog};
use crate::ops::OpTable;
use crate::recorder::{Recorder, RecordingState};
use crate::stacks::UndoRedoStacks;
use crate::state::SessionState;
use crate::Result;

pub struct AnimationEngine {
    config: SessionConfig,

    // Owned data
    state: SessionState,
    log: EffectLog,

    // Systems
    cursor: TimelineCursor,
    stacks: UndoRedoStacks,
    recorder: Recorder,
    table: OpTable,

    // Host hooks
    sink: Option<EventSink>,
    narrator: Option<Box<dyn Narrator>>,
}

impl std::fmt::Debug for AnimationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("log", &self.log)
            .field("cursor", &self.cursor)
            .field("recorder", &self.recorder)
            .finish_non_exhaustive()
    }
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl AnimationEngine {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::new(),
            log: EffectLog::new(),
            cursor: TimelineCursor::new(),
            stacks: UndoRedoStacks::new(),
            recorder: Recorder::new(),
            table: OpTable::new(),
            sink: None,
            narrator: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn recording_state(&self) -> RecordingState {
        self.recorder.state()
    }

    /// Read access to the owned structures.
    pub fn registry(&self) -> &StructureRegistry {
        &self.state.registry
    }

    /// Direct registry access for session setup (adding structures before
    /// recording starts). Attribute mutations made here bypass the log.
    pub fn registry_mut(&mut self) -> &mut StructureRegistry {
        &mut self.state.registry
    }

    /// The recorded timeline, read-only.
    pub fn log(&self) -> &EffectLog {
        &self.log
    }

    /// Current message buffer text, if any.
    pub fn message(&self) -> Option<&str> {
        self.state.message_text()
    }

    pub fn set_event_sink(&mut self, sink: EventSink) {
        self.sink = Some(sink);
    }

    pub fn set_narrator(&mut self, narrator: Box<dyn Narrator>) {
        self.narrator = Some(narrator);
    }

    fn emit(&mut self, event: AnimationEvent) {
        log::debug!("event: {event:?}");
        if let Some(sink) = self.sink.as_mut() {
            sink(&event);
        }
    }

    // ---- recording surface -------------------------------------------------

    /// Write one attribute, applying it live and pushing the reversible
    /// effect onto the undo stack. Returns the previous value.
    pub fn apply_attr(
        &mut self,
        target: StructureId,
        key: AttrKey,
        value: impl Into<Value>,
    ) -> Result<Value> {
        self.recorder.ensure_building("record")?;
        let value = value.into();
        let before = self
            .state
            .registry
            .get(target)
            .ok_or(AnimationError::StructureNotFound { id: target })?
            .get_attr(&key)?;
        let effect = Effect::set_attr(target, key, before.clone(), value);
        self.table.apply(&mut self.state, &effect)?;
        self.stacks.push(effect);
        Ok(before)
    }

    /// Exchange two element values, recorded as one self-inverse effect.
    pub fn swap(&mut self, target: StructureId, a: usize, b: usize) -> Result<()> {
        self.recorder.ensure_building("record")?;
        let effect = Effect::swap(target, a, b);
        self.table.apply(&mut self.state, &effect)?;
        self.stacks.push(effect);
        Ok(())
    }

    /// Display a message. When narration is enabled the narrator hook fires
    /// once, fire-and-forget.
    pub fn umsg(&mut self, text: &str) -> Result<()> {
        self.recorder.ensure_building("record")?;
        let effect = Effect::message(self.state.message.clone(), Value::Text(text.to_string()));
        self.table.apply(&mut self.state, &effect)?;
        self.stacks.push(effect);
        self.emit(AnimationEvent::MessageShown {
            text: text.to_string(),
        });
        if self.config.narration {
            if let Some(narrator) = self.narrator.as_ref() {
                narrator.narrate(text);
            }
            self.emit(AnimationEvent::NarrationRequested {
                text: text.to_string(),
            });
        }
        Ok(())
    }

    /// Clear the message buffer, as a recorded effect.
    pub fn clear_message(&mut self) -> Result<()> {
        self.recorder.ensure_building("record")?;
        let effect = Effect::message(self.state.message.clone(), Value::Null);
        self.table.apply(&mut self.state, &effect)?;
        self.stacks.push(effect);
        Ok(())
    }

    /// Interactive undo of the newest uncommitted effect.
    pub fn undo(&mut self) -> Result<bool> {
        self.recorder.ensure_building("undo")?;
        self.stacks.undo(&mut self.state, &self.table)
    }

    /// Interactive redo; a no-op after a divergent push.
    pub fn redo(&mut self) -> Result<bool> {
        self.recorder.ensure_building("redo")?;
        self.stacks.redo(&mut self.state, &self.table)
    }

    /// Clear the undo and/or redo stacks without replaying anything.
    pub fn clear_animation(&mut self, undo: bool, redo: bool) {
        self.stacks.clear(undo, redo);
    }

    /// Close the current step: commit pending effects as one atomic
    /// slideshow unit. Returns the new step's index.
    pub fn step(&mut self) -> Result<usize> {
        self.commit_step(false)
    }

    /// Close the current step and mark it for grading.
    pub fn gradeable_step(&mut self) -> Result<usize> {
        self.commit_step(true)
    }

    fn commit_step(&mut self, gradeable: bool) -> Result<usize> {
        self.recorder.ensure_building("step")?;
        let effects = self.stacks.drain();
        let count = effects.len();
        for effect in effects {
            self.log.record(effect);
        }
        let index = self.log.close_step(gradeable);
        // Live state already matches the log tail; no replay needed.
        self.cursor.set_position(self.log.total_steps());
        self.emit(AnimationEvent::StepRecorded {
            index,
            effects: count,
            gradeable,
        });
        Ok(index)
    }

    /// Mark everything applied so far as the initial display: pending
    /// effects fold into the baseline rather than a navigable step.
    pub fn display_init(&mut self) -> Result<()> {
        self.recorder.ensure_building("display_init")?;
        for effect in self.stacks.drain() {
            self.log.record(effect);
        }
        self.log.fold_into_initial();
        Ok(())
    }

    /// Finalize the timeline and rewind to the initial display. Idempotent;
    /// any recording call afterwards fails with an invalid-state error.
    pub fn recorded(&mut self) -> Result<()> {
        if self.recorder.is_recorded() {
            return Ok(());
        }
        if !self.stacks.is_empty() {
            self.commit_step(false)?;
        }
        self.recorder.finalize();
        self.cursor
            .begin(&self.log, &mut self.state, &self.table)?;
        let total = self.log.total_steps();
        self.emit(AnimationEvent::RecordingFinalized { total_steps: total });
        Ok(())
    }

    // ---- slideshow surface -------------------------------------------------

    pub fn forward(&mut self) -> Result<StepSignal> {
        self.recorder.ensure_recorded("forward")?;
        let from = self.cursor.current_step();
        let signal = self.cursor.forward(&self.log, &mut self.state, &self.table)?;
        if signal == StepSignal::Moved {
            self.emit(AnimationEvent::SteppedForward {
                from,
                to: from + 1,
            });
        }
        Ok(signal)
    }

    /// `forward` gated by a per-step predicate (conditional stepping).
    pub fn forward_if(&mut self, pred: impl FnOnce(usize) -> bool) -> Result<StepSignal> {
        self.recorder.ensure_recorded("forward")?;
        let from = self.cursor.current_step();
        let signal = self
            .cursor
            .forward_if(&self.log, &mut self.state, &self.table, pred)?;
        if signal == StepSignal::Moved {
            self.emit(AnimationEvent::SteppedForward {
                from,
                to: from + 1,
            });
        }
        Ok(signal)
    }

    pub fn backward(&mut self) -> Result<StepSignal> {
        self.recorder.ensure_recorded("backward")?;
        let from = self.cursor.current_step();
        let signal = self
            .cursor
            .backward(&self.log, &mut self.state, &self.table)?;
        if signal == StepSignal::Moved {
            self.emit(AnimationEvent::SteppedBackward {
                from,
                to: from - 1,
            });
        }
        Ok(signal)
    }

    pub fn backward_if(&mut self, pred: impl FnOnce(usize) -> bool) -> Result<StepSignal> {
        self.recorder.ensure_recorded("backward")?;
        let from = self.cursor.current_step();
        let signal = self
            .cursor
            .backward_if(&self.log, &mut self.state, &self.table, pred)?;
        if signal == StepSignal::Moved {
            self.emit(AnimationEvent::SteppedBackward {
                from,
                to: from - 1,
            });
        }
        Ok(signal)
    }

    pub fn jump_to_step(&mut self, step: usize) -> Result<()> {
        self.recorder.ensure_recorded("jump_to_step")?;
        self.cursor
            .jump_to_step(&self.log, &mut self.state, &self.table, step)
    }

    pub fn begin(&mut self) -> Result<()> {
        self.recorder.ensure_recorded("begin")?;
        self.cursor.begin(&self.log, &mut self.state, &self.table)
    }

    pub fn end(&mut self) -> Result<()> {
        self.recorder.ensure_recorded("end")?;
        self.cursor.end(&self.log, &mut self.state, &self.table)
    }

    pub fn current_step(&self) -> usize {
        self.cursor.current_step()
    }

    pub fn total_steps(&self) -> usize {
        self.log.total_steps()
    }

    pub fn anim_info(&self) -> AnimInfo {
        self.log.anim_info()
    }

    /// Forward a host event payload to the sink, stamped with the current
    /// step position.
    pub fn log_event(&mut self, data: serde_json::Value) {
        let step = self.cursor.current_step();
        self.emit(AnimationEvent::Custom { step, data });
    }

    /// Clear the whole timeline: log, stacks, cursor, message, and return to
    /// the Building state. Structures stay registered; the host re-seeds
    /// their attributes for the next recording.
    pub fn reset(&mut self) {
        self.log.clear();
        self.stacks.clear(true, true);
        self.cursor.set_position(0);
        self.recorder.reset();
        self.state.message = Value::Null;
        self.emit(AnimationEvent::TimelineCleared);
    }

    // ---- grading interventions --------------------------------------------

    /// Step indices that participate in grading.
    pub fn gradeable_steps(&self) -> Vec<usize> {
        self.log.gradeable_indices()
    }

    /// Remove a recorded step. The one mutation allowed after finalization;
    /// only the grading engine calls this, with the cursor at or before the
    /// removed step's boundary.
    pub fn truncate_step(&mut self, index: usize) -> Result<()> {
        self.recorder.ensure_recorded("truncate_step")?;
        if self.cursor.current_step() > index {
            return Err(AnimationError::invalid_state(
                "truncate_step",
                format!("cursor at {} past step {}", self.cursor.current_step(), index),
            ));
        }
        self.log.truncate_step(index)?;
        Ok(())
    }

    /// Replace a recorded step's effects and apply them (grading fix
    /// intervention). Requires the cursor to sit exactly at the step's
    /// entry boundary.
    pub fn overwrite_step(&mut self, index: usize, effects: Vec<Effect>) -> Result<()> {
        self.recorder.ensure_recorded("overwrite_step")?;
        if self.cursor.current_step() != index {
            return Err(AnimationError::invalid_state(
                "overwrite_step",
                format!("cursor at {} not at step {}", self.cursor.current_step(), index),
            ));
        }
        // Keep the step's grading flag: flagging it here would collapse the
        // all-steps fallback of unflagged timelines to just this step.
        let gradeable = self.log.step(index)?.gradeable;
        self.log
            .replace_step(index, crate::log::Step { effects, gradeable })?;
        self.cursor
            .forward(&self.log, &mut self.state, &self.table)?;
        Ok(())
    }
}
