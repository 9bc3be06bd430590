//! The grading engine.
//!
//! An exercise owns two finalized timelines: the student's interaction
//! trace and the model solution. Grading drives both cursors in lock-step
//! and compares the configured attributes at each gradeable step. Each
//! engine owns its registry and log exclusively; the exercise is the only
//! writer orchestrating the pair.

use stepviz_animation_core::{AnimationEngine, Effect};
use stepviz_structures_core::StructureRegistry;

use crate::error::ExerciseError;
use crate::options::{ExerciseOptions, FeedbackMode, FixMode, GraderKind};
use crate::score::Score;
use crate::snapshot::{capture, shapes_match, snapshots_match, CompareTarget, StructureSnapshot};
use crate::Result;

/// Builds a fresh, finalized model-solution engine.
pub type ModelBuilder = Box<dyn Fn() -> Result<AnimationEngine>>;

/// Re-initializes the student engine for a new attempt.
pub type ResetFn = Box<dyn FnMut() -> Result<AnimationEngine>>;

/// Injected fix strategy: given the student and model registries plus the
/// compare configuration, produce the effects that reconcile the student
/// state. Should be idempotent across repeated grading passes.
pub type FixFn =
    Box<dyn FnMut(&StructureRegistry, &StructureRegistry, &[CompareTarget]) -> Vec<Effect>>;

/// Default fix strategy: copy every divergent compared attribute from the
/// model registry onto the student's counterpart structure. Idempotent.
pub fn default_fix_effects(
    student: &StructureRegistry,
    model: &StructureRegistry,
    targets: &[CompareTarget],
) -> Vec<Effect> {
    let mut effects = Vec::new();
    for ((sid, s), (_, m)) in student.iter().zip(model.iter()) {
        let n = s.element_count().min(m.element_count());
        for index in 0..n {
            for target in targets {
                let key = match &target.kind {
                    crate::snapshot::CompareKind::Value => {
                        stepviz_api_core::AttrKey::Value { index }
                    }
                    crate::snapshot::CompareKind::Css { property } => {
                        stepviz_api_core::AttrKey::Css {
                            index,
                            property: property.clone(),
                        }
                    }
                    crate::snapshot::CompareKind::Class { name } => {
                        stepviz_api_core::AttrKey::Class {
                            index,
                            name: name.clone(),
                        }
                    }
                };
                let (Ok(before), Ok(after)) = (s.get_attr(&key), m.get_attr(&key)) else {
                    continue;
                };
                if !before.approx_eq(&after, target.eps) {
                    effects.push(Effect::set_attr(sid, key, before, after));
                }
            }
        }
    }
    effects
}

pub struct Exercise {
    student: AnimationEngine,
    model: AnimationEngine,
    model_builder: ModelBuilder,
    reset_student: ResetFn,
    options: ExerciseOptions,
    fix_fn: Option<FixFn>,
    score: Score,
    /// Set when the student recorded more gradeable steps than the model;
    /// trailing steps contribute zero to `correct`.
    more_steps_than_model: bool,
}

impl std::fmt::Debug for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exercise")
            .field("options", &self.options)
            .field("score", &self.score)
            .field("more_steps_than_model", &self.more_steps_than_model)
            .finish_non_exhaustive()
    }
}

impl Exercise {
    /// Build an exercise: the student engine as recorded so far, a model
    /// solution builder, and a reset builder for fresh attempts.
    pub fn new(
        student: AnimationEngine,
        model_builder: ModelBuilder,
        reset_student: ResetFn,
        options: ExerciseOptions,
    ) -> Result<Self> {
        let model = model_builder()?;
        Ok(Self {
            student,
            model,
            model_builder,
            reset_student,
            options,
            fix_fn: None,
            score: Score::default(),
            more_steps_than_model: false,
        })
    }

    /// Install a host fix strategy, replacing the attribute-copy default.
    pub fn set_fix_fn(&mut self, fix_fn: FixFn) {
        self.fix_fn = Some(fix_fn);
    }

    pub fn student(&self) -> &AnimationEngine {
        &self.student
    }

    pub fn student_mut(&mut self) -> &mut AnimationEngine {
        &mut self.student
    }

    pub fn model(&self) -> &AnimationEngine {
        &self.model
    }

    pub fn options(&self) -> &ExerciseOptions {
        &self.options
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn more_steps_than_model(&self) -> bool {
        self.more_steps_than_model
    }

    /// Grade the student timeline against the model. `continuous_override`
    /// forces continuous or final-state grading regardless of the
    /// configured feedback mode.
    pub fn grade(&mut self, continuous_override: Option<bool>) -> Result<Score> {
        self.student.recorded()?;
        self.model.recorded()?;
        self.check_shapes()?;

        self.score = Score::default();
        self.more_steps_than_model = false;

        // Both timelines fully replayed first, so terminal attribute sets
        // exist, then rewound for the walk.
        self.student.end()?;
        self.model.end()?;

        let continuous = continuous_override
            .unwrap_or(self.options.feedback == FeedbackMode::Continuous);
        if !continuous || self.options.grader == GraderKind::FinalStep {
            self.grade_final_state()?;
        } else {
            self.grade_step_by_step()?;
        }
        if self.options.debug {
            log::debug!("grade: {:?}", self.score);
        }
        Ok(self.score)
    }

    /// Coarse check: terminal snapshots only.
    fn grade_final_state(&mut self) -> Result<()> {
        let targets = self.options.compare.clone();
        let student_final = capture(self.student.registry(), &targets)?;
        let model_final = capture(self.model.registry(), &targets)?;
        let total = self.model.gradeable_steps().len();
        self.score.total = total;
        self.score.student = self.student.gradeable_steps().len();
        self.score.correct = if snapshots_match(&student_final, &model_final, &targets) {
            total
        } else {
            0
        };
        self.more_steps_than_model = self.score.student > total;
        Ok(())
    }

    /// Walk the model's gradeable steps, matching student steps in order
    /// and intervening per the configured fix mode.
    fn grade_step_by_step(&mut self) -> Result<()> {
        let targets = self.options.compare.clone();
        self.student.begin()?;
        self.model.begin()?;

        let model_steps = self.model.gradeable_steps();
        self.score.total = model_steps.len();
        let mut si = 0usize;

        for &mstep in &model_steps {
            self.model.jump_to_step(mstep + 1)?;

            // Recomputed each round: undo interventions shift indices down.
            let student_steps = self.student.gradeable_steps();
            let Some(&sstep) = student_steps.get(si) else {
                continue; // model step with no student counterpart
            };
            self.student.jump_to_step(sstep + 1)?;

            let student_snap = capture(self.student.registry(), &targets)?;
            let model_snap = capture(self.model.registry(), &targets)?;
            if snapshots_match(&student_snap, &model_snap, &targets) {
                self.score.correct += 1;
                si += 1;
                continue;
            }

            match self.options.fixmode {
                FixMode::Undo => {
                    log::warn!("step {sstep} incorrect: undoing");
                    self.student.jump_to_step(sstep)?;
                    self.student.truncate_step(sstep)?;
                    self.score.undo += 1;
                    // si stays: the next student step slides into this slot
                }
                FixMode::Fix => {
                    log::warn!("step {sstep} incorrect: fixing to model state");
                    self.student.jump_to_step(sstep)?;
                    let effects = match self.fix_fn.as_mut() {
                        Some(f) => f(self.student.registry(), self.model.registry(), &targets),
                        None => default_fix_effects(
                            self.student.registry(),
                            self.model.registry(),
                            &targets,
                        ),
                    };
                    self.student.overwrite_step(sstep, effects)?;
                    self.score.fix += 1;
                    si += 1;
                }
                FixMode::None => {
                    log::warn!("step {sstep} incorrect: left divergent");
                    si += 1;
                }
            }
        }

        let remaining = self.student.gradeable_steps().len();
        self.score.student = remaining;
        self.more_steps_than_model = si < remaining;
        Ok(())
    }

    /// Grading-setup validation: the two structure sets must agree in count,
    /// kind, and element count.
    fn check_shapes(&self) -> Result<()> {
        let targets = &self.options.compare;
        let student = capture(self.student.registry(), targets)?;
        let model = capture(self.model.registry(), targets)?;
        if !shapes_match(&student, &model) {
            let detail = format!(
                "student kinds {:?}, model kinds {:?}",
                student.iter().map(|s| s.kind).collect::<Vec<_>>(),
                model.iter().map(|s| s.kind).collect::<Vec<_>>()
            );
            return Err(ExerciseError::StructureSetMismatch {
                student: student.len(),
                model: model.len(),
                detail,
            });
        }
        Ok(())
    }

    /// Replay the model solution to its end and return its terminal
    /// compared-attribute snapshots for display.
    pub fn show_model_answer(&mut self) -> Result<Vec<StructureSnapshot>> {
        self.model.recorded()?;
        self.model.begin()?;
        self.model.end()?;
        Ok(capture(self.model.registry(), &self.options.compare)?)
    }

    /// Start a fresh attempt: rebuild both engines, clear the score.
    pub fn reset(&mut self) -> Result<()> {
        self.student = (self.reset_student)()?;
        self.model = (self.model_builder)()?;
        self.score = Score::default();
        self.more_steps_than_model = false;
        Ok(())
    }

    /// Manual intervention surface: revert and drop the student's newest
    /// gradeable step.
    pub fn undo_last_step(&mut self) -> Result<()> {
        self.student.recorded()?;
        let Some(&last) = self.student.gradeable_steps().last() else {
            return Ok(());
        };
        self.student.end()?;
        self.student.jump_to_step(last)?;
        self.student.truncate_step(last)?;
        Ok(())
    }

    /// Manual intervention surface: overwrite the student's newest gradeable
    /// step with effects reconciling it to the model's current state.
    pub fn fix_last_step(&mut self) -> Result<()> {
        self.student.recorded()?;
        let Some(&last) = self.student.gradeable_steps().last() else {
            return Ok(());
        };
        self.student.end()?;
        self.student.jump_to_step(last)?;
        let effects = match self.fix_fn.as_mut() {
            Some(f) => f(
                self.student.registry(),
                self.model.registry(),
                &self.options.compare,
            ),
            None => default_fix_effects(
                self.student.registry(),
                self.model.registry(),
                &self.options.compare,
            ),
        };
        self.student.overwrite_step(last, effects)?;
        Ok(())
    }
}
