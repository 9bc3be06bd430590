//! stepviz-exercise-core: exercise grading.
//!
//! Replays two independently recorded timelines (student, model) in
//! lock-step, compares designated structure attributes at each gradeable
//! step, and produces a score. The exercise is the sole orchestrator of its
//! two engines; each engine keeps exclusive ownership of its own registry
//! and effect log.

pub mod error;
pub mod exercise;
pub mod options;
pub mod score;
pub mod snapshot;

pub use error::ExerciseError;
pub use exercise::{default_fix_effects, Exercise, FixFn, ModelBuilder, ResetFn};
pub use options::{ExerciseOptions, FeedbackMode, FixMode, GraderKind};
pub use score::Score;
pub use snapshot::{capture, shapes_match, snapshots_match, CompareKind, CompareTarget, StructureSnapshot};

/// Exercise result type
pub type Result<T> = core::result::Result<T, ExerciseError>;
