use stepviz_animation_core::AnimationEngine;
use stepviz_exercise_core::{
    CompareTarget, Exercise, ExerciseError, ExerciseOptions, FeedbackMode, FixMode, GraderKind,
    Score,
};
use stepviz_test_fixtures::{engine_with_array, highlight, recorded_highlight_run, HIGHLIGHT_PROPERTY};

fn setup_exercise(
    student_order: &'static [usize],
    model_order: &'static [usize],
    options: ExerciseOptions,
) -> Exercise {
    let student = recorded_highlight_run(&[3, 1, 2], student_order).unwrap();
    Exercise::new(
        student,
        Box::new(move || {
            recorded_highlight_run(&[3, 1, 2], model_order)
                .map_err(|e| ExerciseError::setup(e.to_string()))
        }),
        Box::new(move || {
            recorded_highlight_run(&[3, 1, 2], &[])
                .map_err(|e| ExerciseError::setup(e.to_string()))
        }),
        options,
    )
    .unwrap()
}

fn continuous_options() -> ExerciseOptions {
    ExerciseOptions::new(vec![CompareTarget::css(HIGHLIGHT_PROPERTY)])
        .with_feedback(FeedbackMode::Continuous)
}

/// it should score a fully matching run as all correct
#[test]
fn perfect_run_scores_full() {
    let mut ex = setup_exercise(&[0, 1, 2], &[0, 1, 2], continuous_options());
    let score = ex.grade(None).unwrap();
    assert_eq!(
        score,
        Score {
            total: 3,
            correct: 3,
            student: 3,
            undo: 0,
            fix: 0
        }
    );
}

/// it should undo the divergent third step in continuous mode with fixmode undo
#[test]
fn divergent_step_is_undone() {
    // Steps 0 and 1 match; the third step re-highlights cell 0 instead of
    // highlighting cell 2, so its snapshot diverges from the model's.
    let mut ex = setup_exercise(&[0, 1, 0], &[0, 1, 2], continuous_options());
    let score = ex.grade(None).unwrap();
    assert_eq!(
        score,
        Score {
            total: 3,
            correct: 2,
            student: 2,
            undo: 1,
            fix: 0
        }
    );
    assert!(!ex.more_steps_than_model());
}

/// it should overwrite the divergent step in fix mode and converge on regrade
#[test]
fn fix_mode_reconciles_and_is_idempotent() {
    let options = continuous_options().with_fixmode(FixMode::Fix);
    let mut ex = setup_exercise(&[0, 1, 0], &[0, 1, 2], options);
    let first = ex.grade(None).unwrap();
    assert_eq!(
        first,
        Score {
            total: 3,
            correct: 2,
            student: 3,
            undo: 0,
            fix: 1
        }
    );

    // The default fix strategy is idempotent: the fixed timeline now grades
    // clean.
    let second = ex.grade(None).unwrap();
    assert_eq!(
        second,
        Score {
            total: 3,
            correct: 3,
            student: 3,
            undo: 0,
            fix: 0
        }
    );
}

/// it should grade unflagged timelines the same way across fix interventions
#[test]
fn fix_mode_keeps_plain_step_timelines_whole() {
    // Recorded with plain step(), no grading flags: every step grades.
    fn plain_run(order: &[usize]) -> AnimationEngine {
        let (mut engine, id) = engine_with_array(&[3, 1, 2]);
        for &index in order {
            highlight(&mut engine, id, index).unwrap();
            engine.step().unwrap();
        }
        engine.recorded().unwrap();
        engine
    }

    let options = continuous_options().with_fixmode(FixMode::Fix);
    let mut ex = Exercise::new(
        plain_run(&[0, 1, 0]),
        Box::new(|| Ok(plain_run(&[0, 1, 2]))),
        Box::new(|| Ok(plain_run(&[]))),
        options,
    )
    .unwrap();

    // The fixed step must not shrink the student's gradeable set.
    let first = ex.grade(None).unwrap();
    assert_eq!(
        first,
        Score {
            total: 3,
            correct: 2,
            student: 3,
            undo: 0,
            fix: 1
        }
    );
    let second = ex.grade(None).unwrap();
    assert_eq!(
        second,
        Score {
            total: 3,
            correct: 3,
            student: 3,
            undo: 0,
            fix: 0
        }
    );
}

/// it should leave divergence in place with fixmode none
#[test]
fn none_mode_only_marks_wrong() {
    let options = continuous_options().with_fixmode(FixMode::None);
    let mut ex = setup_exercise(&[0, 1, 0], &[0, 1, 2], options);
    let score = ex.grade(None).unwrap();
    assert_eq!(
        score,
        Score {
            total: 3,
            correct: 2,
            student: 3,
            undo: 0,
            fix: 0
        }
    );
}

/// it should compare only terminal states in atend mode
#[test]
fn atend_compares_final_state_only() {
    let options = ExerciseOptions::new(vec![CompareTarget::css(HIGHLIGHT_PROPERTY)]);
    // Shorter student run: terminal states differ, coarse check scores zero.
    let mut ex = setup_exercise(&[0, 1], &[0, 1, 2], options.clone());
    let score = ex.grade(None).unwrap();
    assert_eq!(score.correct, 0);
    assert_eq!(score.total, 3);
    assert_eq!(score.student, 2);

    // Same terminal highlight set, different step order: atend accepts it.
    let mut ex = setup_exercise(&[2, 1, 0], &[0, 1, 2], options);
    let score = ex.grade(None).unwrap();
    assert_eq!(score.correct, 3);
}

/// it should honor the final-step grader even in continuous feedback
#[test]
fn final_step_grader_overrides_walk() {
    let options = continuous_options().with_grader(GraderKind::FinalStep);
    let mut ex = setup_exercise(&[2, 1, 0], &[0, 1, 2], options);
    let score = ex.grade(None).unwrap();
    assert_eq!(score.correct, 3);
    assert_eq!(score.undo, 0);
}

/// it should fail grading setup when structure shapes differ
#[test]
fn shape_mismatch_is_surfaced() {
    let student = recorded_highlight_run(&[3, 1], &[0]).unwrap();
    let mut ex = Exercise::new(
        student,
        Box::new(|| {
            recorded_highlight_run(&[3, 1, 2], &[0])
                .map_err(|e| ExerciseError::setup(e.to_string()))
        }),
        Box::new(|| {
            recorded_highlight_run(&[3, 1], &[]).map_err(|e| ExerciseError::setup(e.to_string()))
        }),
        ExerciseOptions::new(vec![CompareTarget::css(HIGHLIGHT_PROPERTY)]),
    )
    .unwrap();
    let err = ex.grade(Some(true)).unwrap_err();
    assert!(matches!(err, ExerciseError::StructureSetMismatch { .. }));
}

/// it should count trailing student steps as unmatched, not correct
#[test]
fn extra_student_steps_contribute_zero() {
    let mut ex = setup_exercise(&[0, 1, 2, 0], &[0, 1, 2], continuous_options());
    let score = ex.grade(None).unwrap();
    assert_eq!(score.correct, 3);
    assert_eq!(score.student, 4);
    assert!(ex.more_steps_than_model());
}

/// it should expose the model's terminal snapshots through show_model_answer
#[test]
fn show_model_answer_replays_to_end() {
    let mut ex = setup_exercise(&[0], &[0, 1, 2], continuous_options());
    let snaps = ex.show_model_answer().unwrap();
    assert_eq!(snaps.len(), 1);
    let highlighted = snaps[0]
        .elements
        .iter()
        .filter(|row| !row[0].is_null())
        .count();
    assert_eq!(highlighted, 3);
}

/// it should clear the score and rebuild both engines on reset
#[test]
fn reset_starts_a_fresh_attempt() {
    let mut ex = setup_exercise(&[0, 1, 2], &[0, 1, 2], continuous_options());
    ex.grade(None).unwrap();
    assert_eq!(ex.score().correct, 3);
    ex.reset().unwrap();
    assert_eq!(*ex.score(), Score::default());
    assert_eq!(ex.student().total_steps(), 0);
}

/// it should drop the newest gradeable step through the manual undo surface
#[test]
fn manual_undo_removes_last_step() {
    let mut ex = setup_exercise(&[0, 1], &[0, 1, 2], continuous_options());
    ex.undo_last_step().unwrap();
    assert_eq!(ex.student().total_steps(), 1);
    ex.undo_last_step().unwrap();
    assert_eq!(ex.student().total_steps(), 0);
    // Nothing left: a further undo is a no-op
    ex.undo_last_step().unwrap();
}
