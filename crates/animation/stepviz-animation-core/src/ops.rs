//! Operation dispatch table.
//!
//! A pure function table keyed by operation kind. Every replay path (live
//! application, undo/redo, cursor stepping, grading interventions) goes
//! through the same two entry points, so forward and backward replay cannot
//! diverge.

use stepviz_api_core::AttrKey;

use crate::effect::{Effect, Operation};
use crate::error::AnimationError;
use crate::state::SessionState;
use crate::Result;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Apply,
    Invert,
}

type OpFn = fn(&mut SessionState, &Effect, Direction) -> Result<()>;

/// Dispatch table mapping operation kinds to their handler functions.
#[derive(Clone)]
pub struct OpTable {
    set_attr: OpFn,
    swap: OpFn,
    show_message: OpFn,
}

impl std::fmt::Debug for OpTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpTable").finish_non_exhaustive()
    }
}

impl Default for OpTable {
    fn default() -> Self {
        Self {
            set_attr: op_set_attr,
            swap: op_swap,
            show_message: op_show_message,
        }
    }
}

impl OpTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an effect (write `after`).
    #[inline]
    pub fn apply(&self, state: &mut SessionState, effect: &Effect) -> Result<()> {
        self.dispatch(state, effect, Direction::Apply)
    }

    /// Invert an effect (restore `before`).
    #[inline]
    pub fn invert(&self, state: &mut SessionState, effect: &Effect) -> Result<()> {
        self.dispatch(state, effect, Direction::Invert)
    }

    fn dispatch(&self, state: &mut SessionState, effect: &Effect, dir: Direction) -> Result<()> {
        log::trace!("{dir:?} {:?}", effect.op);
        let f = match effect.op {
            Operation::SetAttr { .. } => self.set_attr,
            Operation::Swap { .. } => self.swap,
            Operation::ShowMessage => self.show_message,
        };
        f(state, effect, dir)
    }
}

fn require_target(effect: &Effect) -> Result<stepviz_api_core::StructureId> {
    effect.target.ok_or_else(|| AnimationError::Serialization {
        reason: format!("effect {:?} has no target structure", effect.op),
    })
}

fn op_set_attr(state: &mut SessionState, effect: &Effect, dir: Direction) -> Result<()> {
    let id = require_target(effect)?;
    let key = match &effect.op {
        Operation::SetAttr { key } => key,
        _ => unreachable!("dispatched on op kind"),
    };
    let value = match dir {
        Direction::Apply => &effect.after,
        Direction::Invert => &effect.before,
    };
    let structure = state
        .registry
        .get_mut(id)
        .ok_or(AnimationError::StructureNotFound { id })?;
    structure.set_attr(key, value)?;
    Ok(())
}

fn op_swap(state: &mut SessionState, effect: &Effect, _dir: Direction) -> Result<()> {
    // Self-inverse: both directions exchange the two element values.
    let id = require_target(effect)?;
    let (a, b) = match effect.op {
        Operation::Swap { a, b } => (a, b),
        _ => unreachable!("dispatched on op kind"),
    };
    let structure = state
        .registry
        .get_mut(id)
        .ok_or(AnimationError::StructureNotFound { id })?;
    let va = structure.get_attr(&AttrKey::Value { index: a })?;
    let vb = structure.get_attr(&AttrKey::Value { index: b })?;
    structure.set_attr(&AttrKey::Value { index: a }, &vb)?;
    structure.set_attr(&AttrKey::Value { index: b }, &va)?;
    Ok(())
}

fn op_show_message(state: &mut SessionState, effect: &Effect, dir: Direction) -> Result<()> {
    state.message = match dir {
        Direction::Apply => effect.after.clone(),
        Direction::Invert => effect.before.clone(),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepviz_api_core::{StructureId, Value};

    fn state_with_array(values: &[i64]) -> (SessionState, StructureId) {
        let mut state = SessionState::new();
        let id = state
            .registry
            .add_array(values.iter().copied().map(Value::Int).collect());
        (state, id)
    }

    #[test]
    fn apply_then_invert_is_a_noop() {
        let (mut state, id) = state_with_array(&[5]);
        let table = OpTable::new();
        let e = Effect::set_attr(
            id,
            AttrKey::Value { index: 0 },
            Value::Int(5),
            Value::Int(10),
        );
        table.apply(&mut state, &e).unwrap();
        assert_eq!(
            state
                .registry
                .get(id)
                .unwrap()
                .get_attr(&AttrKey::Value { index: 0 })
                .unwrap(),
            Value::Int(10)
        );
        table.invert(&mut state, &e).unwrap();
        assert_eq!(
            state
                .registry
                .get(id)
                .unwrap()
                .get_attr(&AttrKey::Value { index: 0 })
                .unwrap(),
            Value::Int(5)
        );
    }

    #[test]
    fn swap_is_self_inverse() {
        let (mut state, id) = state_with_array(&[1, 2]);
        let table = OpTable::new();
        let e = Effect::swap(id, 0, 1);
        table.apply(&mut state, &e).unwrap();
        let v0 = state
            .registry
            .get(id)
            .unwrap()
            .get_attr(&AttrKey::Value { index: 0 })
            .unwrap();
        assert_eq!(v0, Value::Int(2));
        table.invert(&mut state, &e).unwrap();
        let v0 = state
            .registry
            .get(id)
            .unwrap()
            .get_attr(&AttrKey::Value { index: 0 })
            .unwrap();
        assert_eq!(v0, Value::Int(1));
    }

    #[test]
    fn missing_structure_is_an_error() {
        let mut state = SessionState::new();
        let table = OpTable::new();
        let e = Effect::set_attr(
            StructureId(9),
            AttrKey::Value { index: 0 },
            Value::Null,
            Value::Int(1),
        );
        let err = table.apply(&mut state, &e).unwrap_err();
        assert!(matches!(err, AnimationError::StructureNotFound { .. }));
    }

    #[test]
    fn message_effect_replaces_the_buffer() {
        let mut state = SessionState::new();
        let table = OpTable::new();
        let e = Effect::message(Value::Null, Value::Text("comparing".into()));
        table.apply(&mut state, &e).unwrap();
        assert_eq!(state.message_text(), Some("comparing"));
        table.invert(&mut state, &e).unwrap();
        assert_eq!(state.message_text(), None);
    }
}
