//! Pre-recording undo/redo stacks.
//!
//! Free-form exploratory editing before a step boundary is closed: pushed
//! effects were already applied live by the engine; this component only
//! tracks reversibility. Branching history: any push after an undo clears
//! the redo stack.

use serde::{Deserialize, Serialize};

use crate::effect::Effect;
use crate::ops::OpTable;
use crate::state::SessionState;
use crate::Result;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UndoRedoStacks {
    undo: Vec<Effect>,
    redo: Vec<Effect>,
}

impl UndoRedoStacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track an already-applied effect. Invalidates redo history.
    pub fn push(&mut self, effect: Effect) {
        self.redo.clear();
        self.undo.push(effect);
    }

    /// Revert the newest effect. Returns false when there is nothing to undo.
    pub fn undo(&mut self, state: &mut SessionState, table: &OpTable) -> Result<bool> {
        match self.undo.pop() {
            Some(effect) => {
                table.invert(state, &effect)?;
                self.redo.push(effect);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-apply the newest undone effect. Returns false when the redo stack
    /// is empty (e.g. after a divergent push).
    pub fn redo(&mut self, state: &mut SessionState, table: &OpTable) -> Result<bool> {
        match self.redo.pop() {
            Some(effect) => {
                table.apply(state, &effect)?;
                self.undo.push(effect);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty() && self.redo.is_empty()
    }

    /// Take all pending effects in application order for committing into a
    /// step; clears both stacks.
    pub fn drain(&mut self) -> Vec<Effect> {
        self.redo.clear();
        std::mem::take(&mut self.undo)
    }

    /// Selective clearing without replay (host-facing `clear_animation`).
    pub fn clear(&mut self, undo: bool, redo: bool) {
        if undo {
            self.undo.clear();
        }
        if redo {
            self.redo.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepviz_api_core::{AttrKey, StructureId, Value};

    fn setup() -> (SessionState, OpTable, StructureId) {
        let mut state = SessionState::new();
        let id = state.registry.add_array(vec![Value::Int(0)]);
        (state, OpTable::new(), id)
    }

    fn set_value(
        state: &mut SessionState,
        table: &OpTable,
        id: StructureId,
        from: i64,
        to: i64,
    ) -> Effect {
        let e = Effect::set_attr(
            id,
            AttrKey::Value { index: 0 },
            Value::Int(from),
            Value::Int(to),
        );
        table.apply(state, &e).unwrap();
        e
    }

    fn read_value(state: &SessionState, id: StructureId) -> Value {
        state
            .registry
            .get(id)
            .unwrap()
            .get_attr(&AttrKey::Value { index: 0 })
            .unwrap()
    }

    #[test]
    fn undo_redo_round_trip() {
        let (mut state, table, id) = setup();
        let mut stacks = UndoRedoStacks::new();
        stacks.push(set_value(&mut state, &table, id, 0, 1));
        assert!(stacks.undo(&mut state, &table).unwrap());
        assert_eq!(read_value(&state, id), Value::Int(0));
        assert!(stacks.redo(&mut state, &table).unwrap());
        assert_eq!(read_value(&state, id), Value::Int(1));
    }

    #[test]
    fn push_after_undo_clears_redo() {
        // push(e1), push(e2), undo(), push(e3): redo must be a no-op
        let (mut state, table, id) = setup();
        let mut stacks = UndoRedoStacks::new();
        stacks.push(set_value(&mut state, &table, id, 0, 1));
        stacks.push(set_value(&mut state, &table, id, 1, 2));
        assert!(stacks.undo(&mut state, &table).unwrap());
        stacks.push(set_value(&mut state, &table, id, 1, 3));
        assert!(!stacks.redo(&mut state, &table).unwrap());
        assert_eq!(read_value(&state, id), Value::Int(3));
    }

    #[test]
    fn undo_on_empty_is_a_noop() {
        let (mut state, table, _) = setup();
        let mut stacks = UndoRedoStacks::new();
        assert!(!stacks.undo(&mut state, &table).unwrap());
    }

    #[test]
    fn drain_returns_effects_in_application_order() {
        let (mut state, table, id) = setup();
        let mut stacks = UndoRedoStacks::new();
        let e1 = set_value(&mut state, &table, id, 0, 1);
        let e2 = set_value(&mut state, &table, id, 1, 2);
        stacks.push(e1.clone());
        stacks.push(e2.clone());
        assert_eq!(stacks.drain(), vec![e1, e2]);
        assert!(stacks.is_empty());
    }
}
