//! Reversible effect records.
//!
//! An effect is a small data record, not a closure: the target, the
//! operation, and the observed before/after values. Application and
//! inversion happen through the operation table (`ops.rs`), so effects stay
//! serializable and carry no hidden captured state.

use serde::{Deserialize, Serialize};
use stepviz_api_core::{AttrKey, StructureId, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Write one attribute: apply writes `after`, undo writes `before`.
    SetAttr { key: AttrKey },
    /// Exchange the values of two elements; self-inverse.
    Swap { a: usize, b: usize },
    /// Replace the session message buffer; `before`/`after` carry the text.
    ShowMessage,
}

/// One recorded, reversible state mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// Target structure; None for session-level operations (messages).
    pub target: Option<StructureId>,
    pub op: Operation,
    pub before: Value,
    pub after: Value,
}

impl Effect {
    pub fn set_attr(target: StructureId, key: AttrKey, before: Value, after: Value) -> Self {
        Self {
            target: Some(target),
            op: Operation::SetAttr { key },
            before,
            after,
        }
    }

    pub fn swap(target: StructureId, a: usize, b: usize) -> Self {
        Self {
            target: Some(target),
            op: Operation::Swap { a, b },
            before: Value::Null,
            after: Value::Null,
        }
    }

    pub fn message(before: Value, after: Value) -> Self {
        Self {
            target: None,
            op: Operation::ShowMessage,
            before,
            after,
        }
    }

    /// True when applying would not change observable state.
    pub fn is_noop(&self) -> bool {
        match self.op {
            Operation::Swap { a, b } => a == b,
            _ => self.before == self.after,
        }
    }
}
