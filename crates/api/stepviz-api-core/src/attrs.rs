//! Attribute addressing and per-element attribute storage.
//!
//! An `AttrKey` names one observable attribute of one structure: an element
//! value, a css property, a class flag, the structure label, or its position.
//! The animation engine builds effects out of (key, before, after) triples
//! and depends on nothing beyond this addressing scheme.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Address of one observable attribute. Element `index` spaces are defined
/// by each structure variant (e.g. Graph: nodes first, then edges).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "attr", rename_all = "snake_case")]
pub enum AttrKey {
    /// The stored value of one element.
    Value { index: usize },
    /// A css property of one element (e.g. "background-color").
    Css { index: usize, property: String },
    /// Presence of a css class on one element; value kind is Bool.
    Class { index: usize, name: String },
    /// Structure-level label text.
    Label,
    /// Structure-level position; value kind is Vec2.
    Position,
}

impl AttrKey {
    /// The element index this key addresses, if it is element-scoped.
    #[inline]
    pub fn element_index(&self) -> Option<usize> {
        match self {
            AttrKey::Value { index }
            | AttrKey::Css { index, .. }
            | AttrKey::Class { index, .. } => Some(*index),
            AttrKey::Label | AttrKey::Position => None,
        }
    }
}

/// Attribute storage for one element (array cell, list/tree/graph node,
/// matrix cell, or graph edge).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AttrStore {
    pub value: Value,
    #[serde(default)]
    pub css: HashMap<String, String>,
    #[serde(default)]
    pub classes: HashSet<String>,
}

impl AttrStore {
    pub fn with_value(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Read a css property; Null when unset.
    pub fn css(&self, property: &str) -> Value {
        self.css
            .get(property)
            .map(|v| Value::Text(v.clone()))
            .unwrap_or(Value::Null)
    }

    /// Write a css property, returning the previous value. A Null or empty
    /// write removes the property.
    pub fn set_css(&mut self, property: &str, value: &Value) -> Value {
        let before = self.css(property);
        match value {
            Value::Text(s) if !s.is_empty() => {
                self.css.insert(property.to_string(), s.clone());
            }
            _ => {
                self.css.remove(property);
            }
        }
        before
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    /// Toggle a class flag, returning the previous presence as a Bool value.
    pub fn set_class(&mut self, name: &str, present: bool) -> Value {
        let before = Value::Bool(self.classes.contains(name));
        if present {
            self.classes.insert(name.to_string());
        } else {
            self.classes.remove(name);
        }
        before
    }
}
