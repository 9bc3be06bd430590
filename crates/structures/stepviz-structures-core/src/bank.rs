//! Shared attribute storage backing every structure variant.
//!
//! Each variant owns an `AttrBank`: a flat vector of element attribute
//! stores plus the structure-level label and position. Variants add topology
//! (list links, tree parents, graph edges) on top; all attribute traffic
//! funnels through here so get/set semantics stay identical across kinds.

use serde::{Deserialize, Serialize};
use stepviz_api_core::{AttrError, AttrKey, AttrStore, Bounds, StructureId, Value};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttrBank {
    pub id: StructureId,
    pub bounds: Bounds,
    pub label: Value,
    pub elements: Vec<AttrStore>,
}

impl AttrBank {
    pub fn new(id: StructureId, values: Vec<Value>) -> Self {
        Self {
            id,
            bounds: Bounds::default(),
            label: Value::Null,
            elements: values.into_iter().map(AttrStore::with_value).collect(),
        }
    }

    pub fn with_len(id: StructureId, len: usize) -> Self {
        Self::new(id, vec![Value::Null; len])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn element(&self, index: usize) -> Result<&AttrStore, AttrError> {
        self.elements.get(index).ok_or(AttrError::IndexOutOfRange {
            structure: self.id,
            index,
            len: self.elements.len(),
        })
    }

    fn element_mut(&mut self, index: usize) -> Result<&mut AttrStore, AttrError> {
        let len = self.elements.len();
        let id = self.id;
        self.elements
            .get_mut(index)
            .ok_or(AttrError::IndexOutOfRange {
                structure: id,
                index,
                len,
            })
    }

    pub fn get_attr(&self, key: &AttrKey) -> Result<Value, AttrError> {
        match key {
            AttrKey::Value { index } => Ok(self.element(*index)?.value.clone()),
            AttrKey::Css { index, property } => Ok(self.element(*index)?.css(property)),
            AttrKey::Class { index, name } => {
                Ok(Value::Bool(self.element(*index)?.has_class(name)))
            }
            AttrKey::Label => Ok(self.label.clone()),
            AttrKey::Position => Ok(Value::Vec2([self.bounds.x, self.bounds.y])),
        }
    }

    pub fn set_attr(&mut self, key: &AttrKey, value: &Value) -> Result<Value, AttrError> {
        match key {
            AttrKey::Value { index } => {
                let cell = self.element_mut(*index)?;
                Ok(std::mem::replace(&mut cell.value, value.clone()))
            }
            AttrKey::Css { index, property } => {
                Ok(self.element_mut(*index)?.set_css(property, value))
            }
            AttrKey::Class { index, name } => {
                let present = match value {
                    Value::Bool(b) => *b,
                    other => {
                        return Err(AttrError::InvalidValue {
                            key: key.clone(),
                            reason: format!("class flag must be Bool, got {:?}", other.kind()),
                        })
                    }
                };
                Ok(self.element_mut(*index)?.set_class(name, present))
            }
            AttrKey::Label => Ok(std::mem::replace(&mut self.label, value.clone())),
            AttrKey::Position => {
                let before = Value::Vec2([self.bounds.x, self.bounds.y]);
                match value {
                    Value::Vec2([x, y]) => {
                        self.bounds.x = *x;
                        self.bounds.y = *y;
                        Ok(before)
                    }
                    other => Err(AttrError::InvalidValue {
                        key: key.clone(),
                        reason: format!("position must be Vec2, got {:?}", other.kind()),
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_set_returns_previous() {
        let mut bank = AttrBank::new(StructureId(0), vec![Value::Int(5), Value::Int(7)]);
        let before = bank
            .set_attr(&AttrKey::Value { index: 0 }, &Value::Int(10))
            .unwrap();
        assert_eq!(before, Value::Int(5));
        assert_eq!(
            bank.get_attr(&AttrKey::Value { index: 0 }).unwrap(),
            Value::Int(10)
        );
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let bank = AttrBank::with_len(StructureId(1), 2);
        let err = bank.get_attr(&AttrKey::Value { index: 5 }).unwrap_err();
        assert!(matches!(err, AttrError::IndexOutOfRange { index: 5, len: 2, .. }));
    }

    #[test]
    fn class_flag_rejects_non_bool() {
        let mut bank = AttrBank::with_len(StructureId(2), 1);
        let key = AttrKey::Class {
            index: 0,
            name: "highlighted".into(),
        };
        assert!(bank.set_attr(&key, &Value::Int(1)).is_err());
    }
}
