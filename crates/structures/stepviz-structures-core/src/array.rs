//! Horizontal array of value cells, the workhorse structure of most
//! visualizations and exercises.

use serde::{Deserialize, Serialize};
use stepviz_api_core::{
    AttrError, AttrKey, Bounds, StructureId, StructureKind, Value, VisualStructure,
};

use crate::bank::AttrBank;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VisualArray {
    bank: AttrBank,
}

impl VisualArray {
    pub fn new(id: StructureId, values: Vec<Value>) -> Self {
        Self {
            bank: AttrBank::new(id, values),
        }
    }

    pub fn from_ints(id: StructureId, values: &[i64]) -> Self {
        Self::new(id, values.iter().copied().map(Value::Int).collect())
    }

    pub fn len(&self) -> usize {
        self.bank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }

    /// Current cell values in index order.
    pub fn values(&self) -> Vec<Value> {
        self.bank.elements.iter().map(|c| c.value.clone()).collect()
    }
}

impl VisualStructure for VisualArray {
    fn id(&self) -> StructureId {
        self.bank.id
    }

    fn kind(&self) -> StructureKind {
        StructureKind::Array
    }

    fn bounds(&self) -> Bounds {
        self.bank.bounds
    }

    fn element_count(&self) -> usize {
        self.bank.len()
    }

    fn get_attr(&self, key: &AttrKey) -> Result<Value, AttrError> {
        self.bank.get_attr(key)
    }

    fn set_attr(&mut self, key: &AttrKey, value: &Value) -> Result<Value, AttrError> {
        self.bank.set_attr(key, value)
    }

    fn clone_box(&self) -> Box<dyn VisualStructure> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepviz_api_core::structure::ClassOps;

    #[test]
    fn values_track_attr_writes() {
        let mut arr = VisualArray::from_ints(StructureId(0), &[3, 1, 2]);
        arr.set_attr(&AttrKey::Value { index: 1 }, &Value::Int(9))
            .unwrap();
        assert_eq!(
            arr.values(),
            vec![Value::Int(3), Value::Int(9), Value::Int(2)]
        );
    }

    #[test]
    fn class_ops_round_trip() {
        let mut arr = VisualArray::from_ints(StructureId(0), &[1]);
        arr.add_class(0, "highlighted").unwrap();
        assert!(arr.has_class(0, "highlighted").unwrap());
        arr.remove_class(0, "highlighted").unwrap();
        assert!(!arr.has_class(0, "highlighted").unwrap());
    }
}
