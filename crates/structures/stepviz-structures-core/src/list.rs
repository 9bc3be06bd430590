//! Singly linked list of value nodes.
//!
//! Node storage is a flat bank; topology is a parallel `next` table. The
//! engine mutates node attributes only; relinking is a host/layout concern
//! and stays outside the recorded effect vocabulary.

use serde::{Deserialize, Serialize};
use stepviz_api_core::{
    AttrError, AttrKey, Bounds, StructureId, StructureKind, Value, VisualStructure,
};

use crate::bank::AttrBank;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VisualList {
    bank: AttrBank,
    next: Vec<Option<usize>>,
    head: Option<usize>,
}

impl VisualList {
    /// Build a list whose nodes are chained in the given value order.
    pub fn new(id: StructureId, values: Vec<Value>) -> Self {
        let n = values.len();
        let next = (0..n)
            .map(|i| if i + 1 < n { Some(i + 1) } else { None })
            .collect();
        Self {
            bank: AttrBank::new(id, values),
            next,
            head: if n > 0 { Some(0) } else { None },
        }
    }

    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn next_of(&self, index: usize) -> Option<usize> {
        self.next.get(index).copied().flatten()
    }

    /// Node indices from head to tail following the links.
    pub fn iter_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.next.len());
        let mut cur = self.head;
        while let Some(i) = cur {
            order.push(i);
            cur = self.next_of(i);
            if order.len() > self.next.len() {
                break; // malformed links would cycle
            }
        }
        order
    }

    /// Values in link order.
    pub fn values_in_order(&self) -> Vec<Value> {
        self.iter_order()
            .into_iter()
            .map(|i| self.bank.elements[i].value.clone())
            .collect()
    }
}

impl VisualStructure for VisualList {
    fn id(&self) -> StructureId {
        self.bank.id
    }

    fn kind(&self) -> StructureKind {
        StructureKind::List
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
