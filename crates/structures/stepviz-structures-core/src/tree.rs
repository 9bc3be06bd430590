//! Rooted tree of value nodes.
//!
//! Nodes are stored flat; topology is a parent table plus derived child
//! lists, in insertion order. Balancing/rotation algorithms are payloads the
//! engine replays, not part of this crate.

use serde::{Deserialize, Serialize};
use stepviz_api_core::{
    AttrError, AttrKey, Bounds, StructureId, StructureKind, Value, VisualStructure,
};

use crate::bank::AttrBank;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VisualTree {
    bank: AttrBank,
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    root: Option<usize>,
}

impl VisualTree {
    /// Build a tree from per-node values and a parent table. Node 0 is
    /// conventionally the root (parent None).
    pub fn new(id: StructureId, values: Vec<Value>, parent: Vec<Option<usize>>) -> Self {
        let n = values.len();
        debug_assert_eq!(parent.len(), n);
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut root = None;
        for (i, p) in parent.iter().enumerate() {
            match p {
                Some(p) => children[*p].push(i),
                None => root = root.or(Some(i)),
            }
        }
        Self {
            bank: AttrBank::new(id, values),
            parent,
            children,
            root,
        }
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn parent_of(&self, index: usize) -> Option<usize> {
        self.parent.get(index).copied().flatten()
    }

    pub fn children_of(&self, index: usize) -> &[usize] {
        self.children.get(index).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Preorder walk of node indices starting at the root.
    pub fn preorder(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.bank.len());
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(i) = stack.pop() {
            out.push(i);
            for &c in self.children_of(i).iter().rev() {
                stack.push(c);
            }
        }
        out
    }
}

impl VisualStructure for VisualTree {
    fn id(&self) -> StructureId {
        self.bank.id
    }

    fn kind(&self) -> StructureKind {
        StructureKind::Tree
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

    fn ints(vs: &[i64]) -> Vec<Value> {
        vs.iter().copied().map(Value::Int).collect()
    }

    #[test]
    fn parent_table_builds_children() {
        //      0
        //     / \
        //    1   2
        //   /
        //  3
        let tree = VisualTree::new(
            StructureId(0),
            ints(&[10, 20, 30, 40]),
            vec![None, Some(0), Some(0), Some(1)],
        );
        assert_eq!(tree.root(), Some(0));
        assert_eq!(tree.children_of(0), &[1, 2]);
        assert_eq!(tree.parent_of(3), Some(1));
        assert_eq!(tree.preorder(), vec![0, 1, 3, 2]);
    }
}
