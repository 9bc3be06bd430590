//! Graph of value nodes with attributable edges.
//!
//! Element index space: nodes occupy `0..node_count`, edges occupy
//! `node_count..node_count + edge_count` in insertion order. Edge attributes
//! (weight as value, css, classes) are addressed through the same `AttrKey`
//! scheme as node attributes.

use serde::{Deserialize, Serialize};
use stepviz_api_core::{
    AttrError, AttrKey, Bounds, StructureId, StructureKind, Value, VisualStructure,
};

use crate::bank::AttrBank;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VisualGraph {
    bank: AttrBank,
    node_count: usize,
    /// (from, to) node indices per edge, parallel to the edge element range.
    edges: Vec<(usize, usize)>,
    directed: bool,
}

impl VisualGraph {
    pub fn new(id: StructureId, node_values: Vec<Value>, directed: bool) -> Self {
        let node_count = node_values.len();
        Self {
            bank: AttrBank::new(id, node_values),
            node_count,
            edges: Vec::new(),
            directed,
        }
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add an edge between two existing nodes, returning its element index.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<usize, AttrError> {
        for node in [from, to] {
            if node >= self.node_count {
                return Err(AttrError::IndexOutOfRange {
                    structure: self.bank.id,
                    index: node,
                    len: self.node_count,
                });
            }
        }
        self.edges.push((from, to));
        self.bank.elements.push(Default::default());
        Ok(self.node_count + self.edges.len() - 1)
    }

    /// Element index of the edge from `from` to `to`, honoring direction.
    pub fn edge_index(&self, from: usize, to: usize) -> Option<usize> {
        self.edges
            .iter()
            .position(|&(a, b)| (a, b) == (from, to) || (!self.directed && (b, a) == (from, to)))
            .map(|i| self.node_count + i)
    }

    /// Endpoints of the edge at the given element index.
    pub fn edge_endpoints(&self, element_index: usize) -> Option<(usize, usize)> {
        element_index
            .checked_sub(self.node_count)
            .and_then(|i| self.edges.get(i))
            .copied()
    }

    /// Node indices adjacent to `node` (out-neighbors when directed).
    pub fn neighbors(&self, node: usize) -> Vec<usize> {
        let mut out = Vec::new();
        for &(a, b) in &self.edges {
            if a == node {
                out.push(b);
            } else if !self.directed && b == node {
                out.push(a);
            }
        }
        out
    }
}

impl VisualStructure for VisualGraph {
    fn id(&self) -> StructureId {
        self.bank.id
    }

    fn kind(&self) -> StructureKind {
        StructureKind::Graph
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
    fn edges_extend_the_element_space() {
        let mut g = VisualGraph::new(StructureId(0), ints(&[1, 2, 3]), false);
        let e = g.add_edge(0, 1).unwrap();
        assert_eq!(e, 3);
        assert_eq!(g.element_count(), 4);
        // Edge weight is addressable like any element value
        g.set_attr(&AttrKey::Value { index: e }, &Value::Int(7))
            .unwrap();
        assert_eq!(
            g.get_attr(&AttrKey::Value { index: e }).unwrap(),
            Value::Int(7)
        );
    }

    #[test]
    fn undirected_edge_lookup_is_symmetric() {
        let mut g = VisualGraph::new(StructureId(0), ints(&[1, 2]), false);
        let e = g.add_edge(0, 1).unwrap();
        assert_eq!(g.edge_index(1, 0), Some(e));
        assert_eq!(g.neighbors(1), vec![0]);
    }

    #[test]
    fn edge_to_missing_node_is_an_error() {
        let mut g = VisualGraph::new(StructureId(0), ints(&[1]), true);
        assert!(g.add_edge(0, 3).is_err());
    }
}
