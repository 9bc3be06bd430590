//! Session-scoped owner of visual structures.
//!
//! One registry belongs to exactly one animation engine (the spec's
//! shared-resource policy): no two timelines mutate the same registry. The
//! grading engine owns two registries, one per timeline, and drives them in
//! any interleaving.

use stepviz_api_core::{IdAllocator, StructureId, Value, VisualStructure};

use crate::{VisualArray, VisualGraph, VisualList, VisualMatrix, VisualTree};

#[derive(Debug, Default, Clone)]
pub struct StructureRegistry {
    ids: IdAllocator,
    items: Vec<(StructureId, Box<dyn VisualStructure>)>,
}

impl StructureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a structure built from its freshly allocated id.
    pub fn register<F>(&mut self, build: F) -> StructureId
    where
        F: FnOnce(StructureId) -> Box<dyn VisualStructure>,
    {
        let id = self.ids.alloc_structure();
        let built = build(id);
        debug_assert_eq!(built.id(), id);
        log::debug!("registered {:?} as {:?}", built.kind(), id);
        self.items.push((id, built));
        id
    }

    pub fn add_array(&mut self, values: Vec<Value>) -> StructureId {
        self.register(|id| Box::new(VisualArray::new(id, values)))
    }

    pub fn add_list(&mut self, values: Vec<Value>) -> StructureId {
        self.register(|id| Box::new(VisualList::new(id, values)))
    }

    pub fn add_tree(&mut self, values: Vec<Value>, parent: Vec<Option<usize>>) -> StructureId {
        self.register(|id| Box::new(VisualTree::new(id, values, parent)))
    }

    pub fn add_graph(&mut self, node_values: Vec<Value>, directed: bool) -> StructureId {
        self.register(|id| Box::new(VisualGraph::new(id, node_values, directed)))
    }

    pub fn add_matrix(&mut self, rows: &[Vec<Value>]) -> StructureId {
        self.register(|id| Box::new(VisualMatrix::from_rows(id, rows)))
    }

    pub fn get(&self, id: StructureId) -> Option<&dyn VisualStructure> {
        self.items
            .iter()
            .find_map(|(i, s)| (*i == id).then(|| s.as_ref()))
    }

    pub fn get_mut(&mut self, id: StructureId) -> Option<&mut Box<dyn VisualStructure>> {
        self.items
            .iter_mut()
            .find_map(|(i, s)| (*i == id).then_some(s))
    }

    pub fn contains(&self, id: StructureId) -> bool {
        self.items.iter().any(|(i, _)| *i == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids in registration order.
    pub fn ids(&self) -> Vec<StructureId> {
        self.items.iter().map(|(i, _)| *i).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StructureId, &dyn VisualStructure)> {
        self.items.iter().map(|(i, s)| (*i, s.as_ref()))
    }

    /// Drop all structures and restart id allocation; used by session reset.
    pub fn clear(&mut self) {
        self.items.clear();
        self.ids.reset();
    }
}
