//! Two-dimensional grid of value cells, indexed row-major.

use serde::{Deserialize, Serialize};
use stepviz_api_core::{
    AttrError, AttrKey, Bounds, StructureId, StructureKind, Value, VisualStructure,
};

use crate::bank::AttrBank;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VisualMatrix {
    bank: AttrBank,
    rows: usize,
    cols: usize,
}

impl VisualMatrix {
    pub fn new(id: StructureId, rows: usize, cols: usize) -> Self {
        Self {
            bank: AttrBank::with_len(id, rows * cols),
            rows,
            cols,
        }
    }

    pub fn from_rows(id: StructureId, rows: &[Vec<Value>]) -> Self {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let bank = AttrBank::new(id, rows.iter().flatten().cloned().collect());
        debug_assert_eq!(bank.len(), rows.len() * cols);
        Self {
            bank,
            rows: rows.len(),
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Flat element index for (row, col); row-major.
    #[inline]
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl VisualStructure for VisualMatrix {
    fn id(&self) -> StructureId {
        self.bank.id
    }

    fn kind(&self) -> StructureKind {
        StructureKind::Matrix
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
