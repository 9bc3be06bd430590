//! Identifiers and a simple allocator for registry entities.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct StructureId(pub u32);

/// Monotonic allocator for StructureId.
/// Dense indices improve cache locality; IDs are opaque externally.
#[derive(Default, Debug, Clone)]
pub struct IdAllocator {
    next_structure: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_structure(&mut self) -> StructureId {
        let id = StructureId(self.next_structure);
        self.next_structure = self.next_structure.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_structure(), StructureId(0));
        assert_eq!(alloc.alloc_structure(), StructureId(1));
        alloc.reset();
        assert_eq!(alloc.alloc_structure(), StructureId(0));
    }
}
