//! stepviz-structures-core: visual structure variants and their registry.
//!
//! The animation engine only sees `dyn VisualStructure`; this crate provides
//! the concrete variants (Array, List, Tree, Graph, Matrix) and the
//! `StructureRegistry` that owns them for one session. Layout geometry and
//! rendering are host concerns and deliberately absent.

pub mod array;
pub mod bank;
pub mod graph;
pub mod list;
pub mod matrix;
pub mod registry;
pub mod tree;

pub use array::VisualArray;
pub use graph::VisualGraph;
pub use list::VisualList;
pub use matrix::VisualMatrix;
pub use registry::StructureRegistry;
pub use tree::VisualTree;
