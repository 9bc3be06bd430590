//! stepviz-api-core: shared value model and structure capability surface.
//!
//! This crate defines the attribute value model, dense identifiers, the
//! per-element attribute store, and the `VisualStructure` capability trait
//! that the animation and exercise crates depend on. It knows nothing about
//! steps, timelines, or grading.

pub mod attrs;
pub mod error;
pub mod ids;
pub mod structure;
pub mod value;

pub use attrs::{AttrKey, AttrStore};
pub use error::AttrError;
pub use ids::{IdAllocator, StructureId};
pub use structure::{Bounds, StructureKind, VisualStructure};
pub use value::{Value, ValueKind};
