//! The capability trait every visual structure variant implements.
//!
//! The animation engine stores structure references opaquely and depends only
//! on this surface: identity, bounds, and generic attribute get/set. Concrete
//! variants (Array, List, Tree, Graph, Matrix) live in the structures crate.

use serde::{Deserialize, Serialize};

use crate::attrs::AttrKey;
use crate::error::AttrError;
use crate::ids::StructureId;
use crate::value::Value;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    Array,
    List,
    Tree,
    Graph,
    Matrix,
}

/// Axis-aligned bounding box of a structure on the canvas. The engine never
/// computes layout; bounds are written by the host through the Position
/// attribute and read back for display purposes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Capability set shared by all structure variants: {id, kind, bounds,
/// element count, attribute get/set, clone}.
///
/// `set_attr` returns the previous value of the attribute; this is the undo
/// token the animation engine pairs with the written value to build a
/// reversible effect.
pub trait VisualStructure: std::fmt::Debug {
    fn id(&self) -> StructureId;

    fn kind(&self) -> StructureKind;

    fn bounds(&self) -> Bounds;

    /// Number of addressable elements. Variants define their own index
    /// space (Graph counts nodes then edges).
    fn element_count(&self) -> usize;

    /// Read one attribute; Null when unset.
    fn get_attr(&self, key: &AttrKey) -> Result<Value, AttrError>;

    /// Write one attribute, returning the previous value.
    fn set_attr(&mut self, key: &AttrKey, value: &Value) -> Result<Value, AttrError>;

    /// Deep copy, used when a model registry seeds a comparison baseline.
    fn clone_box(&self) -> Box<dyn VisualStructure>;
}

impl Clone for Box<dyn VisualStructure> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Convenience wrappers over the class attribute, mirroring the
/// addClass/removeClass surface hosts expect.
pub trait ClassOps {
    fn add_class(&mut self, index: usize, name: &str) -> Result<Value, AttrError>;
    fn remove_class(&mut self, index: usize, name: &str) -> Result<Value, AttrError>;
    fn has_class(&self, index: usize, name: &str) -> Result<bool, AttrError>;
}

impl<T: VisualStructure + ?Sized> ClassOps for T {
    fn add_class(&mut self, index: usize, name: &str) -> Result<Value, AttrError> {
        self.set_attr(
            &AttrKey::Class {
                index,
                name: name.to_string(),
            },
            &Value::Bool(true),
        )
    }

    fn remove_class(&mut self, index: usize, name: &str) -> Result<Value, AttrError> {
        self.set_attr(
            &AttrKey::Class {
                index,
                name: name.to_string(),
            },
            &Value::Bool(false),
        )
    }

    fn has_class(&self, index: usize, name: &str) -> Result<bool, AttrError> {
        let v = self.get_attr(&AttrKey::Class {
            index,
            name: name.to_string(),
        })?;
        Ok(v == Value::Bool(true))
    }
}
