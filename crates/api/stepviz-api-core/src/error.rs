//! Errors surfaced by the attribute layer.

use serde::{Deserialize, Serialize};

use crate::attrs::AttrKey;
use crate::ids::StructureId;

/// Errors raised by `VisualStructure::get_attr` / `set_attr`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AttrError {
    /// Element index outside the structure's index space
    #[error("Element index {index} out of range for structure {structure:?} (len {len})")]
    IndexOutOfRange {
        structure: StructureId,
        index: usize,
        len: usize,
    },

    /// The structure variant does not carry this attribute
    #[error("Attribute {key:?} is not supported by structure {structure:?}")]
    UnsupportedAttr { structure: StructureId, key: AttrKey },

    /// Value kind not accepted for this attribute
    #[error("Invalid value for attribute {key:?}: {reason}")]
    InvalidValue { key: AttrKey, reason: String },
}
