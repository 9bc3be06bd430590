//! Compared-attribute capture.
//!
//! A snapshot is always derived by reading the registry after replay; it is
//! never stored alongside the timeline. Graders configure which attributes
//! participate (e.g. the background-color css property as a proxy for
//! "highlighted").

use serde::{Deserialize, Serialize};
use stepviz_api_core::{AttrKey, StructureKind, Value};
use stepviz_structures_core::StructureRegistry;

use crate::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompareKind {
    /// Element values.
    Value,
    /// One css property per element.
    Css { property: String },
    /// Presence of one class per element.
    Class { name: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompareTarget {
    pub kind: CompareKind,
    /// Tolerance for numeric values; exact comparison when 0.
    #[serde(default)]
    pub eps: f64,
}

impl CompareTarget {
    pub fn value() -> Self {
        Self {
            kind: CompareKind::Value,
            eps: 0.0,
        }
    }

    pub fn css(property: &str) -> Self {
        Self {
            kind: CompareKind::Css {
                property: property.to_string(),
            },
            eps: 0.0,
        }
    }

    pub fn class(name: &str) -> Self {
        Self {
            kind: CompareKind::Class {
                name: name.to_string(),
            },
            eps: 0.0,
        }
    }

    fn key_for(&self, index: usize) -> AttrKey {
        match &self.kind {
            CompareKind::Value => AttrKey::Value { index },
            CompareKind::Css { property } => AttrKey::Css {
                index,
                property: property.clone(),
            },
            CompareKind::Class { name } => AttrKey::Class {
                index,
                name: name.clone(),
            },
        }
    }
}

/// The externally observable compared attributes of one structure at one
/// moment: per element, one value per compare target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructureSnapshot {
    pub kind: StructureKind,
    pub elements: Vec<Vec<Value>>,
}

/// Capture every registered structure in registration order.
pub fn capture(
    registry: &StructureRegistry,
    targets: &[CompareTarget],
) -> Result<Vec<StructureSnapshot>> {
    let mut out = Vec::with_capacity(registry.len());
    for (_, structure) in registry.iter() {
        let mut elements = Vec::with_capacity(structure.element_count());
        for index in 0..structure.element_count() {
            let mut row = Vec::with_capacity(targets.len());
            for target in targets {
                let value = structure
                    .get_attr(&target.key_for(index))
                    .map_err(stepviz_animation_core::AnimationError::from)?;
                row.push(value);
            }
            elements.push(row);
        }
        out.push(StructureSnapshot {
            kind: structure.kind(),
            elements,
        });
    }
    Ok(out)
}

/// Same structure counts, kinds, and element counts on both sides.
pub fn shapes_match(a: &[StructureSnapshot], b: &[StructureSnapshot]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.kind == y.kind && x.elements.len() == y.elements.len())
}

/// Compare two captures under the per-target tolerances. Shapes are assumed
/// to have been validated at grading setup.
pub fn snapshots_match(
    a: &[StructureSnapshot],
    b: &[StructureSnapshot],
    targets: &[CompareTarget],
) -> bool {
    if !shapes_match(a, b) {
        return false;
    }
    a.iter().zip(b).all(|(x, y)| {
        x.elements.iter().zip(&y.elements).all(|(ex, ey)| {
            ex.iter()
                .zip(ey)
                .zip(targets)
                .all(|((vx, vy), t)| vx.approx_eq(vy, t.eps))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(values: &[i64]) -> StructureRegistry {
        let mut reg = StructureRegistry::new();
        reg.add_array(values.iter().copied().map(Value::Int).collect());
        reg
    }

    #[test]
    fn capture_reads_compared_attrs_only() {
        let reg = registry_with(&[1, 2]);
        let snaps = capture(&reg, &[CompareTarget::value()]).unwrap();
        assert_eq!(snaps.len(), 1);
        assert_eq!(
            snaps[0].elements,
            vec![vec![Value::Int(1)], vec![Value::Int(2)]]
        );
    }

    #[test]
    fn mismatching_shapes_never_match() {
        let a = capture(&registry_with(&[1]), &[CompareTarget::value()]).unwrap();
        let b = capture(&registry_with(&[1, 2]), &[CompareTarget::value()]).unwrap();
        assert!(!shapes_match(&a, &b));
        assert!(!snapshots_match(&a, &b, &[CompareTarget::value()]));
    }

    #[test]
    fn tolerance_applies_per_target() {
        let mut t = CompareTarget::value();
        t.eps = 1.0;
        let a = capture(&registry_with(&[10]), &[t.clone()]).unwrap();
        let b = capture(&registry_with(&[11]), &[t.clone()]).unwrap();
        assert!(snapshots_match(&a, &b, &[t]));
    }
}
