//! Collision attribute classification
//!
//! A physics block lists its collision attributes under
//! `m_collisionAttributes`. Shapes point into that list with
//! `m_nCollisionAttributeIndex`; only shapes whose attribute is in the
//! default (solid) group are extracted.

use std::collections::BTreeSet;

use crate::kv3::{Document, PathExpr};

/// Attribute-table indices that take part in solid collision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidIndexSet {
    indices: BTreeSet<usize>,
}

impl SolidIndexSet {
    /// Set holding exactly `indices`
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self { indices: indices.into_iter().collect() }
    }

    /// Whether table index `index` is solid
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Whether a shape's raw attribute index is solid; negatives never are
    pub fn contains_attribute(&self, attribute: i32) -> bool {
        usize::try_from(attribute).is_ok_and(|index| self.contains(index))
    }

    /// Indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

/// Whether a collision group string names the solid group
///
/// Quotes and whitespace around the name are ignored; `default` matches in
/// any case, and some blocks write it as `0`.
pub fn is_solid_group(group: &str) -> bool {
    let group = group.trim_matches('"').trim();
    group.eq_ignore_ascii_case("default") || group == "0"
}

/// Scan the attribute table and collect the solid indices
///
/// Probes `m_collisionAttributes[i].m_CollisionGroupString` for `i = 0, 1, ..`
/// and stops at the first absent entry. When nothing is classified solid the
/// result is `{0}`, since the engine treats the first attribute as default.
pub fn classify_collision_attributes(doc: &Document) -> SolidIndexSet {
    let mut indices = BTreeSet::new();

    for index in 0.. {
        let path = PathExpr::default()
            .indexed("m_collisionAttributes", index)
            .key("m_CollisionGroupString");
        let Some(group) = doc.resolve(&path) else {
            break;
        };

        let solid = is_solid_group(group);
        log::debug!("Collision attribute {index}: group {group:?} solid={solid}");
        if solid {
            indices.insert(index);
        }
    }

    if indices.is_empty() {
        log::debug!("No default collision group found, assuming attribute 0");
        indices.insert(0);
    }

    SolidIndexSet { indices }
}
