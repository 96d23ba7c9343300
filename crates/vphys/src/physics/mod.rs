//! Physics shape reconstruction
//!
//! Shapes live under `m_parts[0].m_rnShape` as `m_hulls[i]` and
//! `m_meshes[i]`. Neither list carries a length; both are scanned from index
//! 0 until the shape's `m_nCollisionAttributeIndex` is absent.
//!
//! Each shape is isolated: a shape that cannot be rebuilt is logged, counted
//! and skipped, and the scan moves on to the next index.

pub mod primitives;
pub mod half_edge;
pub mod attributes;
pub mod hull;
pub mod mesh;

pub use primitives::{Triangle, TriangleStream};
pub use half_edge::{Edge, FaceRing, RingEnd};
pub use attributes::{classify_collision_attributes, is_solid_group, SolidIndexSet};
pub use hull::{reconstruct_hulls, FaceWalkStats, HullShape};
pub use mesh::{reconstruct_meshes, MeshShape};

use std::fmt;

use thiserror::Error;

use crate::kv3::{Document, PathExpr};

/// Reasons a single shape produces no triangles
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// A required blob is absent or decodes to nothing
    #[error("no {0} data")]
    MissingData(&'static str),

    /// A mesh triangle refers to a vertex that does not exist
    #[error("vertex index {index} out of range for {vertex_count} vertices")]
    VertexIndexOutOfRange {
        /// Index as stored in the buffer
        index: i32,
        /// Decoded vertex count
        vertex_count: usize,
    },

    /// A mesh index buffer that does not split into triples
    #[error("index buffer length {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
}

/// The two shape lists of a physics part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Convex hulls (`m_hulls`)
    Hull,
    /// Triangle meshes (`m_meshes`)
    Mesh,
}

impl ShapeKind {
    /// Key of the shape list under `m_rnShape`
    pub fn list_key(self) -> &'static str {
        match self {
            Self::Hull => "m_hulls",
            Self::Mesh => "m_meshes",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hull => "hull",
            Self::Mesh => "mesh",
        })
    }
}

/// Tally of one shape-list scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeScan {
    /// Which list was scanned
    pub kind: ShapeKind,
    /// Shapes found before the first absent index
    pub scanned: usize,
    /// Shapes that were rebuilt
    pub processed: usize,
    /// Shapes whose attribute is not solid (or not a number)
    pub filtered: usize,
    /// Shapes skipped for missing or empty data
    pub skipped: usize,
    /// Shapes rejected with a fault
    pub faulted: usize,
    /// Triangles appended
    pub triangles: usize,
}

impl ShapeScan {
    fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            scanned: 0,
            processed: 0,
            filtered: 0,
            skipped: 0,
            faulted: 0,
            triangles: 0,
        }
    }
}

/// `m_parts[0].m_rnShape`
pub fn shape_root() -> PathExpr {
    PathExpr::default().indexed("m_parts", 0).key("m_rnShape")
}

/// Walk one shape list, rebuilding every solid shape with `build`
///
/// `build` gets the path of the shape object (`...m_hulls[i]`) and returns
/// its triangles; they are appended to `stream` only on success.
pub(crate) fn scan_shapes<F>(
    doc: &Document,
    solid: &SolidIndexSet,
    kind: ShapeKind,
    stream: &mut TriangleStream,
    mut build: F,
) -> ShapeScan
where
    F: FnMut(&Document, &PathExpr) -> Result<Vec<Triangle>, ShapeError>,
{
    let list = shape_root();
    let mut scan = ShapeScan::new(kind);

    for index in 0.. {
        let shape = list.clone().indexed(kind.list_key(), index);
        let Some(attribute) = doc.resolve(&shape.join("m_nCollisionAttributeIndex")) else {
            break;
        };
        scan.scanned += 1;

        let is_solid = attribute
            .trim()
            .parse::<i32>()
            .is_ok_and(|attribute| solid.contains_attribute(attribute));
        if !is_solid {
            log::trace!("{kind} {index}: attribute {attribute} is not solid");
            scan.filtered += 1;
            continue;
        }

        match build(doc, &shape) {
            Ok(triangles) => {
                log::debug!("{kind} {index}: {} triangles", triangles.len());
                scan.processed += 1;
                scan.triangles += triangles.len();
                stream.extend(triangles);
            }
            Err(ShapeError::MissingData(what)) => {
                log::debug!("{kind} {index}: skipped, no {what} data");
                scan.skipped += 1;
            }
            Err(e) => {
                log::warn!("{kind} {index}: skipped, {e}");
                scan.faulted += 1;
            }
        }
    }

    scan
}
