//! Triangle mesh reconstruction
//!
//! A mesh stores vertex positions and a flat `i32` index buffer, three
//! indices per triangle. Mesh data is rebuilt all-or-nothing: a buffer that
//! does not split into triples, or any index outside the vertex list, rejects
//! the whole mesh with a [`ShapeError`] and none of its triangles are kept.
//! Hulls, by contrast, drop only the affected triangle or face.

use crate::assets::payload::{parse_bytes, parse_float_vectors, parse_int32_array};
use crate::foundation::math::Vec3;
use crate::kv3::{Document, PathExpr};

use super::primitives::{Triangle, TriangleStream};
use super::{scan_shapes, ShapeError, ShapeKind, ShapeScan, SolidIndexSet};

/// Decoded mesh data
#[derive(Debug, Clone, PartialEq)]
pub struct MeshShape {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Three indices per triangle
    pub indices: Vec<i32>,
}

impl MeshShape {
    /// Decode the mesh under `mesh_path` (a `...m_meshes[i]` object)
    pub fn from_document(doc: &Document, mesh_path: &PathExpr) -> Result<Self, ShapeError> {
        let mesh = mesh_path.join("m_Mesh");
        let blob = |key: &str| doc.resolve(&mesh.join(key)).map(parse_bytes).unwrap_or_default();

        let shape = Self {
            vertices: parse_float_vectors(&blob("m_Vertices")),
            indices: parse_int32_array(&blob("m_Triangles")),
        };

        if shape.vertices.is_empty() {
            return Err(ShapeError::MissingData("vertex"));
        }
        if shape.indices.is_empty() {
            return Err(ShapeError::MissingData("triangle index"));
        }
        Ok(shape)
    }

    /// One triangle per index triple, in buffer order
    pub fn triangulate(&self) -> Result<Vec<Triangle>, ShapeError> {
        if self.indices.len() % 3 != 0 {
            return Err(ShapeError::IncompleteTriangle(self.indices.len()));
        }

        self.indices
            .chunks_exact(3)
            .map(|tri| {
                Ok(Triangle::new(
                    self.vertex(tri[0])?,
                    self.vertex(tri[1])?,
                    self.vertex(tri[2])?,
                ))
            })
            .collect()
    }

    fn vertex(&self, index: i32) -> Result<Vec3, ShapeError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.vertices.get(i))
            .copied()
            .ok_or(ShapeError::VertexIndexOutOfRange {
                index,
                vertex_count: self.vertices.len(),
            })
    }
}

/// Rebuild every solid mesh of the document into `stream`
pub fn reconstruct_meshes(
    doc: &Document,
    solid: &SolidIndexSet,
    stream: &mut TriangleStream,
) -> ShapeScan {
    scan_shapes(doc, solid, ShapeKind::Mesh, stream, |doc, path| {
        MeshShape::from_document(doc, path)?.triangulate()
    })
}
