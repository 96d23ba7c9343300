//! Convex hull reconstruction
//!
//! A hull stores vertex positions, one start edge per face and a half-edge
//! table. Each face is fanned from its start edge's origin: every step of
//! the face ring adds the triangle `(origin(start), origin(edge), origin(next))`.
//! The step that returns to the start edge yields a zero-area triangle; it
//! stays in the output.
//!
//! Indices are never trusted here. A face whose start edge is outside the
//! table is skipped, a ring that leaves the table stops at that point, and
//! a step whose vertices are out of range drops just that triangle.

use crate::assets::payload::{parse_bytes, parse_edges, parse_float_vectors};
use crate::foundation::math::Vec3;
use crate::kv3::{Document, PathExpr};

use super::half_edge::{Edge, FaceRing, RingEnd};
use super::primitives::{Triangle, TriangleStream};
use super::{scan_shapes, ShapeError, ShapeKind, ShapeScan, SolidIndexSet};

/// Decoded hull data
#[derive(Debug, Clone, PartialEq)]
pub struct HullShape {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Start edge of each face
    pub faces: Vec<u8>,
    /// Half-edge table
    pub edges: Vec<Edge>,
}

/// How the face walks of one hull went
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceWalkStats {
    /// Rings that returned to their start edge
    pub closed: usize,
    /// Rings cut off by the step limit
    pub truncated: usize,
    /// Rings that ran into an out-of-range edge
    pub broken: usize,
    /// Faces whose start edge is outside the table
    pub skipped_faces: usize,
    /// Steps dropped for out-of-range vertex indices
    pub skipped_triangles: usize,
}

impl HullShape {
    /// Decode the hull under `hull_path` (a `...m_hulls[i]` object)
    ///
    /// Positions come from `m_Hull.m_VertexPositions`, or `m_Hull.m_Vertices`
    /// when the former is absent.
    pub fn from_document(doc: &Document, hull_path: &PathExpr) -> Result<Self, ShapeError> {
        let hull = hull_path.join("m_Hull");
        let blob = |key: &str| doc.resolve(&hull.join(key)).map(parse_bytes).unwrap_or_default();

        let vertex_text = doc
            .resolve(&hull.join("m_VertexPositions"))
            .or_else(|| doc.resolve(&hull.join("m_Vertices")))
            .ok_or(ShapeError::MissingData("vertex"))?;

        let shape = Self {
            vertices: parse_float_vectors(&parse_bytes(vertex_text)),
            faces: blob("m_Faces"),
            edges: parse_edges(&blob("m_Edges")),
        };

        if shape.vertices.is_empty() {
            return Err(ShapeError::MissingData("vertex"));
        }
        if shape.faces.is_empty() {
            return Err(ShapeError::MissingData("face"));
        }
        if shape.edges.is_empty() {
            return Err(ShapeError::MissingData("edge"));
        }
        Ok(shape)
    }

    /// Fan-triangulate every face into `out`
    pub fn triangulate_into(&self, out: &mut Vec<Triangle>) -> FaceWalkStats {
        let mut stats = FaceWalkStats::default();

        for &start in &self.faces {
            let start = usize::from(start);
            let Some(mut ring) = FaceRing::new(&self.edges, start) else {
                stats.skipped_faces += 1;
                continue;
            };

            let anchor = self.origin_of(start);
            for (edge, next) in ring.by_ref() {
                match (anchor, self.origin_of(edge), self.origin_of(next)) {
                    (Some(a), Some(b), Some(c)) => out.push(Triangle::new(a, b, c)),
                    _ => stats.skipped_triangles += 1,
                }
            }

            match ring.end() {
                Some(RingEnd::Closed) => stats.closed += 1,
                Some(RingEnd::Truncated) => {
                    log::debug!("Face at edge {start} did not close within the step limit");
                    stats.truncated += 1;
                }
                Some(RingEnd::Broken) | None => stats.broken += 1,
            }
        }

        stats
    }

    /// Fan-triangulate every face
    pub fn triangulate(&self) -> Vec<Triangle> {
        let mut triangles = Vec::new();
        self.triangulate_into(&mut triangles);
        triangles
    }

    fn origin_of(&self, edge: usize) -> Option<Vec3> {
        let origin = self.edges.get(edge)?.origin;
        self.vertices.get(usize::from(origin)).copied()
    }
}

/// Rebuild every solid hull of the document into `stream`
pub fn reconstruct_hulls(
    doc: &Document,
    solid: &SolidIndexSet,
    stream: &mut TriangleStream,
) -> ShapeScan {
    scan_shapes(doc, solid, ShapeKind::Hull, stream, |doc, path| {
        let hull = HullShape::from_document(doc, path)?;
        let mut triangles = Vec::new();
        let stats = hull.triangulate_into(&mut triangles);
        if stats.truncated + stats.broken + stats.skipped_faces + stats.skipped_triangles > 0 {
            log::debug!("{path}: irregular topology {stats:?}");
        }
        Ok(triangles)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::FACE_WALK_STEP_LIMIT;

    fn edge(next: u8, origin: u8) -> Edge {
        Edge { next, twin: 0, origin, face: 0 }
    }

    fn vertices(count: usize) -> Vec<Vec3> {
        (0..count).map(|i| Vec3::new(i as f32, (i * i) as f32, 1.0)).collect()
    }

    #[test]
    fn test_two_hop_face_yields_one_triangle() {
        let hull = HullShape {
            vertices: vertices(2),
            faces: vec![0],
            edges: vec![edge(1, 0), edge(0, 1)],
        };
        let triangles = hull.triangulate();
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0], Triangle::new(hull.vertices[0], hull.vertices[1], hull.vertices[0]));
    }

    #[test]
    fn test_quad_face_fans_from_start_origin() {
        let hull = HullShape {
            vertices: vertices(4),
            faces: vec![0],
            edges: vec![edge(1, 0), edge(2, 1), edge(3, 2), edge(0, 3)],
        };
        let v = &hull.vertices;
        let triangles = hull.triangulate();

        assert_eq!(
            triangles,
            vec![
                Triangle::new(v[0], v[1], v[2]),
                Triangle::new(v[0], v[2], v[3]),
                // closing step back to the anchor
                Triangle::new(v[0], v[3], v[0]),
            ]
        );
        assert!(triangles[2].is_degenerate());
    }

    #[test]
    fn test_cycle_is_capped() {
        let hull = HullShape {
            vertices: vertices(3),
            faces: vec![0],
            edges: vec![edge(1, 0), edge(2, 1), edge(1, 2)],
        };
        let mut triangles = Vec::new();
        let stats = hull.triangulate_into(&mut triangles);

        assert_eq!(triangles.len(), FACE_WALK_STEP_LIMIT);
        assert_eq!(stats.truncated, 1);
    }

    #[test]
    fn test_out_of_range_indices_are_skipped() {
        let hull = HullShape {
            vertices: vertices(3),
            // face 0 is fine, face 9 starts outside the table
            faces: vec![0, 9, 3],
            edges: vec![
                edge(1, 0),
                edge(2, 7), // origin outside the vertex list
                edge(0, 2),
                edge(4, 0), // next leaves the table
            ],
        };
        let mut triangles = Vec::new();
        let stats = hull.triangulate_into(&mut triangles);

        // face 0: step (1,2) dropped, step (2,0) kept
        assert_eq!(triangles.len(), 1);
        assert_eq!(stats.skipped_triangles, 1);
        assert_eq!(stats.closed, 1);
        assert_eq!(stats.skipped_faces, 1);
        assert_eq!(stats.broken, 1);
    }

    fn hull_doc(hull_body: &str) -> Document {
        Document::parse(&format!(
            "{{ m_parts = [ {{ m_rnShape = {{ m_hulls = [ {{ m_nCollisionAttributeIndex = 0 m_Hull = {{ {hull_body} }} }} ] }} }} ] }}"
        ))
    }

    fn hull_path() -> PathExpr {
        crate::physics::shape_root().indexed("m_hulls", 0)
    }

    #[test]
    fn test_vertex_fallback_key() {
        // one vertex (1.0, 0, 0)
        let doc = hull_doc(
            "m_Vertices = #[ 00 00 80 3F 00 00 00 00 00 00 00 00 ] \
             m_Faces = #[ 00 ] m_Edges = #[ 00 00 00 00 ]",
        );
        let hull = HullShape::from_document(&doc, &hull_path()).unwrap();
        assert_eq!(hull.vertices, vec![Vec3::new(1.0, 0.0, 0.0)]);
        assert_eq!(hull.faces, vec![0]);
        assert_eq!(hull.edges, vec![edge(0, 0)]);
    }

    #[test]
    fn test_missing_blobs() {
        let doc = hull_doc("m_Faces = #[ 00 ] m_Edges = #[ 00 00 00 00 ]");
        assert_eq!(
            HullShape::from_document(&doc, &hull_path()),
            Err(ShapeError::MissingData("vertex"))
        );

        let doc = hull_doc("m_VertexPositions = #[ 00 00 00 00 00 00 00 00 00 00 00 00 ] m_Edges = #[ 00 00 00 00 ]");
        assert_eq!(
            HullShape::from_document(&doc, &hull_path()),
            Err(ShapeError::MissingData("face"))
        );

        let doc = hull_doc("m_VertexPositions = #[ 00 00 00 00 00 00 00 00 00 00 00 00 ] m_Faces = #[ 00 ] m_Edges = #[ 00 00 ]");
        assert_eq!(
            HullShape::from_document(&doc, &hull_path()),
            Err(ShapeError::MissingData("edge"))
        );
    }
}
