//! Collision triangles and the ordered triangle stream

use crate::foundation::math::Vec3;

/// A collision triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle from three vertices
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Components in `v0.xyz, v1.xyz, v2.xyz` order
    pub fn to_components(&self) -> [f32; 9] {
        [
            self.v0.x, self.v0.y, self.v0.z,
            self.v1.x, self.v1.y, self.v1.z,
            self.v2.x, self.v2.y, self.v2.z,
        ]
    }

    /// Inverse of [`Triangle::to_components`]
    pub fn from_components(c: [f32; 9]) -> Self {
        Self::new(
            Vec3::new(c[0], c[1], c[2]),
            Vec3::new(c[3], c[4], c[5]),
            Vec3::new(c[6], c[7], c[8]),
        )
    }

    /// Unnormalized face normal (edge1 x edge2)
    pub fn normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// True when the triangle has no area
    ///
    /// The edge cross product is compared against `EPSILON` times the product
    /// of the edge lengths, so the test is independent of triangle size.
    /// Hull face fans end with one of these (the last ring edge leads back
    /// to the anchor vertex), so they are counted rather than dropped.
    pub fn is_degenerate(&self) -> bool {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2).norm() <= f32::EPSILON * e1.norm() * e2.norm()
    }
}

/// Triangles in discovery order, append-only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleStream {
    triangles: Vec<Triangle>,
}

impl TriangleStream {
    /// Create an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one triangle
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Number of triangles
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True when nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangles in order
    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Iterate in order
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    /// Number of zero-area triangles
    pub fn degenerate_count(&self) -> usize {
        self.triangles.iter().filter(|t| t.is_degenerate()).count()
    }
}

impl Extend<Triangle> for TriangleStream {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

impl From<Vec<Triangle>> for TriangleStream {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }
}

impl<'a> IntoIterator for &'a TriangleStream {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}
