//! Math utilities and types

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Build a vector from three little-endian `f32` words packed in 12 bytes
pub fn vec3_from_le_bytes(chunk: &[u8; 12]) -> Vec3 {
    let word = |offset: usize| {
        f32::from_le_bytes([
            chunk[offset],
            chunk[offset + 1],
            chunk[offset + 2],
            chunk[offset + 3],
        ])
    };
    Vec3::new(word(0), word(4), word(8))
}
