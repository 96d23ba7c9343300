//! `.tri` triangle soup format
//!
//! Nine little-endian `f32` per triangle (`v0.xyz v1.xyz v2.xyz`), 36 bytes
//! each, no header, footer or count. The triangle count is the file size
//! divided by 36.

use std::io::{self, Write};

use crate::physics::Triangle;

/// Bytes per serialized triangle
pub const TRIANGLE_RECORD_SIZE: usize = 36;

/// Write triangles in `.tri` layout
pub fn write_triangles<'a, W, I>(writer: &mut W, triangles: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Triangle>,
{
    for triangle in triangles {
        let mut record = [0u8; TRIANGLE_RECORD_SIZE];
        for (slot, value) in record.chunks_exact_mut(4).zip(triangle.to_components()) {
            slot.copy_from_slice(&value.to_le_bytes());
        }
        writer.write_all(&record)?;
    }
    Ok(())
}

/// Serialize triangles to an owned buffer
pub fn encode_triangles<'a, I>(triangles: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a Triangle>,
{
    let mut buffer = Vec::new();
    // writing to a Vec cannot fail
    let _ = write_triangles(&mut buffer, triangles);
    buffer
}

/// Read `.tri` bytes back; a trailing partial record is ignored
pub fn read_triangles(bytes: &[u8]) -> Vec<Triangle> {
    bytes
        .chunks_exact(TRIANGLE_RECORD_SIZE)
        .map(|record| {
            let mut components = [0f32; 9];
            for (value, word) in components.iter_mut().zip(record.chunks_exact(4)) {
                *value = f32::from_le_bytes([word[0], word[1], word[2], word[3]]);
            }
            Triangle::from_components(components)
        })
        .collect()
}
