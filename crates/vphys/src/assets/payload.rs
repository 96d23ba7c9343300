//! Byte-blob payload decoding
//!
//! Blob text is a run of whitespace-separated two-digit hex tokens, with or
//! without its `#[ .. ]` wrapper. Typed views are little-endian and drop any
//! incomplete trailing record.
//!
//! Tokens that are not exactly two hex digits are skipped, not rejected.
//! One bad token therefore shifts every later value in the blob by a byte;
//! downstream reconstruction sees misaligned data rather than an error.

use crate::foundation::math::{vec3_from_le_bytes, Vec3};
use crate::physics::half_edge::Edge;

/// Bytes of a blob, skipping malformed tokens
pub fn parse_bytes(text: &str) -> Vec<u8> {
    let mut data = text.trim();
    if let Some(inner) = data.strip_prefix("#[").and_then(|rest| rest.strip_suffix(']')) {
        data = inner;
    }

    data.split_whitespace()
        .filter(|token| token.len() == 2 && token.bytes().all(|b| b.is_ascii_hexdigit()))
        .filter_map(|token| u8::from_str_radix(token, 16).ok())
        .collect()
}

/// 12-byte records as three `f32` components
pub fn parse_float_vectors(bytes: &[u8]) -> Vec<Vec3> {
    bytes
        .chunks_exact(12)
        .filter_map(|chunk| chunk.try_into().ok())
        .map(vec3_from_le_bytes)
        .collect()
}

/// 4-byte records as `i32`
pub fn parse_int32_array(bytes: &[u8]) -> Vec<i32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// 4-byte records as half-edges `{next, twin, origin, face}`
pub fn parse_edges(bytes: &[u8]) -> Vec<Edge> {
    let whole = bytes.len() - bytes.len() % std::mem::size_of::<Edge>();
    bytemuck::cast_slice::<u8, Edge>(&bytes[..whole]).to_vec()
}
