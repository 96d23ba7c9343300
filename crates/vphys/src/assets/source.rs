//! Physics text sources
//!
//! Opening packages and decoding compiled resources happens outside this
//! crate. Whatever does it plugs in here by rendering a resource's physics
//! block as KV3 text.

use thiserror::Error;

/// Renders the physics block of a compiled resource as KV3 text
pub trait PhysicsTextSource {
    /// Produce the KV3 text rendering for `resource_bytes`
    fn render_physics_text(&self, resource_bytes: &[u8]) -> Result<String, SourceError>;
}

/// Physics source errors
#[derive(Error, Debug)]
pub enum SourceError {
    /// Bytes could not be decoded
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Source for physics blocks that were already rendered to text
///
/// The bytes are taken as UTF-8 KV3 text (for example a `.vphys` dump) and
/// returned as written, byte order mark and all.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderedTextSource;

impl PhysicsTextSource for RenderedTextSource {
    fn render_physics_text(&self, resource_bytes: &[u8]) -> Result<String, SourceError> {
        std::str::from_utf8(resource_bytes)
            .map(str::to_string)
            .map_err(|e| SourceError::InvalidData(e.to_string()))
    }
}
