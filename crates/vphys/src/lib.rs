//! # vphys
//!
//! Extracts solid collision geometry from the KV3 text rendering of a
//! compiled physics block and writes it as a flat triangle list.
//!
//! ## Pipeline
//!
//! - **KV3 parsing**: tolerant text parser with path queries (`m_parts[0].m_rnShape`)
//! - **Payloads**: `#[ .. ]` byte blobs decoded as vectors, `i32`s or half-edges
//! - **Collision attributes**: only shapes in a solid group are kept
//! - **Shapes**: convex hulls are fanned face by face, meshes read as index triples
//! - **Output**: raw `.vphys` text and `.tri` files of 36-byte triangles
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vphys::prelude::*;
//!
//! let text = std::fs::read_to_string("de_dust2.vphys").unwrap();
//! let extraction = extract_from_text(&text);
//!
//! let mut file = std::fs::File::create("de_dust2.tri").unwrap();
//! write_triangles(&mut file, &extraction.triangles).unwrap();
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod foundation;
pub mod limits;
pub mod kv3;
pub mod assets;
pub mod physics;
pub mod extract;
pub mod config;

#[cfg(test)]
mod tests;

/// Common imports for extractor users
pub mod prelude {
    pub use crate::{
        assets::{entity_name_from_entry_path, PhysicsTextSource, RenderedTextSource, SourceError},
        config::{Config, ConfigError, ExtractorConfig, OutputConfig},
        extract::{
            extract_from_text, extract_triangles, write_triangles, EntityOutput, ExtractError,
            Extraction, ExtractionReport, Extractor, OutputError, OutputMode, OutputWriter,
        },
        foundation::math::Vec3,
        kv3::{Document, PathExpr},
        physics::{Triangle, TriangleStream},
    };
}
