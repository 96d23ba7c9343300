//! Asset-side inputs: physics text sources, blob payloads and entity naming

pub mod payload;
pub mod source;
pub mod naming;

pub use payload::{parse_bytes, parse_edges, parse_float_vectors, parse_int32_array};
pub use source::{PhysicsTextSource, RenderedTextSource, SourceError};
pub use naming::{entity_name_from_entry, entity_name_from_entry_path};
