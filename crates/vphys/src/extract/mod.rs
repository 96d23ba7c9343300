//! Extraction pipeline
//!
//! Ties the pieces together for one physics block: parse the text, classify
//! collision attributes, rebuild hulls then meshes into a single triangle
//! stream, and write the requested output files.

pub mod tri_format;
pub mod output;

pub use tri_format::{encode_triangles, read_triangles, write_triangles, TRIANGLE_RECORD_SIZE};
pub use output::{OutputError, OutputMode, OutputWriter};

use std::path::PathBuf;

use thiserror::Error;

use crate::assets::{PhysicsTextSource, SourceError};
use crate::config::OutputConfig;
use crate::kv3::Document;
use crate::physics::{
    classify_collision_attributes, reconstruct_hulls, reconstruct_meshes, ShapeScan, TriangleStream,
};

/// Summary of one document's extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Attribute indices treated as solid
    pub solid_attributes: Vec<usize>,
    /// Hull scan tally
    pub hulls: ShapeScan,
    /// Mesh scan tally
    pub meshes: ShapeScan,
    /// Zero-area triangles in the stream
    pub degenerate: usize,
}

impl ExtractionReport {
    /// Total triangles produced
    pub fn triangles(&self) -> usize {
        self.hulls.triangles + self.meshes.triangles
    }

    /// Shapes rejected with a fault
    pub fn faulted(&self) -> usize {
        self.hulls.faulted + self.meshes.faulted
    }
}

/// Triangles of one document plus how they were found
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Hull triangles followed by mesh triangles
    pub triangles: TriangleStream,
    /// Scan summary
    pub report: ExtractionReport,
}

/// Extract solid collision triangles from a parsed document
pub fn extract_triangles(doc: &Document) -> Extraction {
    let solid = classify_collision_attributes(doc);
    let mut triangles = TriangleStream::new();

    let hulls = reconstruct_hulls(doc, &solid, &mut triangles);
    let meshes = reconstruct_meshes(doc, &solid, &mut triangles);

    let report = ExtractionReport {
        solid_attributes: solid.iter().collect(),
        hulls,
        meshes,
        degenerate: triangles.degenerate_count(),
    };

    log::debug!(
        "Hulls processed: {}/{}, meshes processed: {}/{}, {} triangles",
        report.hulls.processed,
        report.hulls.scanned,
        report.meshes.processed,
        report.meshes.scanned,
        report.triangles()
    );
    if report.faulted() > 0 {
        log::warn!("{} shape(s) skipped due to faults", report.faulted());
    }

    Extraction { triangles, report }
}

/// Parse physics text and extract its triangles
pub fn extract_from_text(text: &str) -> Extraction {
    extract_triangles(&Document::parse(text))
}

/// Errors for one entity
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The physics text could not be produced
    #[error("Physics source error: {0}")]
    Source(#[from] SourceError),

    /// Output could not be written
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

/// What was written for one entity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityOutput {
    /// Path of the `.vphys` dump, if written
    pub vphys_path: Option<PathBuf>,
    /// Path of the `.tri` file, if written
    pub tri_path: Option<PathBuf>,
    /// Extraction summary, when triangles were extracted
    pub report: Option<ExtractionReport>,
}

/// Runs extraction for named entities and writes their outputs
pub struct Extractor<S: PhysicsTextSource> {
    source: S,
    writer: OutputWriter,
}

impl<S: PhysicsTextSource> Extractor<S> {
    /// Create an extractor reading through `source` and writing per `output`
    pub fn new(source: S, output: &OutputConfig) -> Self {
        Self {
            source,
            writer: OutputWriter::new(output),
        }
    }

    /// Output writer in use
    pub fn writer(&self) -> &OutputWriter {
        &self.writer
    }

    /// Render a compiled resource through the source and process it
    pub fn process_resource(&self, name: &str, resource_bytes: &[u8]) -> Result<EntityOutput, ExtractError> {
        let text = self.source.render_physics_text(resource_bytes)?;
        Ok(self.process_text(name, &text)?)
    }

    /// Process physics text for entity `name`
    ///
    /// The `.vphys` dump gets `text` exactly as given. Triangle extraction
    /// skips a leading byte order mark, and blank text only logs a warning.
    pub fn process_text(&self, name: &str, text: &str) -> Result<EntityOutput, OutputError> {
        let mut output = EntityOutput::default();

        if let Some(path) = self.writer.write_vphys(name, text)? {
            log::info!("Written: {}", path.display());
            output.vphys_path = Some(path);
        }

        if !self.writer.writes_tri() {
            return Ok(output);
        }

        let body = text.strip_prefix('\u{feff}').unwrap_or(text);
        if body.trim().is_empty() {
            log::warn!("PHYS data is empty for {name}, no triangles extracted");
            return Ok(output);
        }

        let extraction = extract_from_text(body);
        match self.writer.write_tri(name, &extraction.triangles)? {
            Some(path) => {
                log::info!("Written: {} ({} triangles)", path.display(), extraction.triangles.len());
                output.tri_path = Some(path);
            }
            None => log::warn!("No collision triangles found for {name}"),
        }
        output.report = Some(extraction.report);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::RenderedTextSource;

    #[test]
    fn test_empty_document_extracts_nothing() {
        let extraction = extract_from_text("{ }");
        assert!(extraction.triangles.is_empty());
        assert_eq!(extraction.report.solid_attributes, vec![0]);
        assert_eq!(extraction.report.triangles(), 0);
    }

    #[test]
    fn test_zero_solid_shapes_writes_vphys_only() {
        let dir = std::env::temp_dir().join(format!("vphys-extract-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let config = OutputConfig {
            mode: OutputMode::Both,
            tri_dir: dir.clone(),
            vphys_dir: dir.clone(),
        };
        let extractor = Extractor::new(RenderedTextSource, &config);
        let text = "{ m_collisionAttributes = [ { m_CollisionGroupString = \"default\" } ] \
                    m_parts = [ { m_rnShape = { m_hulls = [ { m_nCollisionAttributeIndex = 3 } ] } } ] }";

        let output = extractor.process_resource("de_none", text.as_bytes()).unwrap();

        assert_eq!(output.vphys_path, Some(dir.join("de_none.vphys")));
        assert_eq!(output.tri_path, None);
        assert!(!dir.join("de_none.tri").exists());
        let report = output.report.unwrap();
        assert_eq!(report.hulls.scanned, 1);
        assert_eq!(report.hulls.filtered, 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    fn scratch_config(tag: &str, mode: OutputMode) -> (PathBuf, OutputConfig) {
        let dir = std::env::temp_dir().join(format!("vphys-extract-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let config = OutputConfig {
            mode,
            tri_dir: dir.clone(),
            vphys_dir: dir.clone(),
        };
        (dir, config)
    }

    #[test]
    fn test_vphys_keeps_byte_order_mark() {
        let (dir, config) = scratch_config("bom", OutputMode::Both);
        let extractor = Extractor::new(RenderedTextSource, &config);
        let text = "\u{feff}{ m_parts = [ { m_rnShape = { m_meshes = [ { m_nCollisionAttributeIndex = 0 \
                    m_Mesh = { m_Triangles = #[ 00 00 00 00 00 00 00 00 00 00 00 00 ] \
                    m_Vertices = #[ 00 00 80 3F 00 00 00 40 00 00 40 40 ] } } ] } } ] }";

        let output = extractor.process_resource("de_bom", text.as_bytes()).unwrap();

        let written = std::fs::read(output.vphys_path.unwrap()).unwrap();
        assert_eq!(written, text.as_bytes());
        // the mark does not hide the document from the parser
        assert_eq!(output.report.unwrap().meshes.processed, 1);
        assert!(output.tri_path.is_some());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_blank_input_still_dumped() {
        let (dir, config) = scratch_config("blank", OutputMode::Both);
        let extractor = Extractor::new(RenderedTextSource, &config);

        let output = extractor.process_resource("de_blank", b"\n").unwrap();

        assert_eq!(std::fs::read(dir.join("de_blank.vphys")).unwrap(), b"\n");
        assert_eq!(output.tri_path, None);
        assert_eq!(output.report, None);
        assert!(!dir.join("de_blank.tri").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_source_errors_surface() {
        let extractor = Extractor::new(RenderedTextSource, &OutputConfig::default());
        assert!(matches!(
            extractor.process_resource("x", &[0xC3, 0x28]),
            Err(ExtractError::Source(SourceError::InvalidData(_)))
        ));
    }
}
