//! Output files: `{name}.vphys` text dumps and `{name}.tri` triangle soups

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tri_format::write_triangles;
use crate::config::OutputConfig;
use crate::physics::TriangleStream;

/// Which files an extraction run writes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Both `.tri` and `.vphys`
    #[default]
    Both,
    /// `.tri` only
    Tri,
    /// `.vphys` only
    #[serde(alias = "raw")]
    Vphys,
}

impl OutputMode {
    /// Whether triangle files are written
    pub fn writes_tri(self) -> bool {
        matches!(self, Self::Both | Self::Tri)
    }

    /// Whether raw text dumps are written
    pub fn writes_vphys(self) -> bool {
        matches!(self, Self::Both | Self::Vphys)
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "both" => Ok(Self::Both),
            "tri" => Ok(Self::Tri),
            "vphys" | "raw" => Ok(Self::Vphys),
            other => Err(format!("unknown output mode '{other}' (expected both, tri or vphys)")),
        }
    }
}

/// Output errors
#[derive(Error, Debug)]
pub enum OutputError {
    /// Entity name cannot be used as a file stem
    #[error("Invalid entity name: {0:?}")]
    InvalidName(String),

    /// Target directory does not exist
    #[error("Output directory not found: {0}")]
    MissingDirectory(PathBuf),

    /// Writing a file failed
    #[error("Failed to write {path}: {source}")]
    Io {
        /// File being written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

/// Writes extraction results into the configured directories
#[derive(Debug, Clone)]
pub struct OutputWriter {
    tri_dir: Option<PathBuf>,
    vphys_dir: Option<PathBuf>,
}

impl OutputWriter {
    /// Writer for the directories enabled by `config.mode`
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            tri_dir: config.mode.writes_tri().then(|| config.tri_dir.clone()),
            vphys_dir: config.mode.writes_vphys().then(|| config.vphys_dir.clone()),
        }
    }

    /// Whether triangle files are written
    pub fn writes_tri(&self) -> bool {
        self.tri_dir.is_some()
    }

    /// Whether raw text dumps are written
    pub fn writes_vphys(&self) -> bool {
        self.vphys_dir.is_some()
    }

    /// Check that every enabled directory exists
    pub fn validate(&self) -> Result<(), OutputError> {
        for dir in self.tri_dir.iter().chain(self.vphys_dir.iter()) {
            if !dir.is_dir() {
                return Err(OutputError::MissingDirectory(dir.clone()));
            }
        }
        Ok(())
    }

    /// Persist the physics text unchanged as `{name}.vphys`
    ///
    /// `Ok(None)` when raw output is disabled.
    pub fn write_vphys(&self, name: &str, text: &str) -> Result<Option<PathBuf>, OutputError> {
        let Some(dir) = &self.vphys_dir else {
            return Ok(None);
        };
        let path = output_path(dir, name, "vphys")?;

        std::fs::write(&path, text.as_bytes()).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Some(path))
    }

    /// Serialize the stream as `{name}.tri`
    ///
    /// Nothing is written for an empty stream; `Ok(None)` then, and also when
    /// triangle output is disabled.
    pub fn write_tri(&self, name: &str, triangles: &TriangleStream) -> Result<Option<PathBuf>, OutputError> {
        let Some(dir) = &self.tri_dir else {
            return Ok(None);
        };
        if triangles.is_empty() {
            return Ok(None);
        }
        let path = output_path(dir, name, "tri")?;

        let io_error = |source| OutputError::Io { path: path.clone(), source };
        let file = File::create(&path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        write_triangles(&mut writer, triangles).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
        Ok(Some(path))
    }
}

fn output_path(dir: &Path, name: &str, extension: &str) -> Result<PathBuf, OutputError> {
    let usable = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c| c == '/' || c == '\\');
    if !usable {
        return Err(OutputError::InvalidName(name.to_string()));
    }
    Ok(dir.join(format!("{name}.{extension}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::tri_format::{read_triangles, TRIANGLE_RECORD_SIZE};
    use crate::physics::Triangle;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vphys-output-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(mode: OutputMode, dir: &Path) -> OutputConfig {
        OutputConfig {
            mode,
            tri_dir: dir.to_path_buf(),
            vphys_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("both".parse::<OutputMode>(), Ok(OutputMode::Both));
        assert_eq!("TRI".parse::<OutputMode>(), Ok(OutputMode::Tri));
        assert_eq!("raw".parse::<OutputMode>(), Ok(OutputMode::Vphys));
        assert!("obj".parse::<OutputMode>().is_err());
    }

    #[test]
    fn test_writes_both_files() {
        let dir = scratch_dir("both");
        let writer = OutputWriter::new(&config(OutputMode::Both, &dir));
        let stream = TriangleStream::from(vec![Triangle::from_components([2.0; 9])]);

        let vphys = writer.write_vphys("de_test", "{ a = 1 }\n").unwrap().unwrap();
        let tri = writer.write_tri("de_test", &stream).unwrap().unwrap();

        assert_eq!(vphys, dir.join("de_test.vphys"));
        assert_eq!(std::fs::read_to_string(&vphys).unwrap(), "{ a = 1 }\n");

        let bytes = std::fs::read(&tri).unwrap();
        assert_eq!(bytes.len(), TRIANGLE_RECORD_SIZE);
        assert_eq!(read_triangles(&bytes), stream.as_slice());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_stream_writes_no_tri_file() {
        let dir = scratch_dir("empty");
        let writer = OutputWriter::new(&config(OutputMode::Tri, &dir));

        assert_eq!(writer.write_tri("de_empty", &TriangleStream::new()).unwrap(), None);
        assert!(!dir.join("de_empty.tri").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_disabled_outputs() {
        let dir = scratch_dir("disabled");
        let writer = OutputWriter::new(&config(OutputMode::Vphys, &dir));
        let stream = TriangleStream::from(vec![Triangle::from_components([1.0; 9])]);

        assert!(!writer.writes_tri());
        assert_eq!(writer.write_tri("x", &stream).unwrap(), None);
        assert!(writer.write_vphys("x", "{}").unwrap().is_some());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_names_and_missing_directory() {
        let dir = scratch_dir("invalid");
        let writer = OutputWriter::new(&config(OutputMode::Both, &dir));

        assert!(matches!(writer.write_vphys("../escape", "{}"), Err(OutputError::InvalidName(_))));
        assert!(matches!(writer.write_vphys("", "{}"), Err(OutputError::InvalidName(_))));
        assert!(writer.validate().is_ok());

        let missing = OutputWriter::new(&config(OutputMode::Both, &dir.join("nope")));
        assert!(matches!(missing.validate(), Err(OutputError::MissingDirectory(_))));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
