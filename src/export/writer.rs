use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use log::info;
use serde::Serialize;

/// Writes summary documents under a single output directory, one file per
/// logical document
pub struct DocumentWriter {
    dir: PathBuf,
}

impl DocumentWriter {
    /// Create the output directory up front; failure is fatal for the run
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let dir = dir.into();

        fs::create_dir_all(&dir).map_err(|source| ExportError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;

        Ok(Self { dir })
    }

    /// The directory documents are written under
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Serialize one document as pretty-printed JSON
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(name);

        let file = File::create(&path).map_err(|source| ExportError::Write {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::to_writer_pretty(file, value).map_err(|source| ExportError::Serialize {
            path: path.display().to_string(),
            source,
        })?;

        info!("wrote {}", path.display());

        Ok(path)
    }

    /// Write a flat companion export for tabular documents
    pub fn write_csv(
        &self,
        name: &str,
        headers: &[&str],
        rows: &[Vec<String>],
    ) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(name);

        let mut writer = csv::Writer::from_path(&path).map_err(|source| ExportError::Csv {
            path: path.display().to_string(),
            source,
        })?;

        writer
            .write_record(headers)
            .and_then(|_| {
                for row in rows {
                    writer.write_record(row)?;
                }

                writer.flush().map_err(csv::Error::from)
            })
            .map_err(|source| ExportError::Csv {
                path: path.display().to_string(),
                source,
            })?;

        info!("wrote {}", path.display());

        Ok(path)
    }
}

/// Export Error
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// The output directory could not be created
    #[error("unable to create output directory {path}: {source}")]
    CreateDir {
        /// The directory that was requested
        path: String,

        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A document file could not be created
    #[error("unable to write {path}: {source}")]
    Write {
        /// The file that was requested
        path: String,

        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A document could not be serialized
    #[error("unable to serialize {path}: {source}")]
    Serialize {
        /// The file that was requested
        path: String,

        /// The underlying serialization error
        source: serde_json::Error,
    },

    /// A companion CSV export failed
    #[error("unable to write {path}: {source}")]
    Csv {
        /// The file that was requested
        path: String,

        /// The underlying CSV error
        source: csv::Error,
    },
}
