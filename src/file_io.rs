//! File I/O utilities with atomic writes
//!
//! Documents (settings, scenarios, exports) are JSON or YAML, picked by file
//! extension. Writes go to a temp file first and are renamed into place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{PolicyError, PolicyResult};

/// Serialization format of a document on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from the file extension (`.json`, `.yaml`, `.yml`)
    pub fn from_path(path: &Path) -> PolicyResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(PolicyError::Validation(format!(
                "Cannot tell the format of {}; use a .json, .yaml or .yml file",
                path.display()
            ))),
        }
    }
}

/// Read a JSON or YAML document, returning an error if the file doesn't exist
pub fn read_document<T, P>(path: P) -> PolicyResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;

    if !path.exists() {
        return Err(PolicyError::Io(format!("File not found: {}", path.display())));
    }

    let file = File::open(path)
        .map_err(|e| PolicyError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    match format {
        DocumentFormat::Json => serde_json::from_reader(reader).map_err(|e| {
            PolicyError::Json(format!("Failed to parse {}: {}", path.display(), e))
        }),
        DocumentFormat::Yaml => serde_yaml::from_reader(reader).map_err(|e| {
            PolicyError::Yaml(format!("Failed to parse {}: {}", path.display(), e))
        }),
    }
}

/// Write bytes to a file atomically (write to temp, then rename)
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> PolicyResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            PolicyError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let file = File::create(temp_path)
        .map_err(|e| PolicyError::Io(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .map_err(|e| PolicyError::Io(format!("Failed to write data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| PolicyError::Io(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| PolicyError::Io(format!("Failed to sync data: {}", e)))?;

    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        PolicyError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
