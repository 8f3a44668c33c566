//! YAML Export functionality

use serde::Serialize;
use std::io::Write;

use super::json::{ExportEnvelope, ExportKind};
use crate::error::{PolicyError, PolicyResult};

/// Export `data` as YAML with a short comment header
pub fn export_yaml<T: Serialize, W: Write>(
    kind: ExportKind,
    data: &T,
    writer: &mut W,
) -> PolicyResult<()> {
    let envelope = ExportEnvelope::new(kind, data);

    let header = format!(
        "# budget-policy export\n# Generated: {}\n# App Version: {}\n\n",
        envelope.exported_at, envelope.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| PolicyError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &envelope).map_err(|e| PolicyError::Export(e.to_string()))?;

    Ok(())
}
