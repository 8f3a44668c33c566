//! CLI command handlers
//!
//! Bridges clap argument parsing with the policy services. Handlers read
//! inputs from scenario files and flags, run the engine and either print a
//! terminal table or export the result.

pub mod allocate;
pub mod catalog;
pub mod config;
pub mod rebalance;

pub use allocate::{handle_allocate_command, AllocateArgs};
pub use catalog::{handle_glide_path_command, handle_rules_command, handle_strategies_command, GlidePathArgs};
pub use config::{handle_config_command, ConfigCommands};
pub use rebalance::{handle_rebalance_command, RebalanceArgs};

use clap::Args;
use std::io::{self, Write};
use tracing::info;
use std::path::PathBuf;

use crate::error::{PolicyError, PolicyResult};
use crate::export::ExportFormat;
use crate::file_io::write_atomic;

/// Where and how to write a result instead of the terminal table
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Export format (prints a table when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Output file path (stdout when omitted)
    #[arg(short, long, requires = "format")]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    /// Render with `export` and send the bytes to the file or stdout
    pub(crate) fn write_with<F>(&self, format: ExportFormat, export: F) -> PolicyResult<()>
    where
        F: FnOnce(&mut Vec<u8>) -> PolicyResult<()>,
    {
        let mut buffer = Vec::new();
        export(&mut buffer)?;

        match &self.output {
            Some(path) => {
                write_atomic(path, &buffer).map_err(|e| {
                    PolicyError::Export(format!("Failed to write {}: {}", path.display(), e))
                })?;
                info!(path = %path.display(), ?format, "exported");
                println!("Exported to: {}", path.display());
                Ok(())
            }
            None => io::stdout()
                .lock()
                .write_all(&buffer)
                .map_err(|e| PolicyError::Export(e.to_string())),
        }
    }
}
