//! Index command
//!
//! Usage: docaudit index --schema <FILE> [--output <FILE>]

use super::{emit, CommandResult};
use clap::Args;
use docaudit_core::metadata::extract_field_metadata_with_depth;
use docaudit_core::schema::load_fields_file_with_depth;
use docaudit_core::AuditPluginConfig;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Field schema (JSON or YAML)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute index command
pub fn execute(args: IndexArgs, config: &AuditPluginConfig) -> CommandResult {
    let fields = load_fields_file_with_depth(&args.schema, config.max_depth)?;
    let index = extract_field_metadata_with_depth(&fields, config.max_depth)?;
    let json = serde_json::to_string_pretty(&index)?;
    emit(&json, args.output.as_ref())
}
