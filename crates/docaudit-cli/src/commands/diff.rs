//! Diff command
//!
//! Usage: docaudit diff --schema <FILE> [--before <FILE>] [--after <FILE>] [--summary]
//!
//! A missing `--before` is a creation, a missing `--after` a deletion.

use super::{emit, read_json, CommandResult};
use clap::Args;
use docaudit_core::diff::{compute_audit_diff_with, render_human_summary, DiffOptions};
use docaudit_core::metadata::extract_field_metadata_with_depth;
use docaudit_core::schema::load_fields_file_with_depth;
use docaudit_core::AuditPluginConfig;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Field schema (JSON or YAML)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Snapshot before the change
    #[arg(short, long)]
    pub before: Option<PathBuf>,

    /// Snapshot after the change
    #[arg(short, long)]
    pub after: Option<PathBuf>,

    /// Override the configured maximum nesting depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Print a Markdown summary instead of JSON
    #[arg(long)]
    pub summary: bool,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute diff command
pub fn execute(args: DiffArgs, config: &AuditPluginConfig) -> CommandResult {
    let options = DiffOptions {
        max_depth: args.max_depth.unwrap_or(config.max_depth),
    };

    let fields = load_fields_file_with_depth(&args.schema, options.max_depth)?;
    let index = extract_field_metadata_with_depth(&fields, options.max_depth)?;

    let before = read_json(args.before.as_deref())?;
    let after = read_json(args.after.as_deref())?;
    let diff = compute_audit_diff_with(before.as_ref(), after.as_ref(), &index, &options)?;

    let rendered = if args.summary {
        render_human_summary(&diff)
    } else {
        serde_json::to_string_pretty(&diff)?
    };
    emit(&rendered, args.output.as_ref())
}
