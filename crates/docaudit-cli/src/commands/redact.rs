//! Redact command
//!
//! Usage: docaudit redact <FILE> [--key <KEY>]...

use super::{emit, read_json, CommandResult};
use clap::Args;
use docaudit_core::redact_keys;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RedactArgs {
    /// JSON document to redact
    pub file: PathBuf,

    /// Additional key to redact (repeatable)
    #[arg(short, long = "key")]
    pub keys: Vec<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute redact command
pub fn execute(args: RedactArgs) -> CommandResult {
    let Some(doc) = read_json(Some(args.file.as_path()))? else {
        return Err("no document".into());
    };
    let redacted = redact_keys(&doc, &args.keys);
    emit(&serde_json::to_string_pretty(&redacted)?, args.output.as_ref())
}
