//! Stamp command
//!
//! Usage: docaudit stamp <FILE> [--operation create|update] [--original <FILE>] [--user <FILE>]

use super::{emit, read_json, CommandResult};
use clap::{Args, ValueEnum};
use docaudit_core::audit::{stamp_audit_data, ChangeOperation};
use docaudit_core::AuditPluginConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OperationArg {
    Create,
    Update,
}

impl From<OperationArg> for ChangeOperation {
    fn from(op: OperationArg) -> Self {
        match op {
            OperationArg::Create => ChangeOperation::Create,
            OperationArg::Update => ChangeOperation::Update,
        }
    }
}

#[derive(Debug, Args)]
pub struct StampArgs {
    /// JSON document about to be written
    pub file: PathBuf,

    /// Write operation (default: update)
    #[arg(long, value_enum)]
    pub operation: Option<OperationArg>,

    /// Stored document before the write
    #[arg(long)]
    pub original: Option<PathBuf>,

    /// Authenticated user (JSON object)
    #[arg(long)]
    pub user: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute stamp command
pub fn execute(args: StampArgs, config: &AuditPluginConfig) -> CommandResult {
    let Some(mut data) = read_json(Some(args.file.as_path()))? else {
        return Err("no document".into());
    };
    let original = read_json(args.original.as_deref())?;
    let user = read_json(args.user.as_deref())?;

    stamp_audit_data(
        &mut data,
        args.operation.map(ChangeOperation::from),
        original.as_ref(),
        user.as_ref(),
        &config.username_field,
        chrono::Utc::now(),
    )?;

    emit(&serde_json::to_string_pretty(&data)?, args.output.as_ref())
}
