pub mod diff;
pub mod index;
pub mod redact;
pub mod stamp;

use docaudit_core::AuditPluginConfig;
use serde_json::Value;
use std::path::{Path, PathBuf};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

pub fn load_config(path: Option<&Path>) -> Result<AuditPluginConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(AuditPluginConfig::load(path)?),
        None => Ok(AuditPluginConfig::default()),
    }
}

/// Read a JSON document; `None` stands for an absent snapshot.
pub fn read_json(path: Option<&Path>) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Write to `output` if given, otherwise to stdout.
pub fn emit(content: &str, output: Option<&PathBuf>) -> CommandResult {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            println!("✓ Written to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
