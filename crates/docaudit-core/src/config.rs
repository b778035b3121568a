//! Plugin configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! excluded_collections = ["media"]
//! excluded_globals = []
//! username_field = "email"
//! max_depth = 64
//!
//! [full_audits]
//! disabled = false
//! excluded_collections = ["sessions"]
//! excluded_globals = ["footer"]
//! ```
//!
//! Every key is optional. Exclusion at the top level removes a collection or
//! global from both bookkeeping stamps and full audits; `full_audits` only
//! controls whether change diffs are enqueued.

use crate::audit::fields::{AUDIT_LOGS_SLUG, DEFAULT_USERNAME_FIELD};
use crate::diff::model::{DiffOptions, DEFAULT_MAX_DEPTH};
use crate::errors::{AuditError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Switches for full change auditing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullAuditConfig {
    pub disabled: bool,
    pub excluded_collections: Vec<String>,
    pub excluded_globals: Vec<String>,
}

/// Options for the audit plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditPluginConfig {
    pub excluded_collections: Vec<String>,
    pub excluded_globals: Vec<String>,
    pub full_audits: FullAuditConfig,
    /// User attribute used as the display name in `createdBy`/`updatedBy`.
    pub username_field: String,
    pub max_depth: usize,
}

impl Default for AuditPluginConfig {
    fn default() -> Self {
        Self {
            excluded_collections: Vec::new(),
            excluded_globals: Vec::new(),
            full_audits: FullAuditConfig::default(),
            username_field: DEFAULT_USERNAME_FIELD.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AuditPluginConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on malformed TOML, an empty `username_field`, or a
    /// zero `max_depth`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| AuditError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.username_field.trim().is_empty() {
            return Err(AuditError::InvalidConfig {
                reason: "username_field must not be empty".to_string(),
            });
        }
        if self.max_depth == 0 {
            return Err(AuditError::InvalidConfig {
                reason: "max_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Whether documents of this collection get audit bookkeeping fields.
    ///
    /// The audit log collection itself is never stamped.
    pub fn stamps_collection(&self, slug: &str) -> bool {
        slug != AUDIT_LOGS_SLUG && !contains(&self.excluded_collections, slug)
    }

    /// Whether changes to this collection are enqueued as audit jobs.
    pub fn audits_collection(&self, slug: &str) -> bool {
        self.stamps_collection(slug)
            && !self.full_audits.disabled
            && !contains(&self.full_audits.excluded_collections, slug)
    }

    /// Whether this global gets audit bookkeeping fields.
    pub fn stamps_global(&self, slug: &str) -> bool {
        !contains(&self.excluded_globals, slug)
    }

    /// Whether changes to this global are enqueued as audit jobs.
    pub fn audits_global(&self, slug: &str) -> bool {
        self.stamps_global(slug)
            && !self.full_audits.disabled
            && !contains(&self.full_audits.excluded_globals, slug)
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            max_depth: self.max_depth,
        }
    }
}

fn contains(list: &[String], slug: &str) -> bool {
    list.iter().any(|s| s == slug)
}
