//! Rules configuration
//!
//! Table settings that change how rolls are read. These are passed explicitly
//! to the functions that need them; nothing here is process-wide state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Optional rules a table can switch on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Enable the special critical and hyper critical tiers for chances of 100% or more
    pub special_crit: bool,
}

impl RulesConfig {
    /// Create a config with every optional rule disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    ///
    /// Missing keys fall back to their defaults, unknown keys are rejected.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(?path, ?config, "Loaded rules config");
        Ok(config)
    }
}
