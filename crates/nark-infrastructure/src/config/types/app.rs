//! Top-level configuration

use nark_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};

use super::{AssetsConfig, LoggingConfig, ScopeConfig};
use crate::logging::parse_log_level;

/// Complete nark configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarkConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Defaults for new scopes
    pub scope: ScopeConfig,

    /// Asset resolution
    pub assets: AssetsConfig,
}

impl NarkConfig {
    /// Reject values that would fail later at runtime
    pub fn validate(&self) -> Result<()> {
        parse_log_level(&self.logging.level)?;
        if self.scope.max_depth == 0 {
            return Err(Error::configuration("scope.max_depth cannot be 0"));
        }
        Ok(())
    }
}
