//! Asset resolution configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Base directory for `Assets::from_config`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Root directory; the current directory when unset
    pub base: Option<PathBuf>,
}
