//! Scope configuration types

use nark_domain::constants::DEFAULT_MAX_RESOLVE_DEPTH;
use nark_domain::value_objects::ResolutionPolicy;
use serde::{Deserialize, Serialize};

/// Defaults applied by `Scope::from_config`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Policy used by `Scope::register`
    pub default_policy: ResolutionPolicy,

    /// Maximum object-graph depth of a single resolution pass
    pub max_depth: usize,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            default_policy: ResolutionPolicy::Singleton,
            max_depth: DEFAULT_MAX_RESOLVE_DEPTH,
        }
    }
}
