//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `nark_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "nark.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "nark";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "NARK";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_FILTER: &str = "NARK_LOG";

// ============================================================================
// COMMAND CONSTANTS
// ============================================================================

/// Environment variable searched by `which`
pub const PATH_ENV: &str = "PATH";
