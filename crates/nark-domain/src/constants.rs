//! Domain layer constants

/// Cache key used for the single shared instance of a singleton binding
pub const MAIN_INSTANCE_KEY: &str = "main";

/// Default bound on object-graph depth for a single resolution pass
pub const DEFAULT_MAX_RESOLVE_DEPTH: usize = 64;

/// Maximum number of names a bitflag set can hold (one bit each in a `u64`)
pub const MAX_FLAG_COUNT: usize = 64;
