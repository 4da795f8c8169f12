//! Configuration
//!
//! TOML file and `NARK_`-prefixed environment variables merged over
//! defaults with Figment.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
