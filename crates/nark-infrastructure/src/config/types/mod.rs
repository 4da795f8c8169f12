//! Configuration types module

pub mod app;
pub mod assets;
pub mod logging;
pub mod scope;

// Re-export main types
pub use app::NarkConfig;
pub use assets::AssetsConfig;
pub use logging::LoggingConfig;
pub use scope::ScopeConfig;
