//! # Infrastructure Layer
//!
//! The capability scope and resolver, plus the cross-cutting concerns that
//! support it.
//!
//! ## Module Categories
//!
//! ### Dependency Injection
//! | Module | Description |
//! |--------|-------------|
//! | [`ioc`] | Validated implementations, scopes, policies and the resolver |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML and environment configuration through Figment |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//!
//! ### Helpers
//! | Module | Description |
//! |--------|-------------|
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`utils`] | Assets, commands, dynamic containers and time conversions |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod ioc;
pub mod logging;
pub mod utils;

// Re-export commonly used types
pub use error_ext::ErrorContext;
pub use ioc::{
    Component, Dependency, Implementation, Injectable, Injector, Scope, ValidatedImplementation,
};
pub use logging::LogHandle;
pub use utils::TimedOperation;
