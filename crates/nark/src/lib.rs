//! # nark
//!
//! Capability-based dependency injection plus a handful of small helpers.
//!
//! This crate is the public facade: it re-exports the domain types
//! (capabilities, policies, errors, enumerations and bitflags) and the
//! infrastructure that works with them (scopes, configuration, logging and
//! utilities).
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use nark::{Dependency, Implementation, Injectable, Injector, Result, Scope};
//!
//! pub trait IPrinter: Send + Sync {
//!     fn prints(&self, message: &str) -> String;
//! }
//! nark::capability!(IPrinter { prints });
//!
//! #[derive(Default)]
//! struct Printer;
//! impl Injectable for Printer {}
//! impl IPrinter for Printer {
//!     fn prints(&self, message: &str) -> String {
//!         format!("> {message}")
//!     }
//! }
//! nark::component!(Printer { prints });
//!
//! #[derive(Default)]
//! struct Report {
//!     printer: Dependency<dyn IPrinter>,
//! }
//! impl Injectable for Report {
//!     fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
//!         injector.field("printer", &mut self.printer)
//!     }
//! }
//!
//! let mut scope = Scope::new();
//! scope.register(
//!     Implementation::<Printer>::builder()
//!         .implements::<dyn IPrinter>(|p| p)
//!         .build()?,
//! );
//!
//! let report: Report = scope.build()?;
//! assert_eq!(report.printer.require()?.prints("hi"), "> hi");
//! # Ok::<(), nark::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - `domain` - capability identity, policies, enumerations and the error taxonomy
//! - `infrastructure` - the scope and resolver, config, logging and utilities

/// Domain layer - capability identity, policies, flags and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use nark_domain::*;
}

/// Infrastructure layer - IoC scope, config, logging and utilities
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use nark_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the IoC entry points at the crate root
pub use infrastructure::ioc::{
    BindingInfo, Component, Dependency, Implementation, Injectable, Injector, Scope,
    ValidatedImplementation,
};

// Re-export helpers at the crate root
pub use infrastructure::utils::{Assets, Dynamic};

pub use nark_domain::capability;
pub use nark_infrastructure::component;
