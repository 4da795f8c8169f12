//! Port traits
//!
//! Interfaces the IoC engine is written against. Concrete implementations
//! and the engine itself live in `nark-infrastructure`.

pub mod capability;

pub use capability::Capability;
