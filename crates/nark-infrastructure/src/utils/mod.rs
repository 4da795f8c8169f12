//! Utility helpers
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`assets`] | Path resolution under a base directory |
//! | [`command`] | `which` and a checked command runner |
//! | [`dynamic`] | Nested attribute container backed by JSON values |
//! | [`time`] | UTC timestamp conversions |
//! | [`timing`] | Elapsed-time measurement for diagnostics |

pub mod assets;
pub mod command;
pub mod dynamic;
pub mod time;
pub mod timing;

pub use assets::Assets;
pub use command::{can_run, run, which};
pub use dynamic::{Dynamic, Entry};
pub use timing::TimedOperation;
