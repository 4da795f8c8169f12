//! # Domain Layer
//!
//! Core types shared by every nark crate. Nothing here performs I/O.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy and `Result` alias |
//! | [`value_objects`] | Capability identity, resolution policy, worker identity, enums and bitflags |
//! | [`ports`] | The [`Capability`](ports::Capability) trait and `capability!` macro |
//! | [`constants`] | Domain constants |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{BoxError, Error, Result};
pub use ports::Capability;
pub use value_objects::{
    CapabilityContract, CapabilityId, Enumeration, Flag, FlagSet, InstanceKey, ResolutionPolicy,
    WorkerId,
};
