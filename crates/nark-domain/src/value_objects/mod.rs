//! Value objects
//!
//! Immutable values shared between the IoC engine and its callers.

pub mod capability;
pub mod flags;
pub mod policy;

pub use capability::{CapabilityContract, CapabilityId, OperationSignature};
pub use flags::{Enumeration, EnumerationBuilder, Flag, FlagSet};
pub use policy::{InstanceKey, ResolutionPolicy, WorkerId};
