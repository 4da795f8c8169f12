//! Capability identity and contract values

use std::any::TypeId;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::ports::Capability;

/// Pass/fail map for every operation a capability requires
pub type OperationSignature = BTreeMap<String, bool>;

/// Stable identity of a capability
///
/// Equality and hashing use the `TypeId` of the capability type; the name is
/// carried along for messages only.
#[derive(Clone, Copy)]
pub struct CapabilityId {
    type_id: TypeId,
    name: &'static str,
}

impl CapabilityId {
    /// Identity of the capability type `C` (usually a `dyn Trait`)
    pub fn of<C: Capability + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name: C::NAME,
        }
    }

    /// Human-readable capability name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Underlying type identity
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl PartialEq for CapabilityId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CapabilityId {}

impl Hash for CapabilityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilityId").field(&self.name).finish()
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Runtime description of a capability: its identity and required operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityContract {
    /// Capability identity
    pub id: CapabilityId,
    /// Operation names every implementation must provide
    pub operations: &'static [&'static str],
}

impl CapabilityContract {
    /// Contract of the capability type `C`
    pub fn of<C: Capability + ?Sized>() -> Self {
        Self {
            id: CapabilityId::of::<C>(),
            operations: C::OPERATIONS,
        }
    }

    /// Check a set of provided operation names against this contract
    ///
    /// Every required operation appears in the result, mapped to whether it
    /// is present in `provided`. Names that are only provided are ignored.
    pub fn check(&self, provided: &[&str]) -> OperationSignature {
        self.operations
            .iter()
            .map(|name| ((*name).to_string(), provided.contains(name)))
            .collect()
    }

    /// Whether `provided` covers every required operation
    pub fn is_satisfied_by(&self, provided: &[&str]) -> bool {
        self.operations.iter().all(|name| provided.contains(name))
    }
}
