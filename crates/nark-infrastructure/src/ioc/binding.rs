//! Bindings and their instance caches

use std::sync::Arc;

use dashmap::DashMap;
use nark_domain::error::{Error, Result};
use nark_domain::ports::Capability;
use nark_domain::value_objects::{CapabilityId, InstanceKey, ResolutionPolicy};

use super::implementation::{Caster, ErasedInstance, Factory, ValidatedImplementation};
use super::injector::Injector;

/// One registered implementation with its policy and cached instances
///
/// Shared by every capability the implementation was registered for, so a
/// singleton satisfying two capabilities is a single object.
pub(crate) struct Registration {
    pub(crate) implementation: &'static str,
    pub(crate) policy: ResolutionPolicy,
    factory: Factory,
    instances: DashMap<InstanceKey, ErasedInstance>,
}

impl Registration {
    pub(crate) fn new(implementation: &ValidatedImplementation, policy: ResolutionPolicy) -> Self {
        Self {
            implementation: implementation.name(),
            policy,
            factory: Arc::clone(&implementation.factory),
            instances: DashMap::new(),
        }
    }

    /// Instance for the injector's worker, constructing it when needed
    ///
    /// No cache lock is held while the implementation is constructed; when
    /// two workers race on the same key the first stored instance wins.
    pub(crate) fn instance(
        &self,
        injector: &mut Injector<'_>,
        capability: CapabilityId,
        max_depth: usize,
    ) -> Result<ErasedInstance> {
        let key = InstanceKey::for_policy(self.policy, injector.worker());
        if let Some(key) = &key {
            if let Some(existing) = self.instances.get(key) {
                return Ok(Arc::clone(existing.value()));
            }
        }
        let created = injector.enter(capability, max_depth, |injector| (self.factory)(injector))?;
        match key {
            None => Ok(created),
            Some(key) => Ok(Arc::clone(self.instances.entry(key).or_insert(created).value())),
        }
    }

    pub(crate) fn cached(&self) -> usize {
        self.instances.len()
    }

    pub(crate) fn clear(&self) {
        self.instances.clear();
    }
}

/// Capability to registration mapping entry
#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) registration: Arc<Registration>,
    caster: Arc<dyn std::any::Any + Send + Sync>,
}

impl Binding {
    pub(crate) fn new(
        registration: Arc<Registration>,
        caster: Arc<dyn std::any::Any + Send + Sync>,
    ) -> Self {
        Self {
            registration,
            caster,
        }
    }

    /// Convert an erased instance of this binding into capability `C`
    pub(crate) fn cast<C: Capability + ?Sized>(&self, instance: ErasedInstance) -> Result<Arc<C>> {
        let caster = self.caster.downcast_ref::<Caster<C>>().ok_or_else(|| {
            Error::internal(format!(
                "binding for '{}' holds a caster for another capability",
                C::NAME
            ))
        })?;
        caster(instance).ok_or_else(|| {
            Error::internal(format!(
                "instance of '{}' could not be viewed as '{}'",
                self.registration.implementation,
                C::NAME
            ))
        })
    }
}

/// Read-only view of a binding, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingInfo {
    /// Bound capability
    pub capability: CapabilityId,
    /// Implementation type name
    pub implementation: &'static str,
    /// Resolution policy
    pub policy: ResolutionPolicy,
    /// Instances currently cached for the implementation
    pub cached_instances: usize,
}
