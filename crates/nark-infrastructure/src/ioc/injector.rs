//! Resolution pass state
//!
//! An [`Injector`] is created by a [`Scope`] for one resolution pass. It
//! tracks the worker identity, the owner of the field being resolved and the
//! stack of capabilities under construction, which is how cycles are found.
//!
//! Each walk carries a [`PassMark`]. Slots filled by the walk are tagged with
//! it, so a failed walk is undone by aborting the mark instead of visiting
//! the object graph again.

use std::sync::Arc;

use nark_domain::error::{Error, Result};
use nark_domain::ports::Capability;
use nark_domain::value_objects::{CapabilityId, WorkerId};
use tracing::warn;

use super::dependency::{Dependency, Injectable, PassMark};
use super::scope::Scope;
use super::short_type_name;

/// One resolution pass over an object graph
pub struct Injector<'s> {
    scope: &'s Scope,
    worker: WorkerId,
    stack: Vec<CapabilityId>,
    owner: &'static str,
    pass: PassMark,
}

impl<'s> Injector<'s> {
    pub(crate) fn new(scope: &'s Scope, worker: WorkerId) -> Self {
        Self {
            scope,
            worker,
            stack: Vec::new(),
            owner: "<root>",
            pass: PassMark::new(),
        }
    }

    /// Worker identity used for per-thread bindings
    pub fn worker(&self) -> &WorkerId {
        &self.worker
    }

    /// Number of capabilities currently under construction
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Resolve capability `C` from the owning scope
    pub fn resolve<C: Capability + ?Sized>(&mut self) -> Result<Arc<C>> {
        let scope = self.scope;
        scope.resolve_in::<C>(self)
    }

    /// Resolve a pending field in place
    ///
    /// Provided and already injected values are left untouched. A failure is
    /// reported as `Error::Resolution` naming the owner type and `name`.
    pub fn field<C: Capability + ?Sized>(
        &mut self,
        name: &str,
        slot: &mut Dependency<C>,
    ) -> Result<()> {
        if !slot.is_pending() {
            return Ok(());
        }
        let owner = self.owner;
        let instance = self.resolve::<C>().map_err(|source| {
            warn!(owner, field = name, capability = C::NAME, error = %source, "Field resolution failed");
            Error::resolution(owner, name, C::NAME, source)
        })?;
        slot.inject(instance, self.pass.clone());
        Ok(())
    }

    /// Walk a nested injectable value
    pub fn inject<T: Injectable + ?Sized>(&mut self, target: &mut T) -> Result<()> {
        let previous = std::mem::replace(&mut self.owner, short_type_name::<T>());
        let result = target.inject(self);
        self.owner = previous;
        result
    }

    /// Resolve `target`, or return every slot injected by this walk to pending
    ///
    /// Slots filled by earlier walks and provided values are not affected.
    pub(crate) fn inject_atomic<T: Injectable + ?Sized>(&mut self, target: &mut T) -> Result<()> {
        let result = self.inject(target);
        if result.is_err() {
            self.pass.abort();
        }
        result
    }

    /// Inject a freshly created instance under its own pass
    ///
    /// The instance commits on success even if the enclosing walk fails
    /// later, since it may already be cached by its binding.
    pub(crate) fn inject_instance<T: Injectable + ?Sized>(&mut self, target: &mut T) -> Result<()> {
        let outer = std::mem::replace(&mut self.pass, PassMark::new());
        let result = self.inject_atomic(target);
        self.pass = outer;
        result
    }

    /// Run `construct` with `capability` marked as under construction
    pub(crate) fn enter<T>(
        &mut self,
        capability: CapabilityId,
        max_depth: usize,
        construct: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if self.stack.contains(&capability) {
            let chain = self
                .stack
                .iter()
                .chain(std::iter::once(&capability))
                .map(|id| id.name().to_string())
                .collect();
            return Err(Error::CyclicDependency { chain });
        }
        if self.stack.len() >= max_depth {
            return Err(Error::DepthExceeded {
                depth: max_depth,
                capability: capability.name().to_string(),
            });
        }
        self.stack.push(capability);
        let owner = self.owner;
        let result = construct(self);
        self.owner = owner;
        self.stack.pop();
        result
    }
}
