//! Implementation declaration and validation
//!
//! An implementation claims one or more capabilities through
//! [`ImplementationBuilder::implements`]. The cast closure handed to the
//! builder only compiles when the type really implements the capability
//! trait; `build()` then compares operation manifests once and returns a
//! [`ValidatedImplementation`], the only thing a [`Scope`](super::Scope)
//! accepts.
//!
//! ```
//! use nark_infrastructure::ioc::{Implementation, Injectable, Scope};
//!
//! pub trait IPrinter: Send + Sync {
//!     fn prints(&self, message: &str) -> String;
//! }
//! nark_domain::capability!(IPrinter { prints });
//!
//! #[derive(Default)]
//! struct Printer;
//! impl Injectable for Printer {}
//! impl IPrinter for Printer {
//!     fn prints(&self, message: &str) -> String {
//!         message.to_uppercase()
//!     }
//! }
//! nark_infrastructure::component!(Printer { prints });
//!
//! let printer = Implementation::<Printer>::builder()
//!     .implements::<dyn IPrinter>(|p| p)
//!     .build()?;
//! let mut scope = Scope::new();
//! scope.register(printer);
//! assert!(scope.contains::<dyn IPrinter>());
//! # Ok::<(), nark_domain::Error>(())
//! ```

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use nark_domain::error::{BoxError, Error, Result};
use nark_domain::ports::Capability;
use nark_domain::value_objects::{CapabilityContract, CapabilityId};
use tracing::{debug, warn};

use super::dependency::Injectable;
use super::injector::Injector;
use super::short_type_name;
use crate::utils::TimedOperation;

/// Type-erased, shareable instance as cached by a scope
pub(crate) type ErasedInstance = Arc<dyn Any + Send + Sync>;

/// Turns an erased instance back into the capability `C`
pub(crate) type Caster<C> = Arc<dyn Fn(ErasedInstance) -> Option<Arc<C>> + Send + Sync>;

/// Builds a fully injected instance of an implementation
pub(crate) type Factory = Arc<dyn Fn(&mut Injector<'_>) -> Result<ErasedInstance> + Send + Sync>;

/// A concrete type that can be bound to capabilities
///
/// `OPERATIONS` lists the operations the type exposes; `create` is its
/// initializer and may fail. Pending references in the new value are
/// resolved right after `create`, depth first.
pub trait Component: Injectable + Send + Sync + Sized + 'static {
    /// Operations exposed by this type
    const OPERATIONS: &'static [&'static str];

    /// Create a new, unresolved instance
    fn create() -> std::result::Result<Self, BoxError>;
}

/// Implement [`Component`] for a `Default` type, listing its operations
#[macro_export]
macro_rules! component {
    ($ty:ty { $($operation:ident),* $(,)? }) => {
        impl $crate::ioc::Component for $ty {
            const OPERATIONS: &'static [&'static str] = &[$(stringify!($operation)),*];

            fn create() -> ::std::result::Result<Self, $crate::ioc::BoxError> {
                Ok(<Self as ::std::default::Default>::default())
            }
        }
    };
}

/// Entry point for declaring an implementation
pub struct Implementation<I> {
    _marker: PhantomData<fn() -> I>,
}

impl<I: Component> Implementation<I> {
    /// Start declaring which capabilities `I` satisfies
    pub fn builder() -> ImplementationBuilder<I> {
        ImplementationBuilder {
            claims: Vec::new(),
            _marker: PhantomData,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Claim {
    pub(crate) contract: CapabilityContract,
    pub(crate) caster: Arc<dyn Any + Send + Sync>,
}

/// Collects capability claims for `I`
pub struct ImplementationBuilder<I> {
    claims: Vec<Claim>,
    _marker: PhantomData<fn() -> I>,
}

impl<I: Component> ImplementationBuilder<I> {
    /// Claim capability `C`; `cast` coerces the implementation to it
    ///
    /// `|p| p` is enough: the unsizing coercion is what proves `I: C`.
    /// Claiming the same capability twice keeps the last cast.
    #[must_use]
    pub fn implements<C: Capability + ?Sized>(
        mut self,
        cast: impl Fn(Arc<I>) -> Arc<C> + Send + Sync + 'static,
    ) -> Self {
        let caster: Caster<C> =
            Arc::new(move |erased: ErasedInstance| erased.downcast::<I>().ok().map(&cast));
        let contract = CapabilityContract::of::<C>();
        self.claims.retain(|claim| claim.contract.id != contract.id);
        self.claims.push(Claim {
            contract,
            caster: Arc::new(caster),
        });
        self
    }

    /// Validate the claims and produce a registrable implementation
    ///
    /// Fails with `Error::Validation` for the first claimed capability whose
    /// operations are not all exposed by `I`; its signature maps every
    /// required operation to whether it was found.
    pub fn build(self) -> Result<ValidatedImplementation> {
        let name = short_type_name::<I>();
        if self.claims.is_empty() {
            return Err(Error::invalid_argument(format!(
                "'{name}' does not claim any capability"
            )));
        }
        for claim in &self.claims {
            let signature = claim.contract.check(I::OPERATIONS);
            if signature.values().any(|present| !present) {
                warn!(
                    implementation = name,
                    capability = claim.contract.id.name(),
                    ?signature,
                    "Implementation does not satisfy capability"
                );
                return Err(Error::validation(name, claim.contract.id.name(), signature));
            }
        }
        debug!(
            implementation = name,
            capabilities = self.claims.len(),
            "Declared implementation"
        );
        Ok(ValidatedImplementation {
            name,
            type_id: TypeId::of::<I>(),
            claims: self.claims,
            factory: Arc::new(construct::<I>),
        })
    }
}

fn construct<I: Component>(injector: &mut Injector<'_>) -> Result<ErasedInstance> {
    let name = short_type_name::<I>();
    let timer = TimedOperation::start();
    let mut instance = I::create().map_err(|cause| {
        warn!(implementation = name, error = %cause, "Initializer failed");
        Error::construction_failed(name, cause)
    })?;
    injector.inject_instance(&mut instance)?;
    debug!(
        implementation = name,
        worker = %injector.worker(),
        elapsed_us = timer.elapsed_us(),
        "Constructed instance"
    );
    Ok(Arc::new(instance))
}

/// An implementation whose capability claims passed validation
///
/// Holds the capability descriptors as a separate value; the implementing
/// type itself is never modified. Cheap to clone, so one declaration can be
/// registered in several scopes.
#[derive(Clone)]
pub struct ValidatedImplementation {
    name: &'static str,
    type_id: TypeId,
    pub(crate) claims: Vec<Claim>,
    pub(crate) factory: Factory,
}

impl ValidatedImplementation {
    /// Implementation type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Identity of the implementation type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Capabilities this implementation satisfies, in claim order
    pub fn capabilities(&self) -> Vec<CapabilityId> {
        self.claims.iter().map(|claim| claim.contract.id).collect()
    }

    /// Whether capability `C` is among the claims
    pub fn satisfies<C: Capability + ?Sized>(&self) -> bool {
        let id = CapabilityId::of::<C>();
        self.claims.iter().any(|claim| claim.contract.id == id)
    }
}

impl fmt::Debug for ValidatedImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedImplementation")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities())
            .finish_non_exhaustive()
    }
}
