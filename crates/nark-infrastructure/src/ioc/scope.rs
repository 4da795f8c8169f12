//! Binding registry and resolution entry points

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use nark_domain::constants::DEFAULT_MAX_RESOLVE_DEPTH;
use nark_domain::error::{Error, Result};
use nark_domain::ports::Capability;
use nark_domain::value_objects::{CapabilityId, ResolutionPolicy, WorkerId};
use tracing::{debug, warn};

use super::binding::{Binding, BindingInfo, Registration};
use super::dependency::Injectable;
use super::implementation::ValidatedImplementation;
use super::injector::Injector;
use crate::config::ScopeConfig;
use crate::logging::LogHandle;

/// Owns capability bindings and the instances created for them
///
/// Registration needs `&mut self`; everything else works through `&self`,
/// so a populated scope can be shared in an `Arc` between threads. Shared
/// instances are handed out as `Arc`s and are not made thread-safe by the
/// scope: guarding their internal state is up to the implementation.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use nark_domain::error::Result;
/// use nark_domain::value_objects::ResolutionPolicy;
/// use nark_infrastructure::ioc::{Dependency, Implementation, Injectable, Injector, Scope};
///
/// pub trait IPrinter: Send + Sync {
///     fn prints(&self, message: &str) -> String;
/// }
/// nark_domain::capability!(IPrinter { prints });
///
/// pub trait IValuer: Send + Sync {
///     fn value(&self, a: i64, b: i64) -> i64;
/// }
/// nark_domain::capability!(IValuer { value });
///
/// #[derive(Default)]
/// struct Printer;
/// impl Injectable for Printer {}
/// impl IPrinter for Printer {
///     fn prints(&self, message: &str) -> String {
///         format!("> {message}")
///     }
/// }
/// nark_infrastructure::component!(Printer { prints });
///
/// #[derive(Default)]
/// struct Adder;
/// impl Injectable for Adder {}
/// impl IValuer for Adder {
///     fn value(&self, a: i64, b: i64) -> i64 {
///         a + b
///     }
/// }
/// nark_infrastructure::component!(Adder { value });
///
/// #[derive(Default)]
/// struct HasDeps {
///     printer: Dependency<dyn IPrinter>,
///     valuer: Dependency<dyn IValuer>,
/// }
/// impl Injectable for HasDeps {
///     fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
///         injector.field("printer", &mut self.printer)?;
///         injector.field("valuer", &mut self.valuer)
///     }
/// }
///
/// let printer = Implementation::<Printer>::builder()
///     .implements::<dyn IPrinter>(|p| p)
///     .build()?;
/// let adder = Implementation::<Adder>::builder()
///     .implements::<dyn IValuer>(|v| v)
///     .build()?;
///
/// let mut scope = Scope::new();
/// scope.register(printer).register_with(adder, ResolutionPolicy::Instance);
///
/// let deps: HasDeps = scope.build()?;
/// assert_eq!(deps.valuer.require()?.value(2, 3), 5);
/// let printer: Arc<dyn IPrinter> = scope.resolve()?;
/// assert!(Arc::ptr_eq(&printer, deps.printer.require()?));
/// # Ok::<(), nark_domain::Error>(())
/// ```
pub struct Scope {
    bindings: HashMap<CapabilityId, Binding>,
    default_policy: ResolutionPolicy,
    max_depth: usize,
    logger: LogHandle,
}

impl Scope {
    /// An empty scope with singleton bindings by default
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            default_policy: ResolutionPolicy::default(),
            max_depth: DEFAULT_MAX_RESOLVE_DEPTH,
            logger: LogHandle::new("scope"),
        }
    }

    /// An empty scope using the configured default policy and depth bound
    pub fn from_config(config: &ScopeConfig) -> Self {
        Self {
            default_policy: config.default_policy,
            max_depth: config.max_depth,
            ..Self::new()
        }
    }

    /// A scope with every implementation registered under the default policy
    pub fn from_implementations<I>(implementations: I) -> Self
    where
        I: IntoIterator<Item = ValidatedImplementation>,
    {
        let mut scope = Self::new();
        for implementation in implementations {
            scope.register(implementation);
        }
        scope
    }

    /// Emit diagnostics through `logger`
    #[must_use]
    pub fn with_logger(mut self, logger: LogHandle) -> Self {
        self.logger = logger;
        self
    }

    /// Register under the scope's default policy
    pub fn register(&mut self, implementation: ValidatedImplementation) -> &mut Self {
        let policy = self.default_policy;
        self.register_with(implementation, policy)
    }

    /// Register with an explicit policy
    ///
    /// Every claimed capability is bound to this implementation, replacing
    /// any earlier binding for that capability.
    pub fn register_with(
        &mut self,
        implementation: ValidatedImplementation,
        policy: ResolutionPolicy,
    ) -> &mut Self {
        let registration = Arc::new(Registration::new(&implementation, policy));
        for claim in implementation.claims {
            let capability = claim.contract.id;
            let previous = self.bindings.insert(
                capability,
                Binding::new(Arc::clone(&registration), claim.caster),
            );
            self.logger.in_scope(|| {
                debug!(
                    capability = capability.name(),
                    implementation = registration.implementation,
                    %policy,
                    replaced = previous.is_some(),
                    "Registered binding"
                );
            });
        }
        self
    }

    /// Resolve capability `C` for the calling thread's worker identity
    pub fn resolve<C: Capability + ?Sized>(&self) -> Result<Arc<C>> {
        self.resolve_as::<C>(&WorkerId::current())
    }

    /// Resolve capability `C` for an explicit worker identity
    pub fn resolve_as<C: Capability + ?Sized>(&self, worker: &WorkerId) -> Result<Arc<C>> {
        Injector::new(self, worker.clone()).resolve::<C>()
    }

    /// Replace every pending field of `target` with a resolved instance
    ///
    /// On failure every field injected by this call reads as pending again.
    /// Fields filled by earlier calls and provided values keep their values.
    pub fn inject<T: Injectable + ?Sized>(&self, target: &mut T) -> Result<()> {
        self.inject_as(target, &WorkerId::current())
    }

    /// [`inject`](Self::inject) for an explicit worker identity
    pub fn inject_as<T: Injectable + ?Sized>(&self, target: &mut T, worker: &WorkerId) -> Result<()> {
        Injector::new(self, worker.clone()).inject_atomic(target)
    }

    /// Build `T` from its default value with every pending field resolved
    pub fn build<T: Injectable + Default>(&self) -> Result<T> {
        self.build_with(T::default())
    }

    /// [`build`](Self::build) for an explicit worker identity
    pub fn build_as<T: Injectable + Default>(&self, worker: &WorkerId) -> Result<T> {
        let mut value = T::default();
        self.inject_as(&mut value, worker)?;
        Ok(value)
    }

    /// Resolve the pending fields of a caller-built value
    ///
    /// Fields the caller supplied ([`Dependency::provided`]) always win and
    /// never trigger resolution; fields that are not dependencies pass
    /// through unchanged.
    pub fn build_with<T: Injectable>(&self, mut value: T) -> Result<T> {
        self.inject(&mut value)?;
        Ok(value)
    }

    /// Drop every cached instance, keeping the bindings
    pub fn reset(&self) {
        for binding in self.bindings.values() {
            binding.registration.clear();
        }
        self.logger.in_scope(|| debug!(bindings = self.bindings.len(), "Scope reset"));
    }

    /// Whether capability `C` has a binding
    pub fn contains<C: Capability + ?Sized>(&self) -> bool {
        self.bindings.contains_key(&CapabilityId::of::<C>())
    }

    /// Every binding, ordered by capability name
    pub fn bindings(&self) -> Vec<BindingInfo> {
        let mut infos: Vec<BindingInfo> = self
            .bindings
            .iter()
            .map(|(capability, binding)| BindingInfo {
                capability: *capability,
                implementation: binding.registration.implementation,
                policy: binding.registration.policy,
                cached_instances: binding.registration.cached(),
            })
            .collect();
        infos.sort_by_key(|info| info.capability.name());
        infos
    }

    /// Number of bound capabilities
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no capability is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Policy used by [`register`](Self::register)
    pub fn default_policy(&self) -> ResolutionPolicy {
        self.default_policy
    }

    /// Maximum object-graph depth of one resolution pass
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub(crate) fn resolve_in<C: Capability + ?Sized>(
        &self,
        injector: &mut Injector<'_>,
    ) -> Result<Arc<C>> {
        let capability = CapabilityId::of::<C>();
        let Some(binding) = self.bindings.get(&capability) else {
            self.logger.in_scope(|| {
                warn!(capability = C::NAME, "No binding registered");
            });
            return Err(Error::no_binding(C::NAME));
        };
        let instance = binding
            .registration
            .instance(injector, capability, self.max_depth)?;
        binding.cast::<C>(instance)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("default_policy", &self.default_policy)
            .field("max_depth", &self.max_depth)
            .field("bindings", &self.bindings())
            .finish()
    }
}
