//! Pending references and the `Injectable` walk

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use nark_domain::error::{Error, Result};
use nark_domain::ports::Capability;
use nark_domain::value_objects::CapabilityId;

use super::injector::Injector;

/// Identity of one resolution pass
///
/// Every slot filled by a pass keeps a clone of its mark. Aborting the pass
/// turns all of those slots back into pending ones without visiting them
/// again, while slots filled by other passes are unaffected.
#[derive(Debug, Clone, Default)]
pub(crate) struct PassMark(Arc<AtomicBool>);

impl PassMark {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn abort(&self) {
        self.0.store(true, Ordering::Release);
    }

    fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

enum Slot<C: ?Sized> {
    Pending,
    Provided(Arc<C>),
    Injected { instance: Arc<C>, pass: PassMark },
}

/// A field waiting for (or holding) an instance of capability `C`
///
/// A new dependency is pending: "resolve this capability here". Values
/// supplied by the caller are provided and are never replaced. Values
/// filled in by a resolution pass are injected; when that pass fails, they
/// read as pending again and the held instance is released on the next
/// write.
pub struct Dependency<C: ?Sized> {
    slot: Slot<C>,
}

impl<C: Capability + ?Sized> Dependency<C> {
    /// A pending reference
    pub fn pending() -> Self {
        Self::default()
    }

    /// An explicit value that resolution will leave alone
    pub fn provided(instance: Arc<C>) -> Self {
        Self {
            slot: Slot::Provided(instance),
        }
    }

    /// Capability this slot resolves
    pub fn capability(&self) -> CapabilityId {
        CapabilityId::of::<C>()
    }

    /// Whether the slot still waits for resolution
    pub fn is_pending(&self) -> bool {
        match &self.slot {
            Slot::Pending => true,
            Slot::Provided(_) => false,
            Slot::Injected { pass, .. } => pass.is_aborted(),
        }
    }

    /// Whether the slot holds a caller-supplied value
    pub fn is_provided(&self) -> bool {
        matches!(self.slot, Slot::Provided(_))
    }

    /// Whether the slot was filled in by a pass that succeeded
    pub fn is_injected(&self) -> bool {
        matches!(&self.slot, Slot::Injected { pass, .. } if !pass.is_aborted())
    }

    /// The instance, if any
    pub fn get(&self) -> Option<&Arc<C>> {
        match &self.slot {
            Slot::Pending => None,
            Slot::Provided(instance) => Some(instance),
            Slot::Injected { instance, pass } => (!pass.is_aborted()).then_some(instance),
        }
    }

    /// The instance, or `Error::Unresolved` for a pending slot
    pub fn require(&self) -> Result<&Arc<C>> {
        self.get().ok_or_else(|| Error::unresolved(C::NAME))
    }

    pub(crate) fn inject(&mut self, instance: Arc<C>, pass: PassMark) {
        self.slot = Slot::Injected { instance, pass };
    }
}

impl<C: ?Sized> Default for Dependency<C> {
    fn default() -> Self {
        Self {
            slot: Slot::Pending,
        }
    }
}

impl<C: ?Sized> Clone for Dependency<C> {
    fn clone(&self) -> Self {
        let slot = match &self.slot {
            Slot::Pending => Slot::Pending,
            Slot::Provided(instance) => Slot::Provided(Arc::clone(instance)),
            Slot::Injected { instance, pass } => Slot::Injected {
                instance: Arc::clone(instance),
                pass: pass.clone(),
            },
        };
        Self { slot }
    }
}

impl<C: ?Sized> From<Arc<C>> for Dependency<C> {
    fn from(instance: Arc<C>) -> Self {
        Self {
            slot: Slot::Provided(instance),
        }
    }
}

impl<C: Capability + ?Sized> fmt::Debug for Dependency<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_provided() {
            "Provided"
        } else if self.is_injected() {
            "Injected"
        } else {
            "Pending"
        };
        write!(f, "Dependency::{state}({})", C::NAME)
    }
}

/// An object whose fields may hold pending references
///
/// Implementations hand each [`Dependency`] field to [`Injector::field`] and
/// each nested injectable value to [`Injector::inject`]. Fields that are not
/// dependencies are simply not visited.
///
/// ```
/// use nark_domain::error::Result;
/// use nark_infrastructure::ioc::{Dependency, Injectable, Injector, Scope};
///
/// pub trait IValuer: Send + Sync {
///     fn value(&self, a: i64, b: i64) -> i64;
/// }
/// nark_domain::capability!(IValuer { value });
///
/// #[derive(Default)]
/// struct HasDeps {
///     valuer: Dependency<dyn IValuer>,
/// }
///
/// impl Injectable for HasDeps {
///     fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
///         injector.field("valuer", &mut self.valuer)
///     }
/// }
///
/// // Nothing is bound, so the pass fails and the field stays pending
/// let mut value = HasDeps::default();
/// assert!(Scope::new().inject(&mut value).is_err());
/// assert!(value.valuer.is_pending());
/// ```
pub trait Injectable {
    /// Visit every pending reference of `self`
    fn inject(&mut self, _injector: &mut Injector<'_>) -> Result<()> {
        Ok(())
    }
}

impl<T: Injectable + ?Sized> Injectable for Box<T> {
    fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
        injector.inject(&mut **self)
    }
}

impl<T: Injectable> Injectable for Option<T> {
    fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
        match self {
            Some(inner) => injector.inject(inner),
            None => Ok(()),
        }
    }
}

impl<T: Injectable> Injectable for Vec<T> {
    fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
        self.iter_mut().try_for_each(|item| injector.inject(item))
    }
}
