//! Capability-based dependency injection
//!
//! ```text
//! Implementation::<T>::builder()      Scope                      Injector
//! ──────────────────────────────      ─────                      ────────
//! .implements::<dyn C>(|p| p)  ──►  register / register_with  ──►  field("x", &mut Dependency<dyn C>)
//! .build()  (validates manifests)    resolve / inject / build      (depth first, cycle checked)
//! ```
//!
//! | Policy | Instances |
//! |--------|-----------|
//! | `Instance` | a new object per resolution |
//! | `Singleton` | one object per scope, cached under `main` |
//! | `PerThread` | one object per [`WorkerId`](nark_domain::value_objects::WorkerId) |

mod binding;
mod dependency;
mod implementation;
mod injector;
mod scope;

pub use binding::BindingInfo;
pub use dependency::{Dependency, Injectable};
pub use implementation::{Component, Implementation, ImplementationBuilder, ValidatedImplementation};
pub use injector::Injector;
pub use nark_domain::error::BoxError;
pub use scope::Scope;

/// Last path segment of a type name, without generic arguments
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
