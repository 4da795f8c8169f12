//! Capability port
//!
//! A capability is an abstract contract, expressed in Rust as a trait object
//! type such as `dyn IPrinter`. The trait itself gives compile-time
//! conformance; this port adds the runtime identity and operation manifest
//! the scope uses for lookups and declaration-time validation.

/// Runtime description of a capability type
///
/// Implemented for trait object types, normally through [`capability!`](crate::capability).
///
/// # Example
///
/// ```
/// use nark_domain::ports::Capability;
///
/// pub trait IValuer: Send + Sync {
///     fn value(&self, a: i64, b: i64) -> i64;
/// }
///
/// nark_domain::capability!(IValuer { value });
///
/// assert_eq!(<dyn IValuer as Capability>::NAME, "IValuer");
/// assert_eq!(<dyn IValuer as Capability>::OPERATIONS, &["value"]);
/// ```
pub trait Capability: 'static {
    /// Display name used in errors and logs
    const NAME: &'static str;

    /// Operations an implementation must expose
    const OPERATIONS: &'static [&'static str];
}

/// Implement [`Capability`] for `dyn Trait`, listing its operations
#[macro_export]
macro_rules! capability {
    ($name:ident { $($operation:ident),* $(,)? }) => {
        impl $crate::ports::Capability for dyn $name {
            const NAME: &'static str = stringify!($name);
            const OPERATIONS: &'static [&'static str] = &[$(stringify!($operation)),*];
        }
    };
}
