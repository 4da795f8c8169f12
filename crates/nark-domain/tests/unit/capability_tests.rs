//! Capability identity and contract tests

use nark_domain::ports::Capability;
use nark_domain::value_objects::{CapabilityContract, CapabilityId};

pub trait IPrinter: Send + Sync {
    fn prints(&self, message: &str);
}
nark_domain::capability!(IPrinter { prints });

pub trait IValuer: Send + Sync {
    fn xxx(&self) -> i64;
    fn yyy(&self) -> i64;
    fn zzz(&self) -> i64;
}
nark_domain::capability!(IValuer { xxx, yyy, zzz });

#[test]
fn test_capability_macro_records_name_and_operations() {
    assert_eq!(<dyn IValuer as Capability>::NAME, "IValuer");
    assert_eq!(<dyn IValuer as Capability>::OPERATIONS, &["xxx", "yyy", "zzz"]);
}

#[test]
fn test_capability_id_equality_uses_type() {
    let a = CapabilityId::of::<dyn IPrinter>();
    let b = CapabilityId::of::<dyn IPrinter>();
    let c = CapabilityId::of::<dyn IValuer>();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.name(), "IPrinter");
    assert_eq!(c.to_string(), "IValuer");
}

#[test]
fn test_contract_check_reports_every_required_operation() {
    let contract = CapabilityContract::of::<dyn IValuer>();
    let signature = contract.check(&["xxx", "unrelated"]);

    assert_eq!(signature.len(), 3);
    assert!(signature["xxx"]);
    assert!(!signature["yyy"]);
    assert!(!signature["zzz"]);
    assert!(!signature.contains_key("unrelated"));
}

#[test]
fn test_contract_satisfied_by_superset() {
    let contract = CapabilityContract::of::<dyn IPrinter>();

    assert!(contract.is_satisfied_by(&["prints", "extra"]));
    assert!(!contract.is_satisfied_by(&[]));
}
