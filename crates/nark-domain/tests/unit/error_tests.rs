//! Error taxonomy tests

use std::collections::BTreeMap;
use std::error::Error as _;

use nark_domain::error::Error;

#[test]
fn test_validation_error_lists_missing_operations() {
    let signature = BTreeMap::from([
        ("xxx".to_string(), true),
        ("yyy".to_string(), false),
        ("zzz".to_string(), false),
    ]);
    let error = Error::validation("Valuer", "IValuer", signature);
    let message = error.to_string();

    assert!(message.contains("'Valuer'"));
    assert!(message.contains("'IValuer'"));
    assert!(message.contains("yyy, zzz"));
    assert!(!message.contains("xxx"));
}

#[test]
fn test_no_binding_names_capability() {
    let error = Error::no_binding("IPrinter");

    assert_eq!(error.resolve_target(), Some("IPrinter"));
    assert!(error.is_resolve_failed());
    assert!(error.source().is_none());
    assert!(error.to_string().contains("no binding"));
}

#[test]
fn test_construction_failed_keeps_cause() {
    let error = Error::construction_failed("Printer", "disk on fire".into());

    assert_eq!(error.resolve_target(), Some("Printer"));
    assert!(error.to_string().contains("disk on fire"));
    assert!(error.source().is_some());
}

#[test]
fn test_resolution_unwraps_to_innermost_target() {
    let inner = Error::no_binding("IPrinter");
    let middle = Error::resolution("Service", "printer", "IPrinter", inner);
    let outer = Error::resolution("App", "service", "IService", middle);

    assert_eq!(outer.resolve_target(), Some("IPrinter"));
    assert!(matches!(outer.innermost(), Error::ResolveFailed { source: None, .. }));
    assert!(outer.to_string().contains("'service' of 'App'"));
}

#[test]
fn test_non_resolve_errors_have_no_target() {
    let cyclic = Error::CyclicDependency {
        chain: vec!["IA".to_string(), "IB".to_string(), "IA".to_string()],
    };

    assert_eq!(cyclic.resolve_target(), None);
    assert!(!cyclic.is_resolve_failed());
    assert!(cyclic.to_string().contains("IA -> IB -> IA"));
}

#[test]
fn test_io_error_from_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: Error = io.into();

    assert!(matches!(error, Error::IoSimple { .. }));
}

#[test]
fn test_helper_constructors() {
    match Error::bad_file("/nope") {
        Error::BadFile { path } => assert_eq!(path, "/nope"),
        other => panic!("Expected BadFile error, got {other:?}"),
    }
    match Error::bad_command("no-such-tool") {
        Error::BadCommand { program } => assert_eq!(program, "no-such-tool"),
        other => panic!("Expected BadCommand error, got {other:?}"),
    }
    match Error::unresolved("IPrinter") {
        Error::Unresolved { capability } => assert_eq!(capability, "IPrinter"),
        other => panic!("Expected Unresolved error, got {other:?}"),
    }
}
