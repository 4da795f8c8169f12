//! Object graph resolution tests

use std::sync::Arc;

use nark_domain::error::{Error, Result};
use nark_domain::value_objects::WorkerId;
use nark_infrastructure::component;
use nark_infrastructure::config::ScopeConfig;
use nark_infrastructure::ioc::{Dependency, Implementation, Injectable, Injector, Scope};

use super::fixtures::{
    HasDeps, IPrinter, IService, IValuer, address, broken, printer, service, valuer,
};

struct MockPrinter;

impl IPrinter for MockPrinter {
    fn prints(&self, message: &str) -> String {
        format!("mock-{message}")
    }
}

#[derive(Default)]
struct App {
    service: Dependency<dyn IService>,
    extras: Vec<HasDeps>,
}

impl Injectable for App {
    fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
        injector.field("service", &mut self.service)?;
        injector.inject(&mut self.extras)
    }
}

#[test]
fn test_pending_fields_are_filled() {
    let mut scope = Scope::new();
    scope.register(printer()).register(valuer());

    let mut instance = HasDeps {
        label: "kept".to_string(),
        ..HasDeps::default()
    };
    assert!(instance.printer.is_pending());
    assert!(matches!(instance.printer.require(), Err(Error::Unresolved { .. })));

    scope.inject(&mut instance).unwrap();

    assert!(instance.printer.is_injected());
    assert!(instance.valuer.is_injected());
    assert_eq!(instance.label, "kept");
}

#[test]
fn test_provided_values_win() {
    let mut scope = Scope::new();
    scope.register(printer()).register(valuer());

    let mock: Arc<dyn IPrinter> = Arc::new(MockPrinter);
    let instance = scope
        .build_with(HasDeps {
            printer: Dependency::provided(Arc::clone(&mock)),
            ..HasDeps::default()
        })
        .unwrap();

    assert!(instance.printer.is_provided());
    assert_eq!(instance.printer.require().unwrap().prints("x"), "mock-x");
    assert_eq!(address(instance.printer.require().unwrap()), address(&mock));
    assert_eq!(instance.valuer.require().unwrap().value(1, 2), 3);
}

#[test]
fn test_provided_value_needs_no_binding() {
    let mut scope = Scope::new();
    scope.register(valuer());

    let mock: Arc<dyn IPrinter> = Arc::new(MockPrinter);
    let instance = scope
        .build_with(HasDeps {
            printer: mock.into(),
            ..HasDeps::default()
        })
        .unwrap();

    assert_eq!(instance.printer.require().unwrap().prints("y"), "mock-y");
}

#[test]
fn test_dependencies_of_dependencies_are_resolved() {
    let mut scope = Scope::new();
    scope
        .register(printer())
        .register(valuer())
        .register(service());

    let mut app = App {
        extras: vec![HasDeps::default(), HasDeps::default()],
        ..App::default()
    };
    scope.inject(&mut app).unwrap();

    let report = app.service.require().unwrap().report().unwrap();
    assert_eq!(report, "prints-report");
    assert!(app.extras.iter().all(|extra| extra.printer.is_injected()));
}

#[test]
fn test_field_failure_names_owner_and_field() {
    let mut scope = Scope::new();
    scope.register(service());

    let Err(error) = scope.build::<App>() else {
        panic!("Expected resolution failure");
    };

    assert_eq!(error.resolve_target(), Some("IPrinter"));
    match &error {
        Error::Resolution {
            owner,
            field,
            capability,
            ..
        } => {
            assert_eq!(owner, "App");
            assert_eq!(field, "service");
            assert_eq!(capability, "IService");
        }
        other => panic!("Expected Resolution error, got {other:?}"),
    }
}

#[test]
fn test_failed_inject_leaves_fields_pending() {
    let mut scope = Scope::new();
    scope.register(valuer()).register(broken());

    let mut instance = HasDeps::default();
    let error = scope.inject(&mut instance).unwrap_err();

    assert_eq!(error.resolve_target(), Some("Broken"));
    assert!(instance.valuer.is_pending());
    assert!(instance.printer.is_pending());
}

#[test]
fn test_failed_inject_keeps_provided_values() {
    let scope = Scope::new();

    let mock: Arc<dyn IPrinter> = Arc::new(MockPrinter);
    let mut instance = HasDeps {
        printer: Dependency::provided(mock),
        ..HasDeps::default()
    };
    assert!(scope.inject(&mut instance).is_err());

    assert!(instance.printer.is_provided());
    assert!(instance.valuer.is_pending());
}

#[test]
fn test_failed_inject_with_custom_resolve_leaves_fields_pending() {
    #[derive(Default)]
    struct Mixed {
        total: i64,
        valuer: Dependency<dyn IValuer>,
        printer: Dependency<dyn IPrinter>,
    }

    impl Injectable for Mixed {
        fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
            self.total = injector.resolve::<dyn IValuer>()?.value(1, 2);
            injector.field("valuer", &mut self.valuer)?;
            injector.field("printer", &mut self.printer)
        }
    }

    let mut scope = Scope::new();
    scope.register(valuer());

    let mut mixed = Mixed::default();
    let error = scope.inject(&mut mixed).unwrap_err();

    assert_eq!(error.resolve_target(), Some("IPrinter"));
    assert!(mixed.valuer.is_pending());
    assert!(mixed.valuer.get().is_none());
    assert!(mixed.printer.is_pending());
}

#[test]
fn test_failed_inject_keeps_fields_from_earlier_calls() {
    let mut full = Scope::new();
    full.register(printer()).register(valuer());
    let mut partial = Scope::new();
    partial.register(valuer());

    let mut instance = HasDeps::default();
    full.inject(&mut instance).unwrap();
    let first = address(instance.valuer.require().unwrap());

    instance.printer = Dependency::pending();
    assert!(partial.inject(&mut instance).is_err());

    assert!(instance.valuer.is_injected());
    assert_eq!(address(instance.valuer.require().unwrap()), first);
    assert!(instance.printer.is_pending());

    full.inject(&mut instance).unwrap();
    assert!(instance.printer.is_injected());
}

#[test]
fn test_failed_inject_keeps_cached_instances_resolved() {
    #[derive(Default)]
    struct Report {
        service: Dependency<dyn IService>,
        valuer: Dependency<dyn IValuer>,
    }

    impl Injectable for Report {
        fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
            injector.field("service", &mut self.service)?;
            injector.field("valuer", &mut self.valuer)
        }
    }

    let mut scope = Scope::new();
    scope.register(service()).register(printer());

    let mut report = Report::default();
    assert!(scope.inject(&mut report).is_err());
    assert!(report.service.is_pending());

    let cached = scope.resolve::<dyn IService>().unwrap();
    assert_eq!(cached.report().unwrap(), "prints-report");
}

pub trait IPing: Send + Sync {
    fn ping(&self) -> &'static str;
}
nark_domain::capability!(IPing { ping });

pub trait IPong: Send + Sync {
    fn pong(&self) -> &'static str;
}
nark_domain::capability!(IPong { pong });

#[derive(Default)]
struct Ping {
    pong: Dependency<dyn IPong>,
}

impl Injectable for Ping {
    fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
        injector.field("pong", &mut self.pong)
    }
}

impl IPing for Ping {
    fn ping(&self) -> &'static str {
        "ping"
    }
}
component!(Ping { ping });

#[derive(Default)]
struct Pong {
    ping: Dependency<dyn IPing>,
}

impl Injectable for Pong {
    fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
        injector.field("ping", &mut self.ping)
    }
}

impl IPong for Pong {
    fn pong(&self) -> &'static str {
        "pong"
    }
}
component!(Pong { pong });

#[test]
fn test_cycles_are_detected() {
    let mut scope = Scope::new();
    scope
        .register(
            Implementation::<Ping>::builder()
                .implements::<dyn IPing>(|p| p)
                .build()
                .unwrap(),
        )
        .register(
            Implementation::<Pong>::builder()
                .implements::<dyn IPong>(|p| p)
                .build()
                .unwrap(),
        );

    let Err(error) = scope.resolve::<dyn IPing>() else {
        panic!("Expected cyclic dependency");
    };

    match error.innermost() {
        Error::CyclicDependency { chain } => {
            assert_eq!(chain, &["IPing", "IPong", "IPing"]);
        }
        other => panic!("Expected CyclicDependency error, got {other:?}"),
    }
    assert_eq!(error.resolve_target(), None);
    assert_eq!(scope.bindings()[0].cached_instances, 0);
}

#[test]
fn test_depth_limit() {
    let config = ScopeConfig {
        max_depth: 1,
        ..ScopeConfig::default()
    };
    let mut scope = Scope::from_config(&config);
    scope.register(printer()).register(service());

    // A printer on its own fits in one level
    assert!(scope.resolve::<dyn IPrinter>().is_ok());

    scope.reset();
    let Err(error) = scope.resolve::<dyn IService>() else {
        panic!("Expected depth failure");
    };
    assert!(matches!(
        error.innermost(),
        Error::DepthExceeded { depth: 1, .. }
    ));
}

#[test]
fn test_build_as_uses_worker_identity() {
    let mut scope = Scope::new();
    scope.register_with(
        printer(),
        nark_domain::value_objects::ResolutionPolicy::PerThread,
    );
    scope.register(valuer());

    let a1: HasDeps = scope.build_as(&WorkerId::new("a")).unwrap();
    let a2: HasDeps = scope.build_as(&WorkerId::new("a")).unwrap();
    let b: HasDeps = scope.build_as(&WorkerId::new("b")).unwrap();

    let a1 = a1.printer.require().unwrap().clone();
    assert_eq!(address(&a1), address(a2.printer.require().unwrap()));
    assert_ne!(address(&a1), address(b.printer.require().unwrap()));
}

#[test]
fn test_injector_resolve_from_custom_inject() {
    #[derive(Default)]
    struct Greeter {
        greeting: String,
    }

    impl Injectable for Greeter {
        fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
            let valuer = injector.resolve::<dyn IValuer>()?;
            self.greeting = format!("{} at depth {}", valuer.value(2, 2), injector.depth());
            Ok(())
        }
    }

    let mut scope = Scope::new();
    scope.register(valuer());

    let greeter: Greeter = scope.build().unwrap();
    assert_eq!(greeter.greeting, "4 at depth 0");
}
