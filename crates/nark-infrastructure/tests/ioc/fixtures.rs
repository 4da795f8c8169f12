//! Capabilities and implementations shared by the IoC tests

use std::collections::HashMap;
use std::sync::Mutex;

use nark_domain::error::{BoxError, Result};
use nark_infrastructure::component;
use nark_infrastructure::ioc::{
    Component, Dependency, Implementation, Injectable, Injector, ValidatedImplementation,
};

pub trait IPrinter: Send + Sync {
    fn prints(&self, message: &str) -> String;
}
nark_domain::capability!(IPrinter { prints });

pub trait IValuer: Send + Sync {
    fn value(&self, a: i64, b: i64) -> i64;
}
nark_domain::capability!(IValuer { value });

pub trait IDb: Send + Sync {
    fn put(&self, key: &str, value: &str);
    fn fetch(&self, key: &str) -> Option<String>;
}
nark_domain::capability!(IDb { put, fetch });

pub trait IService: Send + Sync {
    fn report(&self) -> Result<String>;
}
nark_domain::capability!(IService { report });

#[derive(Default)]
pub struct Printer;

impl Injectable for Printer {}

impl IPrinter for Printer {
    fn prints(&self, message: &str) -> String {
        format!("prints-{message}")
    }
}
component!(Printer { prints });

#[derive(Default)]
pub struct Valuer;

impl Injectable for Valuer {}

impl IValuer for Valuer {
    fn value(&self, a: i64, b: i64) -> i64 {
        a + b
    }
}
component!(Valuer { value });

/// One type satisfying two capabilities
#[derive(Default)]
pub struct Crazy;

impl Injectable for Crazy {}

impl IValuer for Crazy {
    fn value(&self, a: i64, b: i64) -> i64 {
        a - b
    }
}

impl IPrinter for Crazy {
    fn prints(&self, message: &str) -> String {
        format!("hello-{message}")
    }
}
component!(Crazy { value, prints });

#[derive(Default)]
pub struct Db {
    data: Mutex<HashMap<String, String>>,
}

impl Injectable for Db {}

impl IDb for Db {
    fn put(&self, key: &str, value: &str) {
        self.data
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn fetch(&self, key: &str) -> Option<String> {
        self.data.lock().unwrap().get(key).cloned()
    }
}
component!(Db { put, fetch });

/// Service that needs a printer itself
#[derive(Default)]
pub struct Service {
    pub printer: Dependency<dyn IPrinter>,
}

impl Injectable for Service {
    fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
        injector.field("printer", &mut self.printer)
    }
}

impl IService for Service {
    fn report(&self) -> Result<String> {
        Ok(self.printer.require()?.prints("report"))
    }
}
component!(Service { report });

/// Initializer always fails
pub struct Broken;

impl Injectable for Broken {}

impl IPrinter for Broken {
    fn prints(&self, message: &str) -> String {
        message.to_string()
    }
}

impl Component for Broken {
    const OPERATIONS: &'static [&'static str] = &["prints"];

    fn create() -> std::result::Result<Self, BoxError> {
        Err("printer offline".into())
    }
}

#[derive(Default)]
pub struct HasDeps {
    pub valuer: Dependency<dyn IValuer>,
    pub printer: Dependency<dyn IPrinter>,
    pub label: String,
}

impl Injectable for HasDeps {
    fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
        injector.field("valuer", &mut self.valuer)?;
        injector.field("printer", &mut self.printer)
    }
}

#[derive(Default)]
pub struct UsesDb {
    pub db: Dependency<dyn IDb>,
}

impl Injectable for UsesDb {
    fn inject(&mut self, injector: &mut Injector<'_>) -> Result<()> {
        injector.field("db", &mut self.db)
    }
}

pub fn printer() -> ValidatedImplementation {
    Implementation::<Printer>::builder()
        .implements::<dyn IPrinter>(|p| p)
        .build()
        .unwrap()
}

pub fn valuer() -> ValidatedImplementation {
    Implementation::<Valuer>::builder()
        .implements::<dyn IValuer>(|p| p)
        .build()
        .unwrap()
}

pub fn crazy() -> ValidatedImplementation {
    Implementation::<Crazy>::builder()
        .implements::<dyn IValuer>(|p| p)
        .implements::<dyn IPrinter>(|p| p)
        .build()
        .unwrap()
}

pub fn db() -> ValidatedImplementation {
    Implementation::<Db>::builder()
        .implements::<dyn IDb>(|p| p)
        .build()
        .unwrap()
}

pub fn service() -> ValidatedImplementation {
    Implementation::<Service>::builder()
        .implements::<dyn IService>(|p| p)
        .build()
        .unwrap()
}

pub fn broken() -> ValidatedImplementation {
    Implementation::<Broken>::builder()
        .implements::<dyn IPrinter>(|p| p)
        .build()
        .unwrap()
}

/// Address of the object behind a capability handle
pub fn address<T: ?Sized>(instance: &std::sync::Arc<T>) -> *const () {
    std::sync::Arc::as_ptr(instance).cast::<()>()
}
