//! Error extension utilities
//!
//! Attach a message to a foreign error and turn it into the domain
//! [`Error`]. The wrapped error stays reachable through `source()`.

use std::fmt;

use nark_domain::error::{BoxError, Error, Result};

/// Domain variant a foreign error is mapped to
#[derive(Debug, Clone, Copy)]
enum Category {
    Infrastructure,
    Io,
    Configuration,
}

impl Category {
    fn wrap(self, message: String, source: BoxError) -> Error {
        let source = Some(source);
        match self {
            Self::Infrastructure => Error::Infrastructure { message, source },
            Self::Io => Error::Io { message, source },
            Self::Configuration => Error::Configuration { message, source },
        }
    }
}

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```
/// use nark_domain::error::Error;
/// use nark_infrastructure::error_ext::ErrorContext;
///
/// let read = std::fs::read_to_string("/definitely/not/here").io_context("Failed to read assets");
/// assert!(matches!(read, Err(Error::Io { .. })));
/// ```
pub trait ErrorContext<T> {
    /// `Error::Infrastructure` carrying `context` and the cause
    fn context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// [`context`](Self::context), building the message only on failure
    fn with_context<C: fmt::Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;

    /// `Error::Io` carrying `context` and the cause
    fn io_context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// `Error::Configuration` carrying `context` and the cause
    fn config_context<C: fmt::Display>(self, context: C) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C: fmt::Display>(self, context: C) -> Result<T> {
        attach(self, Category::Infrastructure, || context)
    }

    fn with_context<C: fmt::Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        attach(self, Category::Infrastructure, f)
    }

    fn io_context<C: fmt::Display>(self, context: C) -> Result<T> {
        attach(self, Category::Io, || context)
    }

    fn config_context<C: fmt::Display>(self, context: C) -> Result<T> {
        attach(self, Category::Configuration, || context)
    }
}

fn attach<T, E, C, F>(result: std::result::Result<T, E>, category: Category, f: F) -> Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
    C: fmt::Display,
    F: FnOnce() -> C,
{
    result.map_err(|err| category.wrap(format!("{}: {err}", f()), Box::new(err)))
}
