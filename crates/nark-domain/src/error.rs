//! Error handling types

use std::collections::BTreeMap;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used for failures raised by user code (initializers, commands)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for nark
#[derive(Error, Debug)]
pub enum Error {
    /// An implementation claims a capability but lacks required operations
    ///
    /// Raised when an implementation is declared, never at resolution time.
    #[error("Invalid implementation '{implementation}' of '{capability}': {}", describe_signature(.signature))]
    Validation {
        /// The implementation type being declared
        implementation: String,
        /// The capability whose contract is not satisfied
        capability: String,
        /// Pass/fail for every operation the capability requires
        signature: BTreeMap<String, bool>,
    },

    /// A capability could not be turned into an instance
    ///
    /// `source` is `None` when no binding exists for `target`; otherwise
    /// `target` names the implementation whose initializer failed.
    #[error(
        "Failed to resolve '{target}': {}",
        .source.as_ref().map_or_else(
            || "no binding registered in this scope".to_string(),
            |cause| format!("construction failed: {cause}")
        )
    )]
    ResolveFailed {
        /// Capability (missing binding) or implementation (failed construction)
        target: String,
        /// Error raised by the implementation's initializer
        #[source]
        source: Option<BoxError>,
    },

    /// A pending field on an object graph could not be resolved
    #[error("Unable to resolve field '{field}' of '{owner}' ({capability}): {source}")]
    Resolution {
        /// Type owning the field
        owner: String,
        /// Field name as reported by the owner
        field: String,
        /// Capability the field is waiting for
        capability: String,
        /// Underlying resolution failure
        #[source]
        source: Box<Error>,
    },

    /// A capability was requested again while it was still being constructed
    #[error("Cyclic dependency detected: {}", .chain.join(" -> "))]
    CyclicDependency {
        /// Capabilities in resolution order, ending with the repeated one
        chain: Vec<String>,
    },

    /// The object graph is deeper than the configured limit
    #[error("Resolution depth {depth} exceeded while resolving '{capability}'")]
    DepthExceeded {
        /// Configured maximum depth
        depth: usize,
        /// Capability being resolved when the limit was hit
        capability: String,
    },

    /// A pending reference was read before any resolution pass filled it
    #[error("Dependency on '{capability}' has not been resolved")]
    Unresolved {
        /// Capability of the unresolved slot
        capability: String,
    },

    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// A path did not resolve to a readable file or directory
    #[error("Invalid file: '{path}'")]
    BadFile {
        /// The path that was checked
        path: String,
    },

    /// A command could not be found on the search path
    #[error("Missing command: '{program}'")]
    BadCommand {
        /// The program that was requested
        program: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

fn describe_signature(signature: &BTreeMap<String, bool>) -> String {
    let missing: Vec<&str> = signature
        .iter()
        .filter(|(_, present)| !**present)
        .map(|(name, _)| name.as_str())
        .collect();
    format!("missing operations [{}]", missing.join(", "))
}

// IoC error creation methods
impl Error {
    /// Create a validation error from a pass/fail signature map
    pub fn validation<I: Into<String>, C: Into<String>>(
        implementation: I,
        capability: C,
        signature: BTreeMap<String, bool>,
    ) -> Self {
        Self::Validation {
            implementation: implementation.into(),
            capability: capability.into(),
            signature,
        }
    }

    /// Create a resolve failure for a capability without a binding
    pub fn no_binding<S: Into<String>>(capability: S) -> Self {
        Self::ResolveFailed {
            target: capability.into(),
            source: None,
        }
    }

    /// Create a resolve failure for an initializer that raised
    pub fn construction_failed<S: Into<String>>(implementation: S, source: BoxError) -> Self {
        Self::ResolveFailed {
            target: implementation.into(),
            source: Some(source),
        }
    }

    /// Wrap a failure for a field of an object graph
    pub fn resolution<O: Into<String>, F: Into<String>, C: Into<String>>(
        owner: O,
        field: F,
        capability: C,
        source: Error,
    ) -> Self {
        Self::Resolution {
            owner: owner.into(),
            field: field.into(),
            capability: capability.into(),
            source: Box::new(source),
        }
    }

    /// Create an error for a pending reference read too early
    pub fn unresolved<S: Into<String>>(capability: S) -> Self {
        Self::Unresolved {
            capability: capability.into(),
        }
    }

    /// Name of the capability or implementation behind the innermost resolve failure
    ///
    /// Field-level failures are unwrapped, so callers can always find out
    /// which single capability or type caused the error.
    pub fn resolve_target(&self) -> Option<&str> {
        match self {
            Self::ResolveFailed { target, .. } => Some(target),
            Self::Resolution { source, .. } => source.resolve_target(),
            _ => None,
        }
    }

    /// The innermost error behind any chain of field-level failures
    pub fn innermost(&self) -> &Error {
        match self {
            Self::Resolution { source, .. } => source.innermost(),
            other => other,
        }
    }

    /// Whether this error (or the field error wrapping it) is a resolve failure
    pub fn is_resolve_failed(&self) -> bool {
        self.resolve_target().is_some()
    }
}

// Ambient error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a bad file error
    pub fn bad_file<S: Into<String>>(path: S) -> Self {
        Self::BadFile { path: path.into() }
    }

    /// Create a bad command error
    pub fn bad_command<S: Into<String>>(program: S) -> Self {
        Self::BadCommand {
            program: program.into(),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
