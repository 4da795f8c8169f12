//! Structured logging with tracing
//!
//! Provides centralized logging configuration and the [`LogHandle`] that
//! components receive explicitly instead of looking a logger up by caller.

use nark_domain::error::{Error, Result};

// Re-export LoggingConfig for convenience
pub use crate::config::LoggingConfig;
use crate::constants::LOG_ENV_FILTER;
use tracing::{Level, Span, debug, error, info, info_span, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with the provided configuration
///
/// Fails when the level is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = build_env_filter(config)?;

    let file_appender = config.file_output.as_ref().map(|path| {
        tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| std::path::Path::new(".")),
            path.file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new("nark.log")),
        )
    });

    // Layer types differ between JSON and plain output, hence the branches
    let registry = Registry::default().with(filter);
    let installed = if config.json_format {
        let stdout = fmt::layer().json().with_target(true).with_thread_names(true);
        match file_appender {
            Some(appender) => {
                let file = fmt::layer()
                    .json()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_target(true);
                registry.with(stdout).with(file).try_init()
            }
            None => registry.with(stdout).try_init(),
        }
    } else {
        let stdout = fmt::layer().with_target(true).with_thread_names(true);
        match file_appender {
            Some(appender) => {
                let file = fmt::layer()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_target(true);
                registry.with(stdout).with(file).try_init()
            }
            None => registry.with(stdout).try_init(),
        }
    };
    installed.map_err(|e| Error::configuration_with_source("Failed to install logger", e))?;

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Filter for the configured level, refined by `NARK_LOG` directives
///
/// The level goes through [`parse_log_level`], so aliases such as
/// `warning` and `critical` select a level instead of a target.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let level = parse_log_level(&config.level)?;
    Ok(EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .with_env_var(LOG_ENV_FILTER)
        .from_env_lossy())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" | "critical" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &std::path::Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}

/// Named logger handed to a component
///
/// Wraps a `tracing` span carrying the component name; events emitted
/// through the handle (or inside [`in_scope`](Self::in_scope)) are attributed
/// to that component.
#[derive(Debug, Clone)]
pub struct LogHandle {
    name: String,
    span: Span,
}

impl LogHandle {
    /// Handle for the component `name`
    pub fn new<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        let span = info_span!("component", name = %name);
        Self { name, span }
    }

    /// Handle that records nothing
    pub fn disabled() -> Self {
        Self {
            name: String::new(),
            span: Span::none(),
        }
    }

    /// Component name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Underlying span
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Run `f` inside the component span
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }

    /// Emit a debug event
    pub fn debug(&self, message: &str) {
        self.in_scope(|| debug!("{message}"));
    }

    /// Emit an info event
    pub fn info(&self, message: &str) {
        self.in_scope(|| info!("{message}"));
    }

    /// Emit a warning
    pub fn warn(&self, message: &str) {
        self.in_scope(|| warn!("{message}"));
    }

    /// Emit an error event
    pub fn error(&self, message: &str) {
        self.in_scope(|| error!("{message}"));
    }
}
