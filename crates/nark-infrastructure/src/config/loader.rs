//! Configuration loader
//!
//! Layers, lowest priority first: `NarkConfig::default()`, one TOML file,
//! then `NARK_`-prefixed environment variables where `__` separates nested
//! keys (`NARK_SCOPE__MAX_DEPTH=16`).

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use nark_domain::error::Result;

use crate::config::NarkConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// Builds a [`NarkConfig`] from defaults, a TOML file and the environment
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Loader that searches the default locations and reads `NARK_*`
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Read this file instead of searching; a missing file is not an error
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Read `{prefix}_*` environment variables instead of `NARK_*`
    #[must_use]
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Explicit configuration file, if one was set
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// The layered providers, before extraction
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(NarkConfig::default()));
        if let Some(path) = self.source_file() {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR))
    }

    /// Extract and validate the configuration
    pub fn load(&self) -> Result<NarkConfig> {
        let config: NarkConfig = self
            .figment()
            .extract()
            .config_context("Failed to extract configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Write `config` as TOML
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &NarkConfig, path: P) -> Result<()> {
        let text =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;
        std::fs::write(path.as_ref(), text).io_context("Failed to write config file")
    }

    fn source_file(&self) -> Option<PathBuf> {
        match &self.config_path {
            Some(path) => {
                let found = path.exists();
                log_config_loaded(path, found);
                found.then(|| path.clone())
            }
            None => {
                let found = default_locations().into_iter().find(|path| path.exists())?;
                log_config_loaded(&found, true);
                Some(found)
            }
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// `./nark.toml`, `./nark/nark.toml`, then the user configuration directory
fn default_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        locations.push(cwd.join(DEFAULT_CONFIG_FILENAME));
        locations.push(cwd.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
    }
    locations
}
