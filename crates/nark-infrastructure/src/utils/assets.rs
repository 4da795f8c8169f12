//! Path resolution under a base directory

use std::fs::File;
use std::path::{Path, PathBuf};

use nark_domain::error::{Error, Result};

use crate::config::AssetsConfig;
use crate::error_ext::ErrorContext;

/// Resolves relative path segments against a fixed root
///
/// A path counts as present when it is a directory or a file that can be
/// opened for reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assets {
    base: PathBuf,
}

impl Assets {
    /// Root at `base`
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self { base: base.into() }
    }

    /// Root at the current working directory
    pub fn current_dir() -> Result<Self> {
        let base = std::env::current_dir().io_context("Failed to read current directory")?;
        Ok(Self::new(base))
    }

    /// Root at the configured base, or the current directory when unset
    pub fn from_config(config: &AssetsConfig) -> Result<Self> {
        match &config.base {
            Some(base) => Ok(Self::new(base)),
            None => Self::current_dir(),
        }
    }

    /// Root directory
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Join `parts` to the root; fails with `Error::BadFile` if nothing is there
    pub fn resolve<I, P>(&self, parts: I) -> Result<PathBuf>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let path = self.join(parts);
        if is_present(&path) {
            Ok(path)
        } else {
            Err(Error::bad_file(path.display().to_string()))
        }
    }

    /// Join `parts` to the root, returning the path only if something is there
    pub fn exists<I, P>(&self, parts: I) -> Option<PathBuf>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let path = self.join(parts);
        is_present(&path).then_some(path)
    }

    fn join<I, P>(&self, parts: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        parts
            .into_iter()
            .fold(self.base.clone(), |path, part| path.join(part))
    }
}

fn is_present(path: &Path) -> bool {
    path.is_dir() || (path.is_file() && File::open(path).is_ok())
}
