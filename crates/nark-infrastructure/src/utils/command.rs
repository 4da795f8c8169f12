//! Locate and run external commands

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use nark_domain::error::{Error, Result};
use tracing::debug;

use crate::constants::PATH_ENV;
use crate::error_ext::ErrorContext;

/// Resolve `program` to an executable path
///
/// A program containing a path separator is checked as given; a bare name is
/// looked up in every `PATH` entry in order.
pub fn which<P: AsRef<Path>>(program: P) -> Option<PathBuf> {
    let program = program.as_ref();
    if program.components().count() > 1 {
        return is_executable(program).then(|| program.to_path_buf());
    }
    let search = env::var_os(PATH_ENV)?;
    env::split_paths(&search)
        .map(|dir| strip_quotes(&dir).join(program))
        .find(|candidate| is_executable(candidate))
}

/// Whether `program` can be found on the search path
pub fn can_run<P: AsRef<Path>>(program: P) -> bool {
    which(program).is_some()
}

/// Run `program` with `args`, waiting for it to finish
///
/// Fails with `Error::BadCommand` when the program cannot be found. The exit
/// status is returned as-is; a non-zero status is not an error.
pub fn run<P, I, S>(program: P, args: I) -> Result<ExitStatus>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let program = program.as_ref();
    let resolved =
        which(program).ok_or_else(|| Error::bad_command(program.display().to_string()))?;
    debug!(program = %resolved.display(), "Running command");
    Command::new(&resolved)
        .args(args)
        .status()
        .io_context(format!("Failed to run '{}'", resolved.display()))
}

fn strip_quotes(dir: &Path) -> PathBuf {
    let raw = dir.to_string_lossy();
    PathBuf::from(raw.trim_matches('"'))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
