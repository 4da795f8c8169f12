//! Resolution policies and instance cache keys

use std::fmt;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::constants::MAIN_INSTANCE_KEY;

/// How a binding turns into instances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// A new object for every resolution
    Instance,
    /// One object shared by every resolution within a scope
    #[default]
    Singleton,
    /// One object per logical worker identity
    PerThread,
}

impl fmt::Display for ResolutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Instance => "instance",
            Self::Singleton => "singleton",
            Self::PerThread => "per_thread",
        };
        f.write_str(name)
    }
}

/// Logical worker identity used to partition per-thread instances
///
/// A caller-chosen name, not the OS thread handle: pooled threads that
/// share a name share per-thread instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(String);

impl WorkerId {
    /// Create an explicit worker identity
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// Identity of the calling thread: its name, or its id when unnamed
    pub fn current() -> Self {
        let current = thread::current();
        match current.name() {
            Some(name) => Self(name.to_string()),
            None => Self(format!("{:?}", current.id())),
        }
    }

    /// Worker name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key under which a shared instance is cached
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InstanceKey {
    /// The single instance of a singleton binding
    Main,
    /// The instance owned by one worker
    Worker(WorkerId),
}

impl InstanceKey {
    /// Cache key for `policy`, or `None` when the policy never caches
    pub fn for_policy(policy: ResolutionPolicy, worker: &WorkerId) -> Option<Self> {
        match policy {
            ResolutionPolicy::Instance => None,
            ResolutionPolicy::Singleton => Some(Self::Main),
            ResolutionPolicy::PerThread => Some(Self::Worker(worker.clone())),
        }
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str(MAIN_INSTANCE_KEY),
            Self::Worker(worker) => write!(f, "{worker}"),
        }
    }
}
