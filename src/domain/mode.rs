use std::ffi::OsString;
use std::fmt;

/// Where the orchestrator is running, which decides stage vs. publish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Operator's machine: stage, bump, and cut the hosted release
    Local,
    /// CI runner: stage, bump, and publish to the registry
    Automated,
}

impl ExecutionMode {
    /// Mode implied by the value of the execution-context marker.
    ///
    /// Presence alone counts, so `CI=` (empty) is still automated.
    pub fn from_marker(marker: Option<OsString>) -> Self {
        match marker {
            Some(_) => ExecutionMode::Automated,
            None => ExecutionMode::Local,
        }
    }

    /// Read the marker variable from the process environment
    pub fn detect(marker_var: &str) -> Self {
        Self::from_marker(std::env::var_os(marker_var))
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Local => write!(f, "local"),
            ExecutionMode::Automated => write!(f, "automated"),
        }
    }
}
