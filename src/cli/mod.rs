//! Workflow layer between argument parsing and the toolchain

pub mod orchestration;

pub use orchestration::{run_release, Orchestrator, ReleaseArgs, ReleaseOutcome};
