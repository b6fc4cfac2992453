//! User interface module - operator-facing output.
//!
//! - `formatter` - Pure formatting functions
//! - This module - re-exports used by the orchestrator and binary

pub mod formatter;

pub use formatter::{
    display_dry_run, display_error, display_mode, display_outcome, display_release_warning,
    display_status, display_success, summarize_outcome,
};
