pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod staging;
pub mod toolchain;
pub mod ui;

pub use error::{ReleaseError, Result};
