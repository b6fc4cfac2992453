//! Domain logic - pure release rules independent of processes and the file system

pub mod dist_tag;
pub mod mode;
pub mod version;

pub use dist_tag::{resolve_dist_tag, DistTag};
pub use mode::ExecutionMode;
pub use version::{BumpKeyword, VersionSpecifier};
