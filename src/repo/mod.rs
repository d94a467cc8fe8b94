//! Repository data model and providers
//!
//! The summary view consumes repository state through two narrow seams:
//! a pull-based [`RepoQuery`] for the current snapshot and push-based
//! [`RepoEvent`] notifications. [`LocalRepo`] implements both over libgit2.

mod local;
mod provider;
mod refs;
mod status;

pub use local::LocalRepo;
pub use provider::{MemoryRepo, RepoEvent, RepoQuery};
pub use refs::{detached_display_value, RefHandle, TrackingInfo};
pub use status::{ChangeKind, Section, StatusEntry, StatusSnapshot};
