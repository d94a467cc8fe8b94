//! git-glance - A terminal summary panel for git repositories
//!
//! Shows the current branch (with ahead/behind counts against its upstream)
//! and the set of staged and unstaged file changes as a scrollable,
//! keyboard-navigable list that stays consistent while the repository
//! changes underneath it.
//!
//! # Architecture
//!
//! The summary panel is built from a handful of small pieces:
//! - **Line model** - heterogeneous display lines that each know how to
//!   render themselves, both styled and as plain text
//! - **Row generator** - pure function from a repository snapshot to an
//!   ordered line list
//! - **Summary view** - owns the line list and viewport under one lock,
//!   regenerates on every repository notification and routes actions
//!
//! # Modules
//!
//! - [`repo`] - Repository data model and the libgit2-backed provider
//! - [`summary`] - Line model, row generation, viewport and view
//! - [`tui`] - Event-driven terminal shell with ratatui
//! - [`config`] - Layered configuration
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod repo;
pub mod summary;
pub mod tui;

pub use config::Config;
pub use error::{Error, Result};
pub use repo::{ChangeKind, RefHandle, RepoEvent, RepoQuery, Section, StatusEntry, StatusSnapshot};
pub use summary::{Action, SummaryLine, SummaryView};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
