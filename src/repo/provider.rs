//! Repository provider seams
//!
//! The summary view never computes repository state itself. It pulls the
//! current snapshot through [`RepoQuery`] and receives change notifications
//! as [`RepoEvent`]s, whose payloads it deliberately ignores: on any event it
//! re-pulls from the provider, which is the source of truth.

use std::sync::Mutex;

use crate::repo::{RefHandle, StatusSnapshot};

/// Pull-based, read-only view of repository state
///
/// Implementations must return already-materialized data: callers may hold
/// locks across these calls and expect no blocking I/O.
pub trait RepoQuery: Send + Sync {
    /// The current HEAD
    fn head(&self) -> RefHandle;

    /// The current working tree status, or `None` when unavailable
    /// (e.g. a bare repository)
    fn status(&self) -> Option<StatusSnapshot>;
}

/// Repository change notification kinds
///
/// Consumers treat every kind identically: re-pull and rebuild. Carrying the
/// kind anyway keeps logs useful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoEvent {
    RefsChanged,
    HeadChanged,
    TrackingBranchesUpdated,
    StatusChanged,
}

/// In-memory provider with settable state
///
/// Useful for tests and for hosts that compute repository state elsewhere.
pub struct MemoryRepo {
    state: Mutex<(RefHandle, Option<StatusSnapshot>)>,
}

impl MemoryRepo {
    pub fn new(head: RefHandle, status: Option<StatusSnapshot>) -> Self {
        Self {
            state: Mutex::new((head, status)),
        }
    }

    pub fn set_head(&self, head: RefHandle) {
        self.lock().0 = head;
    }

    pub fn set_status(&self, status: Option<StatusSnapshot>) {
        self.lock().1 = status;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, (RefHandle, Option<StatusSnapshot>)> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RepoQuery for MemoryRepo {
    fn head(&self) -> RefHandle {
        self.lock().0.clone()
    }

    fn status(&self) -> Option<StatusSnapshot> {
        self.lock().1.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_repo_roundtrip() {
        let repo = MemoryRepo::new(
            RefHandle::Local {
                name: "main".to_string(),
                tracking: None,
            },
            None,
        );

        assert_eq!(repo.head().display_name(), "main");
        assert!(repo.status().is_none());

        repo.set_head(RefHandle::Detached {
            commit_id: "abcd123".to_string(),
        });
        assert_eq!(repo.head().display_name(), "<detached@abcd123>");
    }
}
