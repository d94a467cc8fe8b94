//! Local repository provider backed by libgit2
//!
//! [`LocalRepo`] keeps a materialized snapshot of HEAD, tracking counts and
//! working tree status. [`LocalRepo::refresh`] performs the git I/O and
//! reports which [`RepoEvent`]s the new snapshot implies; the [`RepoQuery`]
//! accessors only read the cache, so view regeneration never blocks on git.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use git2::{BranchType, Repository, Status, StatusOptions};
use tracing::{debug, instrument};

use crate::error::{GitError, Result};
use crate::repo::{
    ChangeKind, RefHandle, RepoEvent, RepoQuery, Section, StatusEntry, StatusSnapshot, TrackingInfo,
};

/// Materialized repository state
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    head: RefHandle,
    status: Option<StatusSnapshot>,
    branch_names: Vec<String>,
}

/// Repository provider for a repository on disk
pub struct LocalRepo {
    repo: Mutex<Repository>,
    path: PathBuf,
    cache: Mutex<Snapshot>,
}

impl LocalRepo {
    /// Discover a repository from a path (searches parent directories)
    /// and materialize its initial snapshot
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::discover(path.as_ref())
            .map_err(|_e| GitError::NotARepository(path.as_ref().to_path_buf()))?;

        let repo_path = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();

        let snapshot = read_snapshot(&repo)?;
        debug!("Discovered repository at {:?}", repo_path);

        Ok(Self {
            repo: Mutex::new(repo),
            path: repo_path,
            cache: Mutex::new(snapshot),
        })
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read repository state and swap the cached snapshot
    ///
    /// Returns the notifications implied by what changed; empty when the
    /// repository state is unchanged.
    pub fn refresh(&self) -> Result<Vec<RepoEvent>> {
        let snapshot = {
            let repo = lock(&self.repo);
            read_snapshot(&repo)?
        };

        let mut cache = lock(&self.cache);
        let mut events = Vec::new();

        if cache.branch_names != snapshot.branch_names {
            events.push(RepoEvent::RefsChanged);
        }
        if head_identity(&cache.head) != head_identity(&snapshot.head) {
            events.push(RepoEvent::HeadChanged);
        } else if cache.head.tracking() != snapshot.head.tracking() {
            events.push(RepoEvent::TrackingBranchesUpdated);
        }
        if cache.status != snapshot.status {
            events.push(RepoEvent::StatusChanged);
        }

        if !events.is_empty() {
            debug!(?events, "repository state changed");
        }

        *cache = snapshot;
        Ok(events)
    }
}

impl RepoQuery for LocalRepo {
    fn head(&self) -> RefHandle {
        lock(&self.cache).head.clone()
    }

    fn status(&self) -> Option<StatusSnapshot> {
        lock(&self.cache).status.clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Name/variant of a head, ignoring tracking counts
fn head_identity(head: &RefHandle) -> (bool, String) {
    match head {
        RefHandle::Detached { commit_id } => (true, commit_id.clone()),
        RefHandle::Local { name, .. } => (false, name.clone()),
    }
}

fn read_snapshot(repo: &Repository) -> Result<Snapshot> {
    Ok(Snapshot {
        head: read_head(repo)?,
        status: read_status(repo)?,
        branch_names: read_branch_names(repo)?,
    })
}

fn read_head(repo: &Repository) -> Result<RefHandle> {
    if repo.head_detached().unwrap_or(false) {
        let head = repo.head().map_err(GitError::from)?;
        let oid = head
            .target()
            .ok_or_else(|| GitError::InvalidRef("detached HEAD has no target".to_string()))?;
        return Ok(RefHandle::Detached {
            commit_id: oid.to_string(),
        });
    }

    match repo.head() {
        Ok(head) => {
            let name = head.shorthand().unwrap_or("HEAD").to_string();
            let tracking = read_tracking(repo, &name)?;
            Ok(RefHandle::Local { name, tracking })
        }
        Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
            // Unborn branch: HEAD is a symbolic ref to a branch with no commits
            let reference = repo.find_reference("HEAD").map_err(GitError::from)?;
            let name = reference
                .symbolic_target()
                .and_then(|target| target.strip_prefix("refs/heads/"))
                .unwrap_or("HEAD")
                .to_string();
            Ok(RefHandle::Local {
                name,
                tracking: None,
            })
        }
        Err(e) => Err(GitError::from(e).into()),
    }
}

fn read_tracking(repo: &Repository, name: &str) -> Result<Option<TrackingInfo>> {
    let branch = match repo.find_branch(name, BranchType::Local) {
        Ok(branch) => branch,
        Err(_) => return Ok(None),
    };
    let upstream = match branch.upstream() {
        Ok(upstream) => upstream,
        Err(_) => return Ok(None),
    };

    let (Some(local_oid), Some(upstream_oid)) = (branch.get().target(), upstream.get().target())
    else {
        return Ok(None);
    };

    let (ahead, behind) = repo
        .graph_ahead_behind(local_oid, upstream_oid)
        .map_err(GitError::from)?;

    Ok(Some(TrackingInfo { ahead, behind }))
}

fn read_branch_names(repo: &Repository) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for branch in repo.branches(Some(BranchType::Local)).map_err(GitError::from)? {
        let (branch, _) = branch.map_err(GitError::from)?;
        if let Ok(Some(name)) = branch.name() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Read working tree status grouped into staged then unstaged entries
///
/// Staged-before-unstaged is this provider's section ordering contract;
/// the snapshot preserves whatever order its builder defines.
fn read_status(repo: &Repository) -> Result<Option<StatusSnapshot>> {
    if repo.is_bare() {
        return Ok(None);
    }

    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false)
        .renames_head_to_index(true)
        .renames_index_to_workdir(true);

    let statuses = repo.statuses(Some(&mut opts)).map_err(GitError::from)?;

    let mut staged = Vec::new();
    let mut unstaged = Vec::new();

    for entry in statuses.iter() {
        let status = entry.status();

        if status.is_conflicted() {
            unstaged.push(build_entry(
                ChangeKind::Conflicted,
                entry.index_to_workdir(),
                entry.path(),
            ));
            continue;
        }

        if let Some(kind) = staged_kind(status) {
            staged.push(build_entry(kind, entry.head_to_index(), entry.path()));
        }
        if let Some(kind) = unstaged_kind(status) {
            unstaged.push(build_entry(kind, entry.index_to_workdir(), entry.path()));
        }
    }

    let mut snapshot = StatusSnapshot::new();
    for entry in staged {
        snapshot.push(Section::Staged, entry);
    }
    for entry in unstaged {
        snapshot.push(Section::Unstaged, entry);
    }

    Ok(Some(snapshot))
}

fn staged_kind(status: Status) -> Option<ChangeKind> {
    if status.is_index_new() {
        Some(ChangeKind::New)
    } else if status.is_index_modified() {
        Some(ChangeKind::Modified)
    } else if status.is_index_deleted() {
        Some(ChangeKind::Deleted)
    } else if status.is_index_renamed() {
        Some(ChangeKind::Renamed)
    } else if status.is_index_typechange() {
        Some(ChangeKind::TypeChanged)
    } else {
        None
    }
}

fn unstaged_kind(status: Status) -> Option<ChangeKind> {
    if status.is_wt_new() {
        Some(ChangeKind::New)
    } else if status.is_wt_modified() {
        Some(ChangeKind::Modified)
    } else if status.is_wt_deleted() {
        Some(ChangeKind::Deleted)
    } else if status.is_wt_renamed() {
        Some(ChangeKind::Renamed)
    } else if status.is_wt_typechange() {
        Some(ChangeKind::TypeChanged)
    } else {
        None
    }
}

fn build_entry(
    kind: ChangeKind,
    delta: Option<git2::DiffDelta<'_>>,
    fallback_path: Option<&str>,
) -> StatusEntry {
    let new_path = delta
        .as_ref()
        .and_then(|d| d.new_file().path())
        .map(|p| p.to_string_lossy().into_owned())
        .or_else(|| fallback_path.map(str::to_string))
        .unwrap_or_default();

    if kind == ChangeKind::Renamed {
        let old_path = delta
            .as_ref()
            .and_then(|d| d.old_file().path())
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| new_path.clone());
        StatusEntry::renamed(old_path, new_path)
    } else {
        StatusEntry::new(kind, new_path)
    }
}
