//! Working tree status model
//!
//! A [`StatusSnapshot`] is a grouped, ordered collection of file-level change
//! records. Section iteration order is owned by whoever builds the snapshot;
//! consumers must not re-sort it.

/// Whether a change is recorded in the index or only in the working tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Staged,
    Unstaged,
}

/// Classification of a single file-level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    New,
    Modified,
    Deleted,
    Renamed,
    TypeChanged,
    Conflicted,
}

/// One file-level change record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub kind: ChangeKind,
    /// Previous path, present only for renames
    pub old_path: Option<String>,
    pub new_path: String,
}

impl StatusEntry {
    pub fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            old_path: None,
            new_path: path.into(),
        }
    }

    pub fn renamed(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Renamed,
            old_path: Some(old_path.into()),
            new_path: new_path.into(),
        }
    }
}

/// Status entries grouped by section, in provider-defined order
///
/// Sections appear in the order they were first pushed; entries within a
/// section keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    sections: Vec<(Section, Vec<StatusEntry>)>,
}

impl StatusSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to a section, creating the section bucket on first use
    pub fn push(&mut self, section: Section, entry: StatusEntry) {
        match self.sections.iter_mut().find(|(s, _)| *s == section) {
            Some((_, entries)) => entries.push(entry),
            None => self.sections.push((section, vec![entry])),
        }
    }

    /// Whether any entries exist in either section
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|(_, entries)| entries.is_empty())
    }

    /// Sections in their defined iteration order
    pub fn sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.sections.iter().map(|(section, _)| *section)
    }

    /// Entries of one section, in insertion order
    pub fn entries(&self, section: Section) -> &[StatusEntry] {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of entries across all sections
    pub fn len(&self) -> usize {
        self.sections.iter().map(|(_, entries)| entries.len()).sum()
    }
}
