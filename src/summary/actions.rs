//! Abstract actions routed through the summary view
//!
//! Key-to-action binding lives in the host; the view only sees these
//! identifiers. Dispatch is two-stage: the view's own handler table first,
//! then the generic list navigator. An action neither stage claims is a
//! no-op, not an error.

/// Abstract action identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    NextLine,
    PrevLine,
    PageUp,
    PageDown,
    FirstLine,
    LastLine,
    ScrollLeft,
    ScrollRight,
    Search(String),
    SearchNext,
    ClearSearch,
    /// Re-pull the provider snapshot and rebuild the line list
    Refresh,
}

impl Action {
    /// Payload-free key for handler table lookup
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::NextLine => ActionKind::NextLine,
            Action::PrevLine => ActionKind::PrevLine,
            Action::PageUp => ActionKind::PageUp,
            Action::PageDown => ActionKind::PageDown,
            Action::FirstLine => ActionKind::FirstLine,
            Action::LastLine => ActionKind::LastLine,
            Action::ScrollLeft => ActionKind::ScrollLeft,
            Action::ScrollRight => ActionKind::ScrollRight,
            Action::Search(_) => ActionKind::Search,
            Action::SearchNext => ActionKind::SearchNext,
            Action::ClearSearch => ActionKind::ClearSearch,
            Action::Refresh => ActionKind::Refresh,
        }
    }
}

/// Discriminant-only view of [`Action`], usable as a map key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    NextLine,
    PrevLine,
    PageUp,
    PageDown,
    FirstLine,
    LastLine,
    ScrollLeft,
    ScrollRight,
    Search,
    SearchNext,
    ClearSearch,
    Refresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strips_payload() {
        assert_eq!(Action::Search("foo".to_string()).kind(), ActionKind::Search);
        assert_eq!(Action::Search("bar".to_string()).kind(), ActionKind::Search);
        assert_eq!(Action::NextLine.kind(), ActionKind::NextLine);
    }
}
