//! Ref model: the repository's current checked-out position

/// Ahead/behind commit counts of a local branch relative to its upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingInfo {
    pub ahead: usize,
    pub behind: usize,
}

/// The current HEAD: either a detached commit pointer or a named local branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefHandle {
    /// HEAD points directly at a commit
    Detached { commit_id: String },
    /// HEAD points at a local branch, which may track an upstream
    Local {
        name: String,
        tracking: Option<TrackingInfo>,
    },
}

impl RefHandle {
    /// Short display name: the branch name, or a placeholder derived from
    /// the commit id when HEAD is detached
    pub fn display_name(&self) -> String {
        match self {
            RefHandle::Detached { commit_id } => detached_display_value(commit_id),
            RefHandle::Local { name, .. } => name.clone(),
        }
    }

    /// Tracking info when HEAD is a local branch with an upstream
    pub fn tracking(&self) -> Option<TrackingInfo> {
        match self {
            RefHandle::Local { tracking, .. } => *tracking,
            RefHandle::Detached { .. } => None,
        }
    }
}

const SHORT_OID_LENGTH: usize = 7;

/// Placeholder name shown for a detached HEAD
pub fn detached_display_value(commit_id: &str) -> String {
    let short = commit_id.get(..SHORT_OID_LENGTH).unwrap_or(commit_id);
    format!("<detached@{short}>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_display_value() {
        assert_eq!(detached_display_value("abcd123"), "<detached@abcd123>");
        assert_eq!(
            detached_display_value("0123456789abcdef0123456789abcdef01234567"),
            "<detached@0123456>"
        );
        // Shorter than the truncation length is kept as-is
        assert_eq!(detached_display_value("ab12"), "<detached@ab12>");
    }

    #[test]
    fn test_display_name() {
        let head = RefHandle::Local {
            name: "main".to_string(),
            tracking: None,
        };
        assert_eq!(head.display_name(), "main");
        assert_eq!(head.tracking(), None);

        let head = RefHandle::Detached {
            commit_id: "abcd123".to_string(),
        };
        assert_eq!(head.display_name(), "<detached@abcd123>");
    }

    #[test]
    fn test_tracking_accessor() {
        let head = RefHandle::Local {
            name: "main".to_string(),
            tracking: Some(TrackingInfo { ahead: 2, behind: 1 }),
        };
        assert_eq!(head.tracking(), Some(TrackingInfo { ahead: 2, behind: 1 }));
    }
}
