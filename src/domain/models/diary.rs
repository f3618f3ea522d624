//! Diary domain entities.
//!
//! These are the domain-side view of the tracker payloads. The wire models
//! live in the GitHub adapter; the sync service maps them into these types
//! before any rendering happens.

use chrono::{DateTime, Utc};

/// One day's diary issue, titled with its ISO date.
#[derive(Debug, Clone)]
pub struct DiaryIssue {
    /// Issue number within the repository.
    pub number: u64,
    /// Issue title (an ISO `YYYY-MM-DD` date by convention).
    pub title: String,
    /// Markdown checklist body; empty when the issue has no body.
    pub body: String,
}

/// A comment on a diary issue.
///
/// Comments are read-only for this system: they are fetched and rendered
/// into the digest, never created or modified.
#[derive(Debug, Clone)]
pub struct DiaryComment {
    /// Handle of the comment author.
    pub author: String,
    /// Creation instant as reported by the tracker.
    pub created_at: DateTime<Utc>,
    /// Comment text; empty when the comment has no body.
    pub body: String,
}
