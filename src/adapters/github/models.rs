//! GitHub Issues API response and request models.
//!
//! These structs map to the GitHub REST API v3 JSON payloads. They are used
//! internally by the GitHub adapter and are not part of the domain model.

use serde::{Deserialize, Serialize};

/// An issue returned by the GitHub API.
///
/// Note: issues and pull requests share the same endpoint. Pull requests
/// include a non-null `pull_request` field; the collect phase skips those.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssue {
    /// Sequential number within the repository (e.g., 42 → "#42").
    pub number: u64,
    /// Issue title.
    pub title: String,
    /// Issue body text (may be absent or null).
    #[serde(default)]
    pub body: Option<String>,
    /// Current state: "open" or "closed".
    pub state: String,
    /// Present when this item is actually a pull request, not an issue.
    #[serde(default)]
    pub pull_request: Option<GitHubPullRequestRef>,
    /// URL to view the issue in the GitHub UI.
    pub html_url: String,
}

/// Reference object present on pull requests (absent on plain issues).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubPullRequestRef {
    /// API URL of the pull request resource.
    pub url: String,
}

/// The author of an issue comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    /// Account handle.
    pub login: String,
}

/// A comment returned by the issue-comments endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubComment {
    /// Comment body text (may be absent or null).
    #[serde(default)]
    pub body: Option<String>,
    /// The comment author.
    pub user: GitHubUser,
    /// ISO 8601 timestamp of creation.
    pub created_at: String,
}

/// Request body for updating (patching) an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubIssueUpdateRequest {
    /// New state: "open" or "closed".
    pub state: String,
}

/// Request body for creating a new GitHub issue.
///
/// `labels` and `assignees` are always serialized, possibly as empty
/// arrays — this mirrors the payload the rollover has historically sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCreateIssueRequest {
    /// Issue title.
    pub title: String,
    /// Issue body text.
    pub body: String,
    /// Labels to apply to the new issue.
    pub labels: Vec<String>,
    /// Handles to assign the new issue to.
    pub assignees: Vec<String>,
}

/// Response from the create-issue endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubCreateIssueResponse {
    /// Issue number within the repository.
    pub number: u64,
    /// URL to view the issue in the GitHub UI.
    pub html_url: String,
}
