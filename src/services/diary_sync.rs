//! Diary synchronization routine.
//!
//! Drives the three phases of a rollover run:
//!
//! 1. **Collect** — list the open diary issues (label-filtered, PRs
//!    skipped).
//! 2. **Publish & Close** — per issue: fetch comments, render the digest,
//!    post it to Typetalk, and close the issue unless dry-run.
//! 3. **Roll Forward** — create the next day's entry unless dry-run.
//!
//! Per-issue pipelines are fanned out concurrently and joined before the
//! roll-forward phase runs. Runtime failures are logged and contained to
//! the step they occur in; nothing here escalates to a nonzero exit.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future;

use crate::adapters::github::client::GitHubClient;
use crate::adapters::github::models::{GitHubComment, GitHubCreateIssueRequest, GitHubIssue};
use crate::adapters::typetalk::client::TypetalkClient;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::digest::{next_entry_title, render_digest};
use crate::domain::models::{Config, DiaryComment, DiaryIssue};

/// The issue-to-notification synchronization routine.
pub struct DiarySyncService {
    /// Immutable run configuration.
    config: Config,
    /// Issue tracker client.
    github: Arc<GitHubClient>,
    /// Notification client.
    typetalk: Arc<TypetalkClient>,
}

impl DiarySyncService {
    /// Create a service from pre-built clients.
    pub fn new(config: Config, github: Arc<GitHubClient>, typetalk: Arc<TypetalkClient>) -> Self {
        Self {
            config,
            github,
            typetalk,
        }
    }

    /// Create a service with clients built from the configuration.
    pub fn from_config(config: Config) -> Self {
        let github = Arc::new(GitHubClient::new(config.github_token.clone()));
        let typetalk = Arc::new(TypetalkClient::new(config.typetalk_token.clone()));
        Self::new(config, github, typetalk)
    }

    /// Run the three phases to completion.
    ///
    /// An error here means the collect phase itself failed; everything
    /// after that point is best-effort and only logs.
    pub async fn run(&self) -> DomainResult<()> {
        let issues = self.collect().await?;
        self.publish_and_close(&issues).await;
        self.roll_forward(Utc::now()).await;
        Ok(())
    }

    /// Fetch the open diary issues, skipping pull requests.
    async fn collect(&self) -> DomainResult<Vec<GitHubIssue>> {
        tracing::info!(
            owner = %self.config.owner,
            repo = %self.config.repo,
            label = ?self.config.label,
            "Collecting diary issues"
        );

        let issues = self
            .github
            .list_open_issues(
                &self.config.owner,
                &self.config.repo,
                self.config.label.as_deref(),
            )
            .await?;

        let total_fetched = issues.len();
        let diaries: Vec<GitHubIssue> = issues
            .into_iter()
            // Skip pull requests — GitHub returns them from the issues endpoint.
            .filter(|issue| issue.pull_request.is_none())
            .collect();

        tracing::info!(
            count = diaries.len(),
            total_fetched,
            "Diary issue collection complete"
        );
        Ok(diaries)
    }

    /// Fan out the per-issue pipelines and wait for all of them.
    async fn publish_and_close(&self, issues: &[GitHubIssue]) {
        let tasks = issues.iter().map(|issue| self.publish_issue(issue));
        let results = future::join_all(tasks).await;

        for (issue, result) in issues.iter().zip(results) {
            if let Err(err) = result {
                tracing::error!(
                    issue = issue.number,
                    error = %err,
                    "Diary issue left open"
                );
            }
        }
    }

    /// Relay one issue's digest to Typetalk, then close the issue.
    ///
    /// A failed notification is logged as a warning and does not stop the
    /// close step; a failed close is this issue's terminal error.
    async fn publish_issue(&self, issue: &GitHubIssue) -> DomainResult<()> {
        let comments = self
            .github
            .list_comments(&self.config.owner, &self.config.repo, issue.number)
            .await?;

        let diary = to_diary_issue(issue);
        let comments = comments
            .iter()
            .map(to_diary_comment)
            .collect::<DomainResult<Vec<_>>>()?;

        let digest = render_digest(&diary, &comments, self.config.assignee.as_deref());

        if let Err(err) = self
            .typetalk
            .post_message(&self.config.typetalk_topic_id, &digest)
            .await
        {
            tracing::warn!(
                issue = issue.number,
                error = %err,
                "Typetalk notification failed"
            );
        }

        if self.config.dry_run {
            tracing::info!(issue = issue.number, "Dry run: leaving issue open");
            return Ok(());
        }

        self.github
            .close_issue(&self.config.owner, &self.config.repo, issue.number)
            .await?;
        tracing::info!(issue = issue.number, url = %issue.html_url, "Closed diary issue");
        Ok(())
    }

    /// Open the next diary entry, titled with the shifted target date.
    async fn roll_forward(&self, now: DateTime<Utc>) {
        let title = next_entry_title(now, self.config.target_day_offset);

        if self.config.dry_run {
            tracing::info!(title = %title, "Dry run: skipping next entry creation");
            return;
        }

        let body = match &self.config.template_path {
            // Absent or unreadable template degrades to an empty body.
            Some(path) => tokio::fs::read_to_string(path).await.unwrap_or_default(),
            None => String::new(),
        };

        let request = GitHubCreateIssueRequest {
            title: title.clone(),
            body,
            labels: self.config.label.iter().cloned().collect(),
            assignees: self.config.assignee.iter().cloned().collect(),
        };

        match self
            .github
            .create_issue(&self.config.owner, &self.config.repo, &request)
            .await
        {
            Ok(created) => tracing::info!(
                issue = created.number,
                url = %created.html_url,
                "Opened next diary entry"
            ),
            Err(err) => tracing::error!(
                title = %title,
                error = %err,
                "Failed to open next diary entry"
            ),
        }
    }
}

/// Map a GitHub issue payload to the domain entity.
fn to_diary_issue(issue: &GitHubIssue) -> DiaryIssue {
    DiaryIssue {
        number: issue.number,
        title: issue.title.clone(),
        body: issue.body.clone().unwrap_or_default(),
    }
}

/// Map a GitHub comment payload to the domain entity.
fn to_diary_comment(comment: &GitHubComment) -> DomainResult<DiaryComment> {
    let created_at = comment.created_at.parse::<DateTime<Utc>>().map_err(|e| {
        DomainError::ValidationFailed(format!(
            "comment timestamp '{}' is not ISO 8601: {e}",
            comment.created_at
        ))
    })?;

    Ok(DiaryComment {
        author: comment.user.login.clone(),
        created_at,
        body: comment.body.clone().unwrap_or_default(),
    })
}
