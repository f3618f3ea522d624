//! GitHub HTTP client with rate limiting.
//!
//! Wraps the GitHub REST API v3, providing typed methods for the
//! operations used by the diary sync routine. Includes a token-bucket
//! rate limiter to stay within the 5 000 req/hour authenticated API
//! limit. Listing methods walk pages transparently and return the
//! flattened result in API order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};

use super::models::{
    GitHubComment, GitHubCreateIssueRequest, GitHubCreateIssueResponse, GitHubIssue,
    GitHubIssueUpdateRequest,
};

/// Base URL for the GitHub REST API v3.
const GITHUB_API_BASE: &str = "https://api.github.com";

/// Page size used by the listing endpoints.
const PER_PAGE: usize = 100;

/// Token-bucket rate limiter.
///
/// Allows up to `capacity` requests per `window`. When the bucket is
/// exhausted, [`acquire`](RateLimiter::acquire) sleeps until the window
/// resets and a token becomes available.
#[derive(Debug)]
pub struct RateLimiter {
    /// Maximum tokens in the bucket.
    capacity: u32,
    /// Current available tokens.
    tokens: u32,
    /// Duration of the refill window.
    window: Duration,
    /// When the current window started.
    window_start: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter with the given capacity and window.
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self {
            capacity,
            tokens: capacity,
            window,
            window_start: Instant::now(),
        }
    }

    /// Acquire a single token, sleeping if necessary.
    ///
    /// If the current window has elapsed, the bucket is refilled.
    /// If no tokens are available, this method sleeps until the
    /// window resets.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();
        if elapsed >= self.window {
            // Refill the bucket and start a new window.
            self.tokens = self.capacity;
            self.window_start = Instant::now();
        }

        if self.tokens > 0 {
            self.tokens -= 1;
        } else {
            // Sleep until the window resets.
            let remaining = self.window.saturating_sub(elapsed);
            tracing::warn!(
                sleep_ms = remaining.as_millis() as u64,
                "GitHub rate limit reached, sleeping"
            );
            tokio::time::sleep(remaining).await;
            // After sleeping, refill and consume one token.
            self.tokens = self.capacity - 1;
            self.window_start = Instant::now();
        }
    }
}

/// HTTP client for the GitHub REST API v3.
///
/// All methods return [`DomainResult`] and map HTTP / network errors
/// to [`DomainError::ExecutionFailed`]. The token is optional: without
/// one, requests go out unauthenticated.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    /// The underlying HTTP client.
    http: Client,
    /// Base URL, overridable for tests.
    base_url: String,
    /// GitHub personal access token or fine-grained token.
    token: Option<String>,
    /// Shared rate limiter (5 000 req/hr for authenticated requests).
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl GitHubClient {
    /// Create a new client with an optional token.
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(token, GITHUB_API_BASE)
    }

    /// Create a new client against a custom API base URL.
    pub fn with_base_url(token: Option<String>, base_url: impl Into<String>) -> Self {
        // GitHub allows 5 000 authenticated requests per hour.
        let rate_limiter = RateLimiter::new(5_000, Duration::from_secs(3_600));
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token,
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        }
    }

    /// Acquire a rate-limit token and build an authorized request.
    async fn rate_limited_request(
        &self,
        method: reqwest::Method,
        url: &str,
    ) -> reqwest::RequestBuilder {
        self.rate_limiter.lock().await.acquire().await;
        let mut req = self
            .http
            .request(method, url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header("User-Agent", "nikki");
        if let Some(token) = &self.token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        req
    }

    /// Fetch one page of a listing endpoint and deserialize it.
    async fn fetch_page<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        url: &str,
    ) -> DomainResult<Vec<T>> {
        let resp = self
            .rate_limited_request(reqwest::Method::GET, url)
            .await
            .send()
            .await
            .map_err(|e| {
                DomainError::ExecutionFailed(format!("GitHub {operation} request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::ExecutionFailed(format!(
                "GitHub {operation} returned {status}: {body}"
            )));
        }

        resp.json::<Vec<T>>().await.map_err(|e| {
            DomainError::ExecutionFailed(format!("GitHub {operation} parse failed: {e}"))
        })
    }

    /// List all open issues in a repository, optionally filtered by label.
    ///
    /// Pages are walked until a short page and flattened in API order.
    ///
    /// Note: GitHub's `/issues` endpoint also returns pull requests.
    /// Callers are responsible for filtering them out via the
    /// `pull_request` field.
    pub async fn list_open_issues(
        &self,
        owner: &str,
        repo: &str,
        label: Option<&str>,
    ) -> DomainResult<Vec<GitHubIssue>> {
        let mut issues = Vec::new();
        let mut page = 1usize;
        loop {
            let mut url = format!(
                "{}/repos/{}/{}/issues?state=open&per_page={PER_PAGE}&page={page}",
                self.base_url, owner, repo
            );
            if let Some(label) = label {
                url.push_str(&format!("&labels={label}"));
            }

            let batch: Vec<GitHubIssue> = self.fetch_page("list_issues", &url).await?;
            let short_page = batch.len() < PER_PAGE;
            issues.extend(batch);
            if short_page {
                return Ok(issues);
            }
            page += 1;
        }
    }

    /// List all comments on an issue, in chronological API order.
    ///
    /// Pages are walked until a short page and flattened.
    pub async fn list_comments(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
    ) -> DomainResult<Vec<GitHubComment>> {
        let mut comments = Vec::new();
        let mut page = 1usize;
        loop {
            let url = format!(
                "{}/repos/{}/{}/issues/{}/comments?per_page={PER_PAGE}&page={page}",
                self.base_url, owner, repo, issue_number
            );

            let batch: Vec<GitHubComment> = self.fetch_page("list_comments", &url).await?;
            let short_page = batch.len() < PER_PAGE;
            comments.extend(batch);
            if short_page {
                return Ok(comments);
            }
            page += 1;
        }
    }

    /// Close an issue.
    ///
    /// The rollover contract requires exactly HTTP 200 from the update;
    /// any other status is reported as an error.
    pub async fn close_issue(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
    ) -> DomainResult<()> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}",
            self.base_url, owner, repo, issue_number
        );
        let body = GitHubIssueUpdateRequest {
            state: "closed".to_string(),
        };

        let resp = self
            .rate_limited_request(reqwest::Method::PATCH, &url)
            .await
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::ExecutionFailed(format!("GitHub close_issue request failed: {e}"))
            })?;

        if resp.status() != StatusCode::OK {
            let status = resp.status();
            let body_text = resp.text().await.unwrap_or_default();
            return Err(DomainError::ExecutionFailed(format!(
                "GitHub close_issue returned {status}: {body_text}"
            )));
        }

        Ok(())
    }

    /// Create a new issue in a repository.
    ///
    /// Requires exactly HTTP 201; returns the created issue's number
    /// and URL.
    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        request: &GitHubCreateIssueRequest,
    ) -> DomainResult<GitHubCreateIssueResponse> {
        let url = format!("{}/repos/{}/{}/issues", self.base_url, owner, repo);

        let resp = self
            .rate_limited_request(reqwest::Method::POST, &url)
            .await
            .json(request)
            .send()
            .await
            .map_err(|e| {
                DomainError::ExecutionFailed(format!("GitHub create_issue request failed: {e}"))
            })?;

        if resp.status() != StatusCode::CREATED {
            let status = resp.status();
            let body_text = resp.text().await.unwrap_or_default();
            return Err(DomainError::ExecutionFailed(format!(
                "GitHub create_issue returned {status}: {body_text}"
            )));
        }

        resp.json::<GitHubCreateIssueResponse>().await.map_err(|e| {
            DomainError::ExecutionFailed(format!("GitHub create_issue parse failed: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_creation() {
        let rl = RateLimiter::new(5_000, Duration::from_secs(3_600));
        assert_eq!(rl.capacity, 5_000);
        assert_eq!(rl.tokens, 5_000);
    }

    #[tokio::test]
    async fn test_rate_limiter_acquire_decrements_tokens() {
        let mut rl = RateLimiter::new(5, Duration::from_secs(60));
        rl.acquire().await;
        assert_eq!(rl.tokens, 4);
        rl.acquire().await;
        assert_eq!(rl.tokens, 3);
    }

    #[test]
    fn test_client_defaults_to_public_api() {
        let client = GitHubClient::new(Some("ghp_test_token".to_string()));
        assert_eq!(client.base_url, GITHUB_API_BASE);
        assert_eq!(client.token.as_deref(), Some("ghp_test_token"));
    }

    #[test]
    fn test_client_without_token() {
        let client = GitHubClient::new(None);
        assert!(client.token.is_none());
    }

    #[test]
    fn test_client_base_url_override() {
        let client = GitHubClient::with_base_url(None, "http://127.0.0.1:9999");
        assert_eq!(client.base_url, "http://127.0.0.1:9999");
    }
}
