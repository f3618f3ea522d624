//! Typetalk HTTP client.
//!
//! Wraps the single Typetalk API operation the diary sync routine needs:
//! posting a message to a topic. One message goes out per diary issue, so
//! unlike the GitHub side there is no rate limiter here.

use reqwest::Client;

use crate::domain::errors::{DomainError, DomainResult};

use super::models::TypetalkMessageRequest;

/// Base URL for the Typetalk API v1.
const TYPETALK_API_BASE: &str = "https://typetalk.com/api/v1";

/// HTTP client for the Typetalk API.
///
/// All methods return [`DomainResult`] and map HTTP / network errors
/// to [`DomainError::ExecutionFailed`].
#[derive(Debug, Clone)]
pub struct TypetalkClient {
    /// The underlying HTTP client.
    http: Client,
    /// Base URL, overridable for tests.
    base_url: String,
    /// Typetalk API token (`X-TYPETALK-TOKEN` header).
    token: String,
}

impl TypetalkClient {
    /// Create a new client with the given token.
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, TYPETALK_API_BASE)
    }

    /// Create a new client against a custom API base URL.
    pub fn with_base_url(token: String, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    /// Post a message to a topic.
    pub async fn post_message(&self, topic_id: &str, message: &str) -> DomainResult<()> {
        let url = format!("{}/topics/{}", self.base_url, topic_id);
        let body = TypetalkMessageRequest {
            message: message.to_string(),
        };

        let resp = self
            .http
            .post(&url)
            .header("X-TYPETALK-TOKEN", &self.token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::ExecutionFailed(format!("Typetalk post_message request failed: {e}"))
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body_text = resp.text().await.unwrap_or_default();
            return Err(DomainError::ExecutionFailed(format!(
                "Typetalk post_message returned {status}: {body_text}"
            )));
        }

        Ok(())
    }
}
