//! Typetalk API request models.

use serde::{Deserialize, Serialize};

/// Request body for posting a message to a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypetalkMessageRequest {
    /// The message text (the rendered diary digest).
    pub message: String,
}
