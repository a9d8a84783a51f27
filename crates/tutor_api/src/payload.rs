use serde::{Deserialize, Serialize};

/// One conversational message as carried on the wire.
///
/// Only `user` and `assistant` roles ever appear here; locally synthesized
/// error entries never leave the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

impl WireMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Request payload for the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub tutor_tools: Vec<String>,
    pub topic: String,
    pub model: String,
    /// Default: false.
    #[serde(default)]
    pub use_rag: bool,
}

/// Success body for chat and startup-message responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReplyBody {
    pub reply: String,
}

/// Body of the credential endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenBody {
    pub token: String,
}
