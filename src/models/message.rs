use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Position-independent id, unique within a conversation
    pub id: u64,
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
    /// When the message was created
    pub created_at: DateTime<Utc>,
    /// Whether the message is still receiving streamed content
    #[serde(default)]
    pub is_streaming: bool,
}

impl Message {
    pub fn user(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            role: MessageRole::User,
            content: content.into(),
            created_at: Utc::now(),
            is_streaming: false,
        }
    }

    pub fn assistant(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            role: MessageRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
            is_streaming: false,
        }
    }

    /// An empty assistant message that streamed content will be appended to
    pub fn streaming_assistant(id: u64) -> Self {
        Self {
            is_streaming: true,
            ..Self::assistant(id, String::new())
        }
    }

    /// Append streamed text. Content only ever grows.
    pub fn append_token(&mut self, token: &str) {
        self.content.push_str(token);
    }

    /// Mark the message as no longer streaming
    pub fn finalize(&mut self) {
        self.is_streaming = false;
    }
}
