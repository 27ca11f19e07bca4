use serde::{Deserialize, Serialize};

/// Body of the request that opens a tutoring stream
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicRequest {
    /// What the user wants to learn about
    pub topic: String,
}

impl TopicRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }
}

/// Body of a one-shot text-to-speech request.
///
/// Both fields are optional; the server falls back to its own sample text
/// and default voice, so the default request serializes as `{}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TtsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

impl TtsRequest {
    /// Speak this text (builder pattern)
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Use this voice (builder pattern)
    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice_id = Some(voice_id.into());
        self
    }
}

/// Response of the text-to-speech endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TtsResponse {
    pub audio_url: String,
}
