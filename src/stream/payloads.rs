//! Wire shapes of the records the server sends.

use serde::Deserialize;

use super::events::StreamEvent;

/// A record as it appears on the wire, discriminated by `type`.
///
/// Unknown fields are ignored. A missing required field makes the whole
/// record fail to parse.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum RecordPayload {
    Text {
        content: String,
    },
    Audio {
        audio_url: String,
        unit: String,
        #[serde(default)]
        chunk_index: Option<i64>,
    },
    Error {
        content: String,
    },
    UnitEnd {
        #[serde(default)]
        content: String,
    },
}

impl From<RecordPayload> for StreamEvent {
    fn from(payload: RecordPayload) -> Self {
        match payload {
            RecordPayload::Text { content } => StreamEvent::Text { content },
            RecordPayload::Audio {
                audio_url,
                unit,
                chunk_index,
            } => StreamEvent::Audio {
                url: audio_url,
                unit,
                part_index: chunk_index,
            },
            RecordPayload::Error { content } => StreamEvent::Error { message: content },
            RecordPayload::UnitEnd { content } => StreamEvent::UnitEnd { content },
        }
    }
}
