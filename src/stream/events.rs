//! Classified stream events.

use std::fmt;

/// One classified record from the response stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A piece of the assistant's answer
    Text { content: String },
    /// Audio for part of a unit, ready to be queued
    Audio {
        url: String,
        unit: String,
        part_index: Option<i64>,
    },
    /// An error reported by the server inside the stream
    Error { message: String },
    /// The server finished one unit of the lesson
    UnitEnd { content: String },
    /// A record that could not be classified, kept verbatim
    Raw { content: String },
}

impl StreamEvent {
    /// Get the event type name for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            StreamEvent::Text { .. } => "text",
            StreamEvent::Audio { .. } => "audio",
            StreamEvent::Error { .. } => "error",
            StreamEvent::UnitEnd { .. } => "unit_end",
            StreamEvent::Raw { .. } => "raw",
        }
    }

    /// Text this event adds to the open assistant message, if any.
    pub fn text_contribution(&self) -> Option<String> {
        match self {
            StreamEvent::Text { content } | StreamEvent::Raw { content } => Some(content.clone()),
            StreamEvent::Error { message } => Some(format!("⚠️ {}", message)),
            StreamEvent::Audio { .. } | StreamEvent::UnitEnd { .. } => None,
        }
    }

    /// Playback label for an audio event: `"<unit> - part <n>"`.
    ///
    /// A missing or zero part index is shown as part 1.
    pub fn audio_label(&self) -> Option<String> {
        match self {
            StreamEvent::Audio {
                unit, part_index, ..
            } => {
                let part = match part_index {
                    Some(n) if *n != 0 => *n,
                    _ => 1,
                };
                Some(format!("{} - part {}", unit, part))
            }
            _ => None,
        }
    }
}

impl fmt::Display for StreamEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamEvent::Text { content } => write!(f, "text({} chars)", content.len()),
            StreamEvent::Audio { url, unit, .. } => write!(f, "audio({}: {})", unit, url),
            StreamEvent::Error { message } => write!(f, "error({})", message),
            StreamEvent::UnitEnd { content } => write!(f, "unit_end({})", content),
            StreamEvent::Raw { content } => write!(f, "raw({} chars)", content.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_contribution() {
        let text = StreamEvent::Text {
            content: "Hi".to_string(),
        };
        let error = StreamEvent::Error {
            message: "model overloaded".to_string(),
        };
        let unit_end = StreamEvent::UnitEnd {
            content: "Completed Unit 1".to_string(),
        };

        assert_eq!(text.text_contribution().as_deref(), Some("Hi"));
        assert_eq!(
            error.text_contribution().as_deref(),
            Some("⚠️ model overloaded")
        );
        assert_eq!(unit_end.text_contribution(), None);
    }

    #[test]
    fn test_audio_label() {
        let audio = |part_index| StreamEvent::Audio {
            url: "https://cdn/a.mp3".to_string(),
            unit: "Unit 2".to_string(),
            part_index,
        };

        assert_eq!(audio(Some(3)).audio_label().as_deref(), Some("Unit 2 - part 3"));
        assert_eq!(audio(None).audio_label().as_deref(), Some("Unit 2 - part 1"));
        assert_eq!(audio(Some(0)).audio_label().as_deref(), Some("Unit 2 - part 1"));
        assert_eq!(
            StreamEvent::Raw {
                content: "x".to_string()
            }
            .audio_label(),
            None
        );
    }
}
