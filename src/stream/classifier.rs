//! Record classification.

use tracing::debug;

use super::events::StreamEvent;
use super::payloads::RecordPayload;

/// Classify one complete record.
///
/// Never fails: anything that is not a recognised record becomes
/// [`StreamEvent::Raw`] holding the record exactly as received.
pub fn classify_record(record: &str) -> StreamEvent {
    match serde_json::from_str::<RecordPayload>(record) {
        Ok(payload) => payload.into(),
        Err(e) => {
            debug!(error = %e, "Record is not a known event, treating as text");
            StreamEvent::Raw {
                content: record.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(s: &str) -> StreamEvent {
        StreamEvent::Raw {
            content: s.to_string(),
        }
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(
            classify_record(r#"{"type":"text","content":"Hi"}"#),
            StreamEvent::Text {
                content: "Hi".to_string()
            }
        );
    }

    #[test]
    fn test_classify_audio_with_and_without_index() {
        assert_eq!(
            classify_record(
                r#"{"type":"audio","audio_url":"https://cdn/1.mp3","unit":"Unit 1","chunk_index":2}"#
            ),
            StreamEvent::Audio {
                url: "https://cdn/1.mp3".to_string(),
                unit: "Unit 1".to_string(),
                part_index: Some(2),
            }
        );
        assert_eq!(
            classify_record(r#"{"type":"audio","audio_url":"u","unit":"Unit 1"}"#),
            StreamEvent::Audio {
                url: "u".to_string(),
                unit: "Unit 1".to_string(),
                part_index: None,
            }
        );
    }

    #[test]
    fn test_classify_error_and_unit_end() {
        assert_eq!(
            classify_record(r#"{"type":"error","content":"quota exceeded"}"#),
            StreamEvent::Error {
                message: "quota exceeded".to_string()
            }
        );
        assert_eq!(
            classify_record(r#"{"type":"unit_end","content":"Completed Unit 1"}"#),
            StreamEvent::UnitEnd {
                content: "Completed Unit 1".to_string()
            }
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        assert_eq!(
            classify_record(r#"{"type":"text","content":"a","seq":7}"#),
            StreamEvent::Text {
                content: "a".to_string()
            }
        );
    }

    #[test]
    fn test_fallback_to_raw() {
        for record in [
            "not json",
            "[1,2,3]",
            "42",
            r#"{"content":"no type"}"#,
            r#"{"type":"video","content":"x"}"#,
            r#"{"type":"text"}"#,
            r#"{"type":"text","content":5}"#,
            r#"{"type":"audio","unit":"Unit 1"}"#,
            r#"{"type":"text","content":"cut"#,
        ] {
            assert_eq!(classify_record(record), raw(record), "record: {}", record);
        }
    }
}
