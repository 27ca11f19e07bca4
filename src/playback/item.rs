use crate::stream::StreamEvent;

/// One audio resource waiting to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackItem {
    pub source_url: String,
    pub label: String,
}

impl PlaybackItem {
    pub fn new(source_url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            label: label.into(),
        }
    }

    /// Build the item for an audio event.
    ///
    /// Returns `None` for other events and for audio with an empty URL.
    pub fn from_event(event: &StreamEvent) -> Option<Self> {
        match event {
            StreamEvent::Audio { url, .. } if !url.trim().is_empty() => {
                let label = event.audio_label()?;
                Some(Self::new(url.clone(), label))
            }
            _ => None,
        }
    }
}
