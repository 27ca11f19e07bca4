//! Ordered audio playback.
//!
//! Each session owns one [`PlaybackQueue`]. Items play strictly one after
//! another in enqueue order, through whatever [`AudioPlayer`] the queue was
//! given.
//!
//! [`AudioPlayer`]: crate::traits::AudioPlayer

mod item;
mod queue;

pub use item::PlaybackItem;
pub use queue::{PlaybackQueue, PlaybackSummary};
