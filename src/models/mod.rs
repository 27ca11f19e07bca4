mod message;
mod request;

pub use message::*;
pub use request::{TopicRequest, TtsRequest, TtsResponse};
