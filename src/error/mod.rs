//! Unified error handling for the tutor client.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain-specific Errors**: Network, Stream, Session, Playback and Config
//! - **Unified Error Type**: `TutorError` consolidates all error types
//! - **Error Context**: operation and session information attached to errors
//! - **Result Type Alias**: `TutorResult<T>` for consistent return types
//!
//! # Propagation
//!
//! Only transport failures and protocol `error` records reach the visible
//! conversation. Records that fail to parse are treated as text and never
//! become errors. Playback errors are logged and the queue moves on.
//! Cancellation is not an error at all.
//!
//! | Category | Where it surfaces | Retryable |
//! |----------|-------------------|-----------|
//! | Network | inline in the assistant message | Yes |
//! | Server | inline in the assistant message | Yes |
//! | User | prompt message | No |
//! | Playback | log only | No |
//! | Configuration | startup failure | No |

mod category;
mod config;
mod context;
mod network;
mod playback;
mod result;
mod session;
mod stream;
mod tutor_error;

pub use category::ErrorCategory;
pub use config::ConfigError;
pub use context::ErrorContext;
pub use network::NetworkError;
pub use playback::PlaybackError;
pub use result::{ResultExt, TutorResult};
pub use session::SessionError;
pub use stream::StreamError;
pub use tutor_error::TutorError;

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Every domain error converts into `TutorError` and keeps its metadata.
    #[test]
    fn test_error_unification() {
        let errors: Vec<TutorError> = vec![
            NetworkError::ConnectionFailed {
                url: "http://localhost:5000/".to_string(),
                message: "refused".to_string(),
            }
            .into(),
            StreamError::ConnectionLost {
                message: "reset".to_string(),
                records_received: 4,
            }
            .into(),
            SessionError::EmptyTopic.into(),
            PlaybackError::Decode {
                message: "bad header".to_string(),
            }
            .into(),
            ConfigError::MissingValue {
                flag: "--url".to_string(),
            }
            .into(),
        ];

        for err in &errors {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
            assert!(!err.recovery_hint().is_empty());
        }

        assert_eq!(errors[0].category(), ErrorCategory::Network);
        assert_eq!(errors[1].category(), ErrorCategory::Network);
        assert_eq!(errors[2].category(), ErrorCategory::User);
        assert_eq!(errors[3].category(), ErrorCategory::Playback);
        assert_eq!(errors[4].category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_result_ext_on_tutor_result() {
        fn might_fail() -> TutorResult<()> {
            Err(NetworkError::Cancelled.into())
        }

        let err = might_fail()
            .with_context(|| ErrorContext::new("stream"))
            .unwrap_err();
        assert_eq!(err.context().map(|c| c.operation.as_str()), Some("stream"));
        assert!(matches!(err.inner(), TutorError::Network(NetworkError::Cancelled)));
    }
}
