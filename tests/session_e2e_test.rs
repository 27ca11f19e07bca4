//! End-to-end tests: reqwest adapter against a local server, through the
//! session controller into the conversation.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tutor::adapters::ReqwestHttpClient;
use tutor::app::{App, AppOutput};
use tutor::config::TutorConfig;
use tutor::error::TutorError;
use tutor::models::TtsRequest;
use tutor::session::{AbortReason, SessionState};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;

fn app_for(config: TutorConfig, player: &MockPlayer) -> (App, tokio::sync::mpsc::UnboundedReceiver<tutor::session::SessionUpdate>) {
    App::new(
        &config,
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(player.clone()),
    )
}

#[tokio::test]
async fn test_streamed_answer_reaches_conversation() {
    let server = MockServer::start().await;
    let body = format!(
        "{}{}not json\n{}",
        text_record("Hi"),
        text_record(" there"),
        audio_record("http://cdn/p1.mp3", "Unit 1", 1)
    );
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_json(serde_json::json!({"topic": "photosynthesis"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/x-ndjson")
                .set_body_string(body),
        )
        .expect(1)
        .mount(&server)
        .await;

    let player = MockPlayer::default();
    let (mut app, mut updates) = app_for(TutorConfig::default().with_base_url(server.uri()), &player);

    app.submit("photosynthesis").unwrap();
    let outputs = run_turn(&mut app, &mut updates).await;
    app.wait_idle().await;

    assert_eq!(deltas(&outputs), "Hi therenot json");
    assert_eq!(
        outputs.last(),
        Some(&AppOutput::TurnFinished(SessionState::Completed))
    );
    let messages = app.conversation.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].content, "photosynthesis");
    assert_eq!(messages[2].content, "Hi therenot json");
    assert!(!messages[2].is_streaming);
    assert_eq!(player.started_urls(), vec!["http://cdn/p1.mp3"]);
}

#[tokio::test]
async fn test_server_error_appends_one_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("{\"type\":\"text\",\"content\":\"x\"}\n"))
        .mount(&server)
        .await;

    let player = MockPlayer::default();
    let (mut app, mut updates) = app_for(TutorConfig::default().with_base_url(server.uri()), &player);

    app.submit("anything").unwrap();
    let outputs = run_turn(&mut app, &mut updates).await;

    assert_eq!(
        deltas(&outputs),
        "I apologize, but I encountered an error (500). Please try again."
    );
    let Some(AppOutput::TurnFinished(SessionState::Failed(err))) = outputs.last() else {
        panic!("expected a failed turn");
    };
    assert!(matches!(err.inner(), TutorError::Network(_)));
    assert_eq!(
        app.conversation.messages()[2].content,
        "I apologize, but I encountered an error (500). Please try again."
    );
}

#[tokio::test]
async fn test_unreachable_server_shows_connection_message() {
    let player = MockPlayer::default();
    let (mut app, mut updates) =
        app_for(TutorConfig::default().with_base_url("http://127.0.0.1:1"), &player);

    app.submit("anything").unwrap();
    let outputs = run_turn(&mut app, &mut updates).await;

    assert_eq!(
        deltas(&outputs),
        "I'm having trouble connecting right now. Please check your connection and try again."
    );
}

#[tokio::test]
async fn test_slow_server_hits_read_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(text_record("late"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let player = MockPlayer::default();
    let config = TutorConfig::default()
        .with_base_url(server.uri())
        .with_read_timeout(Some(Duration::from_millis(100)));
    let (mut app, mut updates) = app_for(config, &player);

    app.submit("anything").unwrap();
    let outputs = run_turn(&mut app, &mut updates).await;

    assert_eq!(deltas(&outputs), "");
    assert_eq!(
        outputs.last(),
        Some(&AppOutput::TurnFinished(SessionState::Aborted(AbortReason::Deadline)))
    );
}

#[tokio::test]
async fn test_speak_posts_empty_object_and_plays() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tts"))
        .and(body_json(serde_json::json!({})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"audio_url": "http://cdn/speech.mp3"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let player = MockPlayer::default();
    let (app, _updates) = app_for(TutorConfig::default().with_base_url(server.uri()), &player);

    let url = app.speak(&TtsRequest::default()).await.unwrap();
    assert_eq!(url, "http://cdn/speech.mp3");
    assert_eq!(player.started_urls(), vec!["http://cdn/speech.mp3"]);
}
