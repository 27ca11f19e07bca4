//! Integration tests for sequential audio playback.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tutor::config::TutorConfig;
use tutor::playback::{PlaybackItem, PlaybackQueue};

use common::*;

#[tokio::test]
async fn test_slow_first_item_finishes_before_fast_second_starts() {
    let player = MockPlayer::new(Duration::from_millis(5));
    player.set_duration("a.mp3", Duration::from_millis(80));

    let queue = PlaybackQueue::spawn(Arc::new(player.clone()), CancellationToken::new());
    assert!(queue.enqueue(PlaybackItem::new("a.mp3", "Unit 1 - part 1")));
    assert!(queue.enqueue(PlaybackItem::new("b.mp3", "Unit 1 - part 2")));
    let summary = queue.close().await.unwrap();

    assert_eq!(summary.played, 2);
    let plays = player.plays();
    assert_eq!(plays[0].url, "a.mp3");
    assert_eq!(plays[1].url, "b.mp3");
    assert!(plays[0].finished <= plays[1].started);
}

#[tokio::test]
async fn test_session_audio_plays_in_record_order() {
    let http = MockHttpConfig::new()
        .with_stream(
            STREAM_URL,
            &[
                audio_record("p1.mp3", "Unit 1", 1),
                text_record("Intro. "),
                audio_record("p2.mp3", "Unit 1", 2),
                audio_record("p3.mp3", "Unit 2", 1),
            ],
        )
        .build();
    let player = MockPlayer::new(Duration::from_millis(10));
    player.set_duration("p1.mp3", Duration::from_millis(60));

    let (mut app, mut updates) = test_app(&TutorConfig::default(), &http, &player);
    app.submit("waves").unwrap();
    let outputs = run_turn(&mut app, &mut updates).await;
    app.wait_idle().await;

    let queued: Vec<_> = outputs
        .iter()
        .filter_map(|o| match o {
            tutor::app::AppOutput::AudioQueued(label) => Some(label.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        queued,
        vec!["Unit 1 - part 1", "Unit 1 - part 2", "Unit 2 - part 1"]
    );

    assert_eq!(player.started_urls(), vec!["p1.mp3", "p2.mp3", "p3.mp3"]);
    let plays = player.plays();
    for pair in plays.windows(2) {
        assert!(pair[0].finished <= pair[1].started);
    }
}

#[tokio::test]
async fn test_failed_item_does_not_stop_the_rest() {
    let player = MockPlayer::default();
    player.set_failure(
        "broken.mp3",
        tutor::error::PlaybackError::Fetch {
            url: "broken.mp3".to_string(),
            message: "404".to_string(),
        },
    );

    let queue = PlaybackQueue::spawn(Arc::new(player.clone()), CancellationToken::new());
    queue.enqueue(PlaybackItem::new("broken.mp3", "Unit 1 - part 1"));
    queue.enqueue(PlaybackItem::new("ok.mp3", "Unit 1 - part 2"));
    let summary = queue.close().await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.played, 1);
    assert_eq!(player.started_urls(), vec!["broken.mp3", "ok.mp3"]);
}

#[tokio::test]
async fn test_audio_disabled_queues_nothing() {
    let http = MockHttpConfig::new()
        .with_stream(STREAM_URL, &[audio_record("p1.mp3", "Unit 1", 1)])
        .build();
    let player = MockPlayer::default();

    let config = TutorConfig::default().with_audio_enabled(false);
    let (mut app, mut updates) = test_app(&config, &http, &player);
    app.submit("quiet").unwrap();
    run_turn(&mut app, &mut updates).await;
    app.wait_idle().await;

    assert!(player.started_urls().is_empty());
}
