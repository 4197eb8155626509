//! Session event-loop tests.
//!
//! Time is paused, so the mismatch delay elapses instantly once the loop is
//! idle, while still being measured on tokio's virtual clock.

use std::time::Duration;

use concentration::cards::Deck;
use concentration::core::{CardId, PairId};
use concentration::engine::{MatchEngine, MatchEvent};
use concentration::session::GameSession;
use tokio::time::Instant;

/// [A1, B1, A2, B2]
fn two_pairs() -> MatchEngine<&'static str> {
    MatchEngine::new(Deck::from_layout([
        (PairId::new(0), "A"),
        (PairId::new(1), "B"),
        (PairId::new(0), "A"),
        (PairId::new(1), "B"),
    ])
    .unwrap())
}

/// Test a match is applied without waiting.
#[tokio::test(start_paused = true)]
async fn test_match_through_session() {
    let session = GameSession::spawn(two_pairs());
    let mut updates = session.updates().unwrap();

    session.reveal(0).unwrap();
    session.reveal(2).unwrap();

    let events: Vec<MatchEvent> = vec![
        updates.recv().await.unwrap().event,
        updates.recv().await.unwrap().event,
        updates.recv().await.unwrap().event,
    ];
    assert!(matches!(events[0], MatchEvent::Flipped { .. }));
    assert!(matches!(events[1], MatchEvent::Flipped { .. }));
    assert!(matches!(events[2], MatchEvent::Matched { .. }));

    assert_eq!(session.snapshot().matched_pairs, 1);

    let engine = session.shutdown().await.unwrap();
    assert_eq!(engine.matched_pairs(), 1);
}

/// Test the mismatch window: reveals are ignored until the reset fires.
#[tokio::test(start_paused = true)]
async fn test_mismatch_window() {
    let session = GameSession::spawn(two_pairs());
    let mut updates = session.updates().unwrap();
    let started = Instant::now();

    session.reveal(0).unwrap();
    session.reveal(1).unwrap();
    // Arrives during the window; must not flip a third card.
    session.reveal(2).unwrap();

    updates.recv().await.unwrap();
    updates.recv().await.unwrap();
    let mismatch = updates.recv().await.unwrap();
    assert!(matches!(mismatch.event, MatchEvent::Mismatched { .. }));
    assert!(mismatch.snapshot.evaluating);

    let hidden = updates.recv().await.unwrap();
    assert_eq!(
        hidden.event,
        MatchEvent::Hidden { first: CardId::new(0), second: CardId::new(1) }
    );
    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert!(hidden.snapshot.cards.iter().all(|c| !c.is_flipped));
    assert!(!hidden.snapshot.evaluating);

    let engine = session.shutdown().await.unwrap();
    assert_eq!(engine.flips(), 2);
    assert!(!engine.deck().get(2).unwrap().is_flipped);
}

/// Test the watch channel tracks the latest snapshot.
#[tokio::test(start_paused = true)]
async fn test_snapshot_subscription() {
    let session = GameSession::spawn(two_pairs());
    let mut snapshots = session.subscribe();
    assert_eq!(snapshots.borrow().flips, 0);

    session.reveal(3).unwrap();
    snapshots.changed().await.unwrap();
    assert_eq!(snapshots.borrow().pending, Some(CardId::new(3)));

    session.shutdown().await.unwrap();
}

/// Test a new game cancels a pending reset.
#[tokio::test(start_paused = true)]
async fn test_new_game_cancels_reset() {
    let session = GameSession::spawn(two_pairs());
    let mut updates = session.updates().unwrap();

    session.reveal(0).unwrap();
    session.reveal(1).unwrap();
    for _ in 0..3 {
        updates.recv().await.unwrap();
    }

    let fresh = Deck::from_layout([(PairId::new(0), "Z"), (PairId::new(0), "Z")]).unwrap();
    session.new_game(fresh).unwrap();

    let update = updates.recv().await.unwrap();
    assert_eq!(update.event, MatchEvent::NewGame { pairs: 1 });

    // Long past the old deadline: nothing else is published.
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert!(updates.try_recv().is_err());

    session.reveal(0).unwrap();
    session.reveal(1).unwrap();
    let engine = session.shutdown().await.unwrap();
    assert!(engine.is_complete());
}

/// Test shutdown stops the loop and closes the snapshot channel.
#[tokio::test]
async fn test_shutdown_closes_snapshots() {
    let session = GameSession::spawn(two_pairs());
    let snapshots = session.subscribe();
    session.shutdown().await.unwrap();

    // The loop dropped its sender, so the watch is closed.
    assert!(snapshots.has_changed().is_err());
}

/// Test a session handed an engine mid-mismatch still fires the reset.
#[tokio::test(start_paused = true)]
async fn test_spawn_during_mismatch_fires_reset() {
    let mut engine = two_pairs();
    engine.reveal(0);
    engine.reveal(1);
    assert!(engine.phase().awaiting_reset().is_some());

    let session = GameSession::spawn(engine);
    let mut updates = session.updates().unwrap();
    let started = Instant::now();

    let hidden = updates.recv().await.unwrap();
    assert_eq!(
        hidden.event,
        MatchEvent::Hidden { first: CardId::new(0), second: CardId::new(1) }
    );
    assert!(started.elapsed() >= Duration::from_millis(1000));

    session.reveal(0).unwrap();
    session.reveal(2).unwrap();
    let engine = session.shutdown().await.unwrap();
    assert_eq!(engine.matched_pairs(), 1);
}

/// Test an engine shut down mid-mismatch resumes in a new session.
#[tokio::test(start_paused = true)]
async fn test_respawn_after_shutdown_mid_mismatch() {
    let session = GameSession::spawn(two_pairs());
    session.reveal(0).unwrap();
    session.reveal(1).unwrap();
    let engine = session.shutdown().await.unwrap();
    assert!(engine.phase().is_evaluating());

    let session = GameSession::spawn(engine);
    let mut snapshots = session.subscribe();
    snapshots.wait_for(|s| !s.evaluating).await.unwrap();

    session.reveal(1).unwrap();
    session.reveal(3).unwrap();
    let engine = session.shutdown().await.unwrap();
    assert_eq!(engine.matched_pairs(), 1);
    assert!(!engine.deck().get(0).unwrap().is_flipped);
}

/// Test an update stream only sees updates made after it was requested.
#[tokio::test(start_paused = true)]
async fn test_update_stream_starts_on_request() {
    let session = GameSession::spawn(two_pairs());
    let mut snapshots = session.subscribe();

    session.reveal(0).unwrap();
    snapshots.changed().await.unwrap();

    let mut updates = session.updates().unwrap();
    session.reveal(2).unwrap();

    let first = updates.recv().await.unwrap();
    assert_eq!(first.event, MatchEvent::Flipped { card: CardId::new(2) });
    let second = updates.recv().await.unwrap();
    assert!(matches!(second.event, MatchEvent::Matched { .. }));

    session.shutdown().await.unwrap();
}

/// Test a newer stream replaces the old one, which then ends.
#[tokio::test(start_paused = true)]
async fn test_new_stream_replaces_old() {
    let session = GameSession::spawn(two_pairs());
    let mut old = session.updates().unwrap();
    let mut new = session.updates().unwrap();

    session.reveal(0).unwrap();
    assert!(matches!(new.recv().await.unwrap().event, MatchEvent::Flipped { .. }));
    assert!(old.recv().await.is_none());

    // Dropping the stream leaves the loop running.
    drop(new);
    session.reveal(2).unwrap();
    let engine = session.shutdown().await.unwrap();
    assert_eq!(engine.matched_pairs(), 1);
}
