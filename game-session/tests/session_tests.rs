mod common;

use common::*;

use game_core::{Game, GameEvent, GuessOutcome};
use game_persistence::{ChangeFeed, connection::connect_to_memory_database,
    repositories::UserRepository};
use game_session::ShareLink;
use game_types::{GameStatus, Tier, User};

#[tokio::test]
async fn test_won_game_syncs_profile_and_rankings() {
    let db = shared_test_db().await;
    let feed = ChangeFeed::default();
    let session = session_for(&db, &feed, "uid-alice", "crane");
    session.ensure_profile("Alice").await.unwrap();

    let mut game = session.new_game().unwrap();
    let outcome = session.submit_guess(&mut game, "crane").await;
    assert!(matches!(outcome, GuessOutcome::Completed { .. }));

    let profile = session.profile().await.unwrap().unwrap();
    assert_eq!(profile.games_played, 1);
    assert_eq!(profile.wins, 1);
    assert_eq!(profile.win_rate, 100.0);
    assert_eq!(profile.tier, Tier::Bronze);
    // instant solve: 100-point game damped to a +10 Bronze delta
    assert_eq!(profile.score, 10);
    assert!(profile.last_game_at.is_some());

    let board = session.leaderboard().await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].user_id, "uid-alice");
    assert_eq!(board[0].rank, 1);
}

#[tokio::test]
async fn test_lost_game_counts_without_a_win() {
    let db = shared_test_db().await;
    let feed = ChangeFeed::default();
    let session = session_for(&db, &feed, "uid-alice", TEST_WORDS);
    session.ensure_profile("Alice").await.unwrap();

    let mut game = Game::new("crane".to_string());
    for guess in ["react", "slate", "stone", "mouse", "house", "notes"] {
        session.submit_guess(&mut game, guess).await;
    }

    assert_eq!(game.status(), GameStatus::Lost);
    let profile = session.profile().await.unwrap().unwrap();
    assert_eq!(profile.games_played, 1);
    assert_eq!(profile.wins, 0);
    assert_eq!(profile.win_rate, 0.0);
    // a bad game may score negative, but the cumulative total never does
    assert!(profile.score >= 0);
}

#[tokio::test]
async fn test_promotion_event_on_tier_threshold() {
    let db = shared_test_db().await;
    let feed = ChangeFeed::default();

    // seed a profile sitting just under the Silver threshold
    UserRepository::new(db.clone())
        .create_user(User {
            uid: "uid-alice".to_string(),
            username: "Alice".to_string(),
            score: 495,
            games_played: 40,
            wins: 20,
            win_rate: 50.0,
            tier: Tier::Bronze,
            icon_id: 1,
            icon_color: "blue".to_string(),
            background_id: 1,
            last_game_at: None,
        })
        .await
        .unwrap();

    let session = session_for(&db, &feed, "uid-alice", "crane");
    let collector = EventCollector::new();
    session.add_event_handler(Box::new(collector.clone()));

    let mut game = session.new_game().unwrap();
    session.submit_guess(&mut game, "crane").await;

    let profile = session.profile().await.unwrap().unwrap();
    assert_eq!(profile.score, 505);
    assert_eq!(profile.tier, Tier::Silver);
    assert!(collector.has_event(|event| matches!(
        event,
        GameEvent::TierChanged {
            from: Tier::Bronze,
            to: Tier::Silver,
            promoted: true,
            ..
        }
    )));
}

#[tokio::test]
async fn test_sync_failure_leaves_game_intact() {
    // store without a schema: every write fails
    let db = connect_to_memory_database().await.unwrap();
    let feed = ChangeFeed::default();
    let session = session_for(&db, &feed, "uid-alice", "crane");

    let collector = EventCollector::new();
    session.add_event_handler(Box::new(collector.clone()));

    let mut game = Game::new("crane".to_string());
    let outcome = session.submit_guess(&mut game, "crane").await;

    // the solved puzzle survives in memory even though nothing persisted
    assert!(matches!(outcome, GuessOutcome::Completed { .. }));
    assert_eq!(game.status(), GameStatus::Won);
    assert!(collector.has_event(|event| matches!(event, GameEvent::SyncFailed { .. })));
    assert!(collector.has_event(|event| matches!(event, GameEvent::GameCompleted { .. })));
}

#[tokio::test]
async fn test_store_feed_announces_saved_games() {
    let db = shared_test_db().await;
    let feed = ChangeFeed::default();
    let session = session_for(&db, &feed, "uid-alice", "crane");
    session.ensure_profile("Alice").await.unwrap();

    let mut rx = session.subscribe_store();
    let mut game = session.new_game().unwrap();
    session.submit_guess(&mut game, "crane").await;

    let mut saw_game_saved = false;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, game_persistence::StoreEvent::GameSaved(_)) {
            saw_game_saved = true;
        }
    }
    assert!(saw_game_saved);
}

#[tokio::test]
async fn test_shared_deep_link_hydrates_fresh_game() {
    let db = shared_test_db().await;
    let feed = ChangeFeed::default();

    let alice = session_for(&db, &feed, "uid-alice", "crane");
    alice.ensure_profile("Alice").await.unwrap();
    let mut alice_game = alice.new_game().unwrap();
    let outcome = alice.submit_guess(&mut alice_game, "crane").await;
    let GuessOutcome::Completed { record, .. } = outcome else {
        panic!("expected completion");
    };

    let bob = session_for(&db, &feed, "uid-bob", "crane");
    let link = ShareLink::for_game(record.id);
    let bob_game = bob.open_shared(&link).await.unwrap();

    assert_eq!(bob_game.secret(), "crane");
    assert_eq!(bob_game.status(), GameStatus::Playing);
    assert!(bob_game.history().is_empty());
    assert_eq!(bob_game.to_record().shared_by.as_deref(), Some("uid-alice"));
    assert_ne!(bob_game.id(), record.id);
}

#[tokio::test]
async fn test_open_missing_shared_game() {
    let db = shared_test_db().await;
    let feed = ChangeFeed::default();
    let session = session_for(&db, &feed, "uid-alice", "crane");

    let link = ShareLink::for_game(uuid::Uuid::new_v4());
    assert!(session.open_shared(&link).await.is_err());
}

#[tokio::test]
async fn test_series_round_between_two_players() {
    let db = shared_test_db().await;
    let feed = ChangeFeed::default();

    let alice = session_for(&db, &feed, "uid-alice", TEST_WORDS);
    let bob = session_for(&db, &feed, "uid-bob", TEST_WORDS);
    alice.ensure_profile("Alice").await.unwrap();
    bob.ensure_profile("Bob").await.unwrap();

    let series = alice
        .start_series("Alice", ("uid-bob", "Bob"), "crane")
        .await
        .unwrap();

    // Alice solves the shared word first, in one turn
    let mut alice_game = alice.open_series_game(&series);
    assert!(matches!(
        alice.submit_guess(&mut alice_game, "crane").await,
        GuessOutcome::Completed { .. }
    ));

    // half-reported round: no tally yet, word unchanged
    let listing = alice.my_series().await.unwrap();
    let mid = &listing[0];
    assert_eq!(mid.round_results.len(), 1);
    assert_eq!((mid.player1_score, mid.player2_score), (0, 0));
    assert_eq!(mid.current_word, "crane");

    // Bob needs two turns
    let mut bob_game = bob.open_series_game(&series);
    bob.submit_guess(&mut bob_game, "react").await;
    assert!(matches!(
        bob.submit_guess(&mut bob_game, "crane").await,
        GuessOutcome::Completed { .. }
    ));

    let listing = bob.my_series().await.unwrap();
    let after = &listing[0];
    assert_eq!(after.player1_score, 1, "faster solver takes the round");
    assert_eq!(after.player2_score, 0);
    assert_eq!(after.games.len(), 1);
    assert!(after.round_results.is_empty());
    assert_ne!(after.current_word, "crane", "next shared word drawn");
    assert!(after.recent_words.contains(&"crane".to_string()));
}

#[tokio::test]
async fn test_concurrent_series_completions_both_counted() {
    let db = shared_test_db().await;
    let feed = ChangeFeed::default();

    let alice = session_for(&db, &feed, "uid-alice", TEST_WORDS);
    let bob = session_for(&db, &feed, "uid-bob", TEST_WORDS);
    alice.ensure_profile("Alice").await.unwrap();
    bob.ensure_profile("Bob").await.unwrap();

    let series = alice
        .start_series("Alice", ("uid-bob", "Bob"), "crane")
        .await
        .unwrap();
    let mut alice_game = alice.open_series_game(&series);
    let mut bob_game = bob.open_series_game(&series);

    // both players finish the shared word at the same moment
    let (a, b) = tokio::join!(
        alice.submit_guess(&mut alice_game, "crane"),
        bob.submit_guess(&mut bob_game, "crane"),
    );
    assert!(matches!(a, GuessOutcome::Completed { .. }));
    assert!(matches!(b, GuessOutcome::Completed { .. }));

    // neither report may be lost: the round closed exactly once
    let listing = alice.my_series().await.unwrap();
    let after = &listing[0];
    assert!(after.round_results.is_empty());
    assert_eq!(after.games.len(), 1);
    // identical one-turn solves tie, so no tally moves
    assert_eq!((after.player1_score, after.player2_score), (0, 0));
    assert_ne!(after.current_word, "crane");
}
