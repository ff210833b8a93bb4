//! Session snapshots through the JSON and MessagePack repositories

mod common;

use common::explorer;
use tdtactoe::{
    SessionSnapshot,
    adapters::{InMemoryRepository, JsonRepository, MsgPackRepository},
    app::SessionConfig,
    ports::SessionRepository,
    session::{MatchController, RestoreSelection, Seat},
    tictactoe::Mark,
};
use tempfile::TempDir;

fn played_session(plies: usize) -> MatchController {
    let config = SessionConfig::new()
        .with_iteration_budget(plies)
        .with_checkpoint_interval(0);
    let mut controller = MatchController::new(
        config,
        explorer("Bot Meshok", Mark::X, 21),
        explorer("Bot AIBA", Mark::O, 22),
        Box::new(InMemoryRepository::new()),
    )
    .unwrap();
    controller.run().unwrap();
    controller
}

#[test]
fn test_json_roundtrip_preserves_mixed_keys() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("session.json");
    let snapshot = played_session(43).snapshot();
    assert!(
        snapshot
            .agent_1
            .value_table
            .iter()
            .any(|(key, _)| key.len() > 2)
    );

    let repo = JsonRepository::pretty();
    repo.save(&snapshot, &path).expect("Failed to save session");
    let loaded = repo.load(&path).expect("Failed to load session");
    assert_eq!(loaded, snapshot);
}

#[test]
fn test_msgpack_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("session.msgpack");
    let snapshot = played_session(40).snapshot();

    let repo = MsgPackRepository::new();
    repo.save(&snapshot, &path).expect("Failed to save session");
    assert_eq!(repo.load(&path).unwrap(), snapshot);
}

#[test]
fn test_keys_are_flat_sentinel_arrays() {
    let mut controller = played_session(0);
    for _ in 0..3 {
        controller.step().unwrap();
    }
    let json = serde_json::to_value(controller.snapshot()).unwrap();

    let state = json["agent_1"]["state"].as_array().unwrap();
    assert_eq!(state.len(), 12);
    assert_eq!(state[2], -10);
    assert_eq!(state[5], -10);
    assert_eq!(state[8], -20);
    assert_eq!(state[11], -10);

    let prev = json["agent_2"]["prev_state"].as_array().unwrap();
    assert_eq!(prev.len(), 6);
    assert_eq!(prev[2], -20);
    assert_eq!(prev[5], -10);

    assert_eq!(json["turn"], "agent_2");
    assert_eq!(json["version"], SessionSnapshot::VERSION);
}

#[test]
fn test_unknown_sentinel_is_schema_error() {
    let mut json = serde_json::to_value(played_session(4).snapshot()).unwrap();
    json["agent_1"]["state"][2] = serde_json::json!(-30);

    let err = serde_json::from_value::<SessionSnapshot>(json).unwrap_err();
    assert!(err.to_string().contains("-30"));
}

#[test]
fn test_corrupt_file_keeps_running_session() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("session.json");
    std::fs::write(&path, b"{\"version\": 1, \"agent_1\": ").unwrap();

    let config = SessionConfig::new().with_checkpoint_path(&path);
    let mut controller = MatchController::new(
        config,
        explorer("x", Mark::X, 1),
        explorer("o", Mark::O, 2),
        Box::new(JsonRepository::new()),
    )
    .unwrap();
    controller.step().unwrap();

    assert!(controller.try_restore(RestoreSelection::Both).is_err());
    assert_eq!(controller.iteration(), 1);
    assert_eq!(controller.agent(Seat::Second).state().len(), 2);
}
