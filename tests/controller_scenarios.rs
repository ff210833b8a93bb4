//! End-to-end sessions driven through the match controller

mod common;

use common::{explorer, greedy, seed_line};
use tdtactoe::{
    Error,
    adapters::{InMemoryRepository, JsonRepository, ScriptedInput},
    app::{AgentConfig, SessionConfig},
    ports::SessionRepository,
    q_learning::Agent,
    session::{Checkpoint, MatchController, MatchPhase, RestoreSelection, Seat},
    tictactoe::{Cell, GameOutcome, GameStatus, Mark, Position},
    types::StateKey,
};
use tempfile::TempDir;

const DRAW_LINE: [(usize, usize); 9] = [
    (0, 0),
    (1, 1),
    (0, 1),
    (0, 2),
    (2, 0),
    (1, 0),
    (1, 2),
    (2, 1),
    (2, 2),
];

#[test]
fn test_full_draw_restarts_match() {
    let mut x = greedy("Bot Meshok", Mark::X, 1);
    let mut o = greedy("Bot AIBA", Mark::O, 2);
    seed_line(&mut x, &mut o, &DRAW_LINE);

    let config = SessionConfig::new().with_checkpoint_interval(0);
    let mut controller =
        MatchController::new(config, x, o, Box::new(InMemoryRepository::new())).unwrap();

    for (ply, &(row, col)) in DRAW_LINE.iter().take(8).enumerate() {
        let report = controller.step().unwrap();
        assert_eq!(report.position, Position::new(row, col), "ply {ply}");
        assert_eq!(report.status, GameStatus::InProgress);
        assert_eq!(report.reward, -1.0);
    }

    let last = controller.step().unwrap();
    assert_eq!(last.seat, Seat::First);
    assert_eq!(last.status, GameStatus::Draw);
    assert_eq!(last.reward, 10.0);
    assert_eq!(last.phase, MatchPhase::Terminal(GameOutcome::Draw));

    assert_eq!(controller.iteration(), 9);
    assert_eq!(controller.matches(), 1);
    assert_eq!(controller.turn(), Seat::Second);
    assert_eq!(controller.board().occupied_count(), 0);
    for (seat, mark) in [(Seat::First, Mark::X), (Seat::Second, Mark::O)] {
        let agent = controller.agent(seat);
        assert_eq!(agent.stats().draws, 1);
        assert_eq!(agent.stats().total(), 1);
        assert_eq!(agent.state(), &StateKey::initial(mark));
        assert_eq!(agent.prev_state(), &StateKey::initial(mark));
    }
}

#[test]
fn test_win_is_credited_to_mover_only() {
    // X completes the top row on ply 5
    let line = [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)];
    let mut x = greedy("x", Mark::X, 1);
    let mut o = greedy("o", Mark::O, 2);
    seed_line(&mut x, &mut o, &line);

    let config = SessionConfig::new().with_checkpoint_interval(0);
    let mut controller =
        MatchController::new(config, x, o, Box::new(InMemoryRepository::new())).unwrap();

    let o_table_before = controller.agent(Seat::Second).value_table().clone();
    let report = (0..5).map(|_| controller.step().unwrap()).last().unwrap();

    assert_eq!(report.status, GameStatus::Win(Mark::X));
    assert_eq!(report.reward, 100.0);
    assert!(report.updated_value.is_some());

    let x_stats = controller.agent(Seat::First).stats();
    let o_stats = controller.agent(Seat::Second).stats();
    assert_eq!((x_stats.wins, x_stats.losses), (1, 0));
    assert_eq!((o_stats.wins, o_stats.losses), (0, 1));

    // O learned only from its own two plies, never from the loss
    let o_table = controller.agent(Seat::Second).value_table();
    let changed = o_table
        .iter()
        .filter(|(key, value)| o_table_before.get(key) != Some(*value))
        .count();
    assert!(changed > 0);
    assert!(o_table.iter().all(|(_, value)| value > -100.0));
}

#[test]
fn test_checkpoint_every_five_plies() {
    let repository = InMemoryRepository::new();
    let config = SessionConfig::new()
        .with_iteration_budget(12)
        .with_checkpoint_interval(5)
        .with_checkpoint_path("mem/session.json");
    let mut controller = MatchController::new(
        config,
        explorer("x", Mark::X, 3),
        explorer("o", Mark::O, 4),
        Box::new(repository.clone()),
    )
    .unwrap();

    let reports: Vec<_> = (0..5).map(|_| controller.step().unwrap()).collect();
    assert!(
        reports[..4]
            .iter()
            .all(|r| r.checkpoint == Checkpoint::Skipped)
    );
    assert_eq!(reports[4].checkpoint, Checkpoint::Saved);
    assert_eq!(repository.save_count(), 1);

    let saved = repository
        .load(std::path::Path::new("mem/session.json"))
        .unwrap();
    assert_eq!(saved.iteration, 5);
    assert_eq!(saved.turn, controller.turn());

    let summary = controller.run().unwrap();
    assert_eq!(summary.iterations, 12);
    assert!(!summary.cancelled);
    assert_eq!(repository.save_count(), 2);
}

#[test]
fn test_human_reprompts_then_bot_replies() {
    let human = Agent::from_config(&AgentConfig::human("Player", Mark::X)).unwrap();
    let bot = greedy("Bot AIBA", Mark::O, 9);
    let input = ScriptedInput::new(["9 9", "one one", "1 1", "1 1", "2 2"]);

    let config = SessionConfig::new().with_checkpoint_interval(0);
    let mut controller =
        MatchController::new(config, human, bot, Box::new(InMemoryRepository::new()))
            .unwrap()
            .with_input(Box::new(input));

    let first = controller.step().unwrap();
    assert_eq!(first.position, Position::new(1, 1));
    assert_eq!(first.updated_value, None);

    let reply = controller.step().unwrap();
    assert_eq!(reply.seat, Seat::Second);
    assert_eq!(reply.position, Position::new(0, 0));

    // "1 1" is taken, so the next line is used
    let third = controller.step().unwrap();
    assert_eq!(third.position, Position::new(2, 2));

    let board = controller.board();
    assert_eq!(board.get(Position::new(1, 1)).unwrap(), Cell::X);
    assert_eq!(board.get(Position::new(0, 0)).unwrap(), Cell::O);
    assert_eq!(board.get(Position::new(2, 2)).unwrap(), Cell::X);
    assert!(controller.agent(Seat::First).value_table().is_empty());
}

#[test]
fn test_closed_input_leaves_session_untouched() {
    let human = Agent::from_config(&AgentConfig::human("Player", Mark::X)).unwrap();
    let bot = greedy("Bot AIBA", Mark::O, 9);
    let mut controller = MatchController::new(
        SessionConfig::new(),
        human,
        bot,
        Box::new(InMemoryRepository::new()),
    )
    .unwrap()
    .with_input(Box::new(ScriptedInput::new(["4 4"])));

    let err = controller.run().unwrap_err();
    assert!(matches!(err, Error::InputClosed));
    assert_eq!(controller.iteration(), 0);
    assert_eq!(controller.board().occupied_count(), 0);
    assert_eq!(controller.turn(), Seat::First);
}

#[test]
fn test_missing_checkpoint_keeps_fresh_session() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = SessionConfig::new().with_checkpoint_path(temp_dir.path().join("none.json"));
    let mut controller = MatchController::new(
        config,
        greedy("x", Mark::X, 1),
        greedy("o", Mark::O, 2),
        Box::new(JsonRepository::new()),
    )
    .unwrap();

    let err = controller.try_restore(RestoreSelection::Both).unwrap_err();
    assert!(matches!(err, Error::PersistenceUnavailable { .. }));
    assert_eq!(controller.iteration(), 0);
    assert!(controller.agent(Seat::First).value_table().is_empty());
    assert_eq!(controller.agent(Seat::First).state(), &StateKey::initial(Mark::X));

    // still playable
    controller.step().unwrap();
    assert_eq!(controller.iteration(), 1);
}

fn trained_session(path: &std::path::Path) -> MatchController {
    let config = SessionConfig::new()
        .with_iteration_budget(31)
        .with_checkpoint_interval(0)
        .with_checkpoint_path(path);
    let mut controller = MatchController::new(
        config,
        explorer("Bot Meshok", Mark::X, 11),
        explorer("Bot AIBA", Mark::O, 12),
        Box::new(JsonRepository::new()),
    )
    .unwrap();
    controller.run().unwrap();
    controller.checkpoint().unwrap();
    controller
}

#[test]
fn test_restore_both_resumes_exactly() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("session.json");
    let trained = trained_session(&path);

    let config = SessionConfig::new()
        .with_iteration_budget(100)
        .with_checkpoint_path(&path);
    let mut resumed = MatchController::new(
        config,
        explorer("Bot Meshok", Mark::X, 11),
        explorer("Bot AIBA", Mark::O, 12),
        Box::new(JsonRepository::new()),
    )
    .unwrap();
    resumed.try_restore(RestoreSelection::Both).unwrap();

    assert_eq!(resumed.iteration(), 31);
    assert_eq!(resumed.matches(), trained.matches());
    assert_eq!(resumed.turn(), trained.turn());
    assert_eq!(resumed.board(), trained.board());
    assert_eq!(resumed.config().iteration_budget, 100);
    for seat in Seat::BOTH {
        let (a, b) = (resumed.agent(seat), trained.agent(seat));
        assert_eq!(a.value_table(), b.value_table());
        assert_eq!(a.stats(), b.stats());
        assert_eq!(a.state(), b.state());
        assert_eq!(a.prev_state(), b.prev_state());
    }
}

#[test]
fn test_restore_first_only() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("session.json");
    let trained = trained_session(&path);

    let config = SessionConfig::new().with_checkpoint_path(&path);
    let mut resumed = MatchController::new(
        config,
        explorer("Bot Meshok", Mark::X, 11),
        explorer("Bot AIBA", Mark::O, 12),
        Box::new(JsonRepository::new()),
    )
    .unwrap();
    resumed.try_restore(RestoreSelection::First).unwrap();

    assert_eq!(
        resumed.agent(Seat::First).value_table(),
        trained.agent(Seat::First).value_table()
    );
    assert!(resumed.agent(Seat::Second).value_table().is_empty());
    assert_eq!(resumed.agent(Seat::Second).stats().total(), 0);
    // the board and running keys always come back
    assert_eq!(resumed.board(), trained.board());
    assert_eq!(
        resumed.agent(Seat::Second).state(),
        trained.agent(Seat::Second).state()
    );
}

#[test]
fn test_restore_rejects_swapped_marks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("session.json");
    trained_session(&path);

    let mut swapped = MatchController::new(
        SessionConfig::new().with_checkpoint_path(&path),
        greedy("o first", Mark::O, 1),
        greedy("x second", Mark::X, 2),
        Box::new(JsonRepository::new()),
    )
    .unwrap();
    let err = swapped.try_restore(RestoreSelection::Both).unwrap_err();
    assert!(matches!(err, Error::SerializationSchemaMismatch { .. }));
    assert_eq!(swapped.iteration(), 0);
}

#[test]
fn test_failed_checkpoint_keeps_session_running() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = SessionConfig::new()
        .with_iteration_budget(6)
        .with_checkpoint_interval(1)
        .with_checkpoint_path(temp_dir.path().join("missing").join("session.json"));
    let mut controller = MatchController::new(
        config,
        explorer("x", Mark::X, 5),
        explorer("o", Mark::O, 6),
        Box::new(JsonRepository::new()),
    )
    .unwrap();

    let report = controller.step().unwrap();
    assert!(matches!(report.checkpoint, Checkpoint::Failed(_)));
    assert_eq!(controller.iteration(), 1);

    let summary = controller.run().unwrap();
    assert_eq!(summary.iterations, 6);
    assert!(!summary.cancelled);
    assert!(!temp_dir.path().join("missing").exists());
}

#[test]
fn test_human_plays_after_resuming_finished_training() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("session.json");
    let trained = trained_session(&path);
    assert!(trained.is_finished());

    let human = Agent::from_config(&AgentConfig::human("Player", Mark::X)).unwrap();
    let config = SessionConfig::new()
        .with_iteration_budget(31)
        .with_checkpoint_interval(0)
        .with_checkpoint_path(&path);
    let mut controller = MatchController::new(
        config,
        human,
        greedy("Bot AIBA", Mark::O, 12),
        Box::new(JsonRepository::new()),
    )
    .unwrap()
    .with_input(Box::new(ScriptedInput::new([
        "0 0", "0 1", "0 2", "1 0", "1 1", "1 2", "2 0", "2 1", "2 2",
    ])));
    controller.try_restore(RestoreSelection::Second).unwrap();
    assert_eq!(
        controller.agent(Seat::Second).value_table(),
        trained.agent(Seat::Second).value_table()
    );
    // the saved counter already meets the budget
    assert!(controller.is_finished());

    controller.extend_budget(2);
    assert!(!controller.is_finished());
    // 31 plies were played, so the bot moves first, then the human
    assert_eq!(controller.turn(), Seat::Second);

    let bot = controller.step().unwrap();
    let human = controller.step().unwrap();
    assert_eq!(bot.seat, Seat::Second);
    assert_eq!(human.seat, Seat::First);
    assert_eq!(human.updated_value, None);
    assert_eq!(controller.iteration(), 33);
    assert!(controller.is_finished());
}
