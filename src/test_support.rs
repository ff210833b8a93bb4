//! Fixtures shared by unit tests

use crate::{
    adapters::InMemoryRepository,
    app::{AgentConfig, SessionConfig},
    q_learning::{Agent, MatchResult},
    session::{MatchController, Seat, SessionSnapshot},
    tictactoe::Mark,
};

/// A mid-match snapshot: three plies in, second seat to move, one finished
/// match recorded as a loss for the first seat.
pub(crate) fn sample_snapshot() -> SessionSnapshot {
    let agent = |name: &str, mark| {
        Agent::from_config(
            &AgentConfig::autonomous(name, mark)
                .with_epsilon(0.0)
                .with_seed(11),
        )
        .unwrap()
    };
    let mut session = MatchController::new(
        SessionConfig::default().with_checkpoint_interval(0),
        agent("Bot Meshok", Mark::X),
        agent("Bot AIBA", Mark::O),
        Box::new(InMemoryRepository::new()),
    )
    .unwrap();

    for _ in 0..3 {
        session.step().unwrap();
    }
    session
        .agent_mut(Seat::First)
        .record_outcome(MatchResult::Loss);
    session
        .agent_mut(Seat::Second)
        .record_outcome(MatchResult::Win);
    session.snapshot()
}
