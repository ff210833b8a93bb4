//! Shared setup for the integration tests.

#![allow(dead_code)]

use tdtactoe::{
    Agent,
    app::AgentConfig,
    tictactoe::{Mark, Position},
    types::StateKey,
};

/// Autonomous agent that never explores
pub fn greedy(name: &str, mark: Mark, seed: u64) -> Agent {
    Agent::from_config(
        &AgentConfig::autonomous(name, mark)
            .with_epsilon(0.0)
            .with_seed(seed),
    )
    .expect("valid agent config")
}

/// Autonomous agent that always explores
pub fn explorer(name: &str, mark: Mark, seed: u64) -> Agent {
    Agent::from_config(
        &AgentConfig::autonomous(name, mark)
            .with_epsilon(1.0)
            .with_seed(seed),
    )
    .expect("valid agent config")
}

/// Make two greedy agents follow `moves` exactly, X moving first.
///
/// Each move's candidate key (the mover's initial key followed by every move
/// up to and including this one) is given value 1.0 in the mover's table, so
/// it beats every untouched candidate.
pub fn seed_line(x: &mut Agent, o: &mut Agent, moves: &[(usize, usize)]) {
    let mut played: Vec<(Position, Mark)> = Vec::new();
    for (ply, &(row, col)) in moves.iter().enumerate() {
        let mark = if ply % 2 == 0 { Mark::X } else { Mark::O };
        played.push((Position::new(row, col), mark));

        let key = played
            .iter()
            .fold(StateKey::initial(mark), |key, &(pos, m)| key.extended(pos, m));
        let agent = if mark == Mark::X { &mut *x } else { &mut *o };
        agent.value_table_mut().set(key, 1.0);
    }
}
