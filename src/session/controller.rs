//! Turn-taking state machine for a two-agent session

use crate::{
    Error, Result,
    adapters::{NullPresenter, ScriptedInput},
    app::SessionConfig,
    ports::{MoveInput, Presenter, SessionRepository},
    q_learning::{Agent, MatchResult, Stats},
    session::{
        cancel::CancelToken,
        snapshot::{Seat, SessionSnapshot},
    },
    tictactoe::{Board, GameOutcome, GameStatus, Position},
};

/// Where the match stands after a ply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    AwaitingMove(Seat),
    Terminal(GameOutcome),
}

/// What happened to the checkpoint scheduled for a ply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checkpoint {
    Skipped,
    Saved,
    Failed(String),
}

/// Record of one ply
#[derive(Debug, Clone, PartialEq)]
pub struct PlyReport {
    pub seat: Seat,
    pub position: Position,
    pub status: GameStatus,
    pub reward: f64,
    /// New value of the mover's previous state, if it learned
    pub updated_value: Option<f64>,
    pub phase: MatchPhase,
    pub checkpoint: Checkpoint,
}

/// Which seats take their learned knowledge from a loaded snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSelection {
    Both,
    First,
    Second,
    Neither,
}

impl RestoreSelection {
    pub fn includes(self, seat: Seat) -> bool {
        matches!(
            (self, seat),
            (RestoreSelection::Both, _)
                | (RestoreSelection::First, Seat::First)
                | (RestoreSelection::Second, Seat::Second)
        )
    }
}

/// Totals at the end of [`MatchController::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub iterations: usize,
    pub matches: usize,
    pub stats: [Stats; 2],
    pub cancelled: bool,
}

pub struct MatchController {
    config: SessionConfig,
    board: Board,
    agents: [Agent; 2],
    turn: Seat,
    iteration: usize,
    matches: usize,
    repository: Box<dyn SessionRepository>,
    input: Box<dyn MoveInput>,
    presenter: Box<dyn Presenter>,
    cancel: CancelToken,
}

impl MatchController {
    /// Create a session with an empty board and `first` to move.
    ///
    /// Human input defaults to an empty script and presentation to a no-op;
    /// replace them with [`MatchController::with_input`] and
    /// [`MatchController::with_presenter`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the session config is invalid or both
    /// agents use the same mark.
    pub fn new(
        config: SessionConfig,
        first: Agent,
        second: Agent,
        repository: Box<dyn SessionRepository>,
    ) -> Result<Self> {
        config.validate()?;
        if first.mark() == second.mark() {
            return Err(Error::config(format!(
                "agents '{}' and '{}' both play {}",
                first.name(),
                second.name(),
                first.mark()
            )));
        }

        Ok(Self {
            board: Board::new(config.board_size),
            config,
            agents: [first, second],
            turn: Seat::First,
            iteration: 0,
            matches: 0,
            repository,
            input: Box::new(ScriptedInput::default()),
            presenter: Box::new(NullPresenter),
            cancel: CancelToken::new(),
        })
    }

    pub fn with_input(mut self, input: Box<dyn MoveInput>) -> Self {
        self.input = input;
        self
    }

    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agent(&self, seat: Seat) -> &Agent {
        &self.agents[seat.index()]
    }

    pub fn agent_mut(&mut self, seat: Seat) -> &mut Agent {
        &mut self.agents[seat.index()]
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    /// Plies played so far
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Completed matches
    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Allow `plies` more plies from the current iteration.
    ///
    /// A resumed session adopts the saved iteration counter, so a fixed budget
    /// may already be spent before the first move.
    pub fn extend_budget(&mut self, plies: usize) {
        self.config.iteration_budget = self.iteration.saturating_add(plies);
    }

    pub fn is_finished(&self) -> bool {
        self.iteration >= self.config.iteration_budget
    }

    /// Play one ply for the agent holding the turn.
    ///
    /// # Errors
    ///
    /// Propagates input failures (e.g. [`Error::InputClosed`]) and returns
    /// [`Error::RejectedValidatedMove`] if the board refuses a move the agent
    /// already validated, which indicates a bug rather than bad input.
    pub fn step(&mut self) -> Result<PlyReport> {
        let seat = self.turn;
        self.presenter.render(&self.board);

        let mover = &mut self.agents[seat.index()];
        let position = mover.decide_move(&self.board, self.input.as_mut())?;
        let mark = mover.mark();
        self.board
            .place(position, mark)
            .map_err(|e| Error::RejectedValidatedMove {
                row: position.row,
                col: position.col,
                reason: e.to_string(),
            })?;
        mover.commit_move(position);
        self.agents[seat.other().index()].observe(position, mark);

        let status = self.board.winner();
        let reward = self.config.rewards.reward_for(status);
        let updated_value = self.agents[seat.index()].learn(reward, &self.board);

        let phase = match status.outcome() {
            Some(outcome) => {
                self.finish_match(outcome);
                MatchPhase::Terminal(outcome)
            }
            None => MatchPhase::AwaitingMove(seat.other()),
        };

        self.turn = seat.other();
        self.iteration += 1;

        let interval = self.config.checkpoint_interval;
        let checkpoint = if interval > 0 && self.iteration.is_multiple_of(interval) {
            self.scheduled_checkpoint()
        } else {
            Checkpoint::Skipped
        };

        Ok(PlyReport {
            seat,
            position,
            status,
            reward,
            updated_value,
            phase,
            checkpoint,
        })
    }

    /// Play until the iteration budget is spent or the session is cancelled.
    pub fn run(&mut self) -> Result<SessionSummary> {
        let mut cancelled = false;
        while !self.is_finished() {
            if self.cancel.is_cancelled() {
                log::info!("session cancelled at iteration {}", self.iteration);
                cancelled = true;
                break;
            }
            self.step()?;
        }
        Ok(self.summary(cancelled))
    }

    pub fn summary(&self, cancelled: bool) -> SessionSummary {
        SessionSummary {
            iterations: self.iteration,
            matches: self.matches,
            stats: [self.agents[0].stats(), self.agents[1].stats()],
            cancelled,
        }
    }

    fn finish_match(&mut self, outcome: GameOutcome) {
        self.presenter.render(&self.board);

        for agent in &mut self.agents {
            let result = match outcome {
                GameOutcome::Draw => MatchResult::Draw,
                GameOutcome::Win(mark) if mark == agent.mark() => MatchResult::Win,
                GameOutcome::Win(_) => MatchResult::Loss,
            };
            agent.record_outcome(result);
        }
        self.matches += 1;

        let [first, second] = &self.agents;
        log::info!(
            "match {} over ({:?}): {} {:?}, {} {:?}",
            self.matches,
            outcome,
            first.name(),
            first.stats(),
            second.name(),
            second.stats()
        );

        self.board.reset();
        for agent in &mut self.agents {
            agent.restart();
        }
    }

    fn scheduled_checkpoint(&self) -> Checkpoint {
        match self.checkpoint() {
            Ok(()) => {
                log::info!(
                    "checkpoint saved to {} at iteration {}",
                    self.config.checkpoint_path.display(),
                    self.iteration
                );
                Checkpoint::Saved
            }
            Err(err) => {
                log::error!("checkpoint at iteration {} failed: {err}", self.iteration);
                Checkpoint::Failed(err.to_string())
            }
        }
    }

    /// Save the current session to the configured checkpoint path
    pub fn checkpoint(&self) -> Result<()> {
        self.repository
            .save(&self.snapshot(), &self.config.checkpoint_path)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            version: SessionSnapshot::VERSION,
            agent_1: self.agents[0].snapshot(),
            agent_2: self.agents[1].snapshot(),
            turn: self.turn,
            board_size: self.board.size(),
            board_cells: self.board.rows(),
            iteration: self.iteration,
            iteration_budget: self.config.iteration_budget,
            matches: self.matches,
        }
    }

    /// Resume from the configured checkpoint path.
    ///
    /// On any error the session is left exactly as it was, so the caller can
    /// report the failure and carry on with fresh agents.
    pub fn try_restore(&mut self, selection: RestoreSelection) -> Result<()> {
        let snapshot = self.repository.load(&self.config.checkpoint_path)?;
        self.apply_snapshot(&snapshot, selection)
    }

    /// Adopt a snapshot's board, turn, counters and running state keys, and
    /// the learned knowledge of the seats in `selection`.
    ///
    /// The configured iteration budget is kept. Nothing changes unless the
    /// whole snapshot is valid for this session.
    pub fn apply_snapshot(
        &mut self,
        snapshot: &SessionSnapshot,
        selection: RestoreSelection,
    ) -> Result<()> {
        let board = snapshot.validate()?;
        if board.size() != self.config.board_size {
            return Err(Error::schema(format!(
                "snapshot board is {0}x{0}, session is configured for {1}x{1}",
                board.size(),
                self.config.board_size
            )));
        }
        for seat in Seat::BOTH {
            let saved = snapshot.agent(seat);
            let agent = &self.agents[seat.index()];
            if saved.mark != agent.mark() {
                return Err(Error::schema(format!(
                    "seat {seat:?} plays {} but the snapshot has {}",
                    agent.mark(),
                    saved.mark
                )));
            }
        }

        self.board = board;
        self.turn = snapshot.turn;
        self.iteration = snapshot.iteration;
        self.matches = snapshot.matches;
        for seat in Seat::BOTH {
            let saved = snapshot.agent(seat);
            let agent = &mut self.agents[seat.index()];
            if selection.includes(seat) {
                agent.restore_knowledge(saved);
            }
            agent.restore_trajectory(saved.state.clone(), saved.prev_state.clone());
        }

        log::info!(
            "restored session at iteration {} ({} matches played)",
            self.iteration,
            self.matches
        );
        Ok(())
    }
}
