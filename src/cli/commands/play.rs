//! Play command - a person at the terminal against a trained agent

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::{RestoreArg, StateFormat, resume, save_final};
use crate::{
    Error,
    adapters::{ConsolePresenter, StdinInput},
    app::{AgentConfig, SessionConfig},
    cli::output::{format_stats, print_kv, print_section},
    q_learning::Agent,
    session::{MatchController, Seat},
    tictactoe::Mark,
};

#[derive(Parser, Debug)]
#[command(about = "Play against a trained agent")]
pub struct PlayArgs {
    /// Your name
    #[arg(long, default_value = "Player")]
    pub name: String,

    /// Board side length
    #[arg(long, short = 'n', default_value_t = 3)]
    pub board_size: usize,

    /// Plies to play in this session, counted from the resumed iteration
    #[arg(long, short = 'i', default_value_t = 30000)]
    pub iterations: usize,

    /// Save the session every this many plies (0 disables)
    #[arg(long, default_value_t = 100)]
    pub checkpoint_every: usize,

    /// Session file
    #[arg(long, short = 's', default_value = "session.json")]
    pub state: PathBuf,

    /// Encoding of the session file
    #[arg(long, value_enum, default_value_t = StateFormat::Json)]
    pub format: StateFormat,

    /// Which learned tables to take from the session file
    #[arg(long, value_enum, default_value_t = RestoreArg::Second)]
    pub restore: RestoreArg,

    /// Start without reading the session file
    #[arg(long)]
    pub fresh: bool,

    /// Exploration probability of the agent
    #[arg(long, default_value_t = 0.0)]
    pub epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let session = SessionConfig::new()
        .with_board_size(args.board_size)
        .with_iteration_budget(args.iterations)
        .with_checkpoint_interval(args.checkpoint_every)
        .with_checkpoint_path(args.state.clone());

    let human = AgentConfig::human(args.name.clone(), Mark::X);
    let mut bot = AgentConfig::autonomous("Bot AIBA", Mark::O).with_epsilon(args.epsilon);
    if let Some(seed) = args.seed {
        bot = bot.with_seed(seed);
    }

    let mut controller = MatchController::new(
        session,
        Agent::from_config(&human).context("invalid player")?,
        Agent::from_config(&bot).context("invalid agent")?,
        args.format.repository(),
    )
    .context("failed to set up session")?
    .with_input(Box::new(StdinInput::new()))
    .with_presenter(Box::new(ConsolePresenter));

    let restore = (!args.fresh).then_some(args.restore);
    resume(&mut controller, restore, &args.state);
    controller.extend_budget(args.iterations);
    // restored knowledge carries the training epsilon
    controller
        .agent_mut(Seat::Second)
        .set_epsilon(args.epsilon)
        .context("invalid --epsilon")?;

    match controller.run() {
        Ok(_) => {}
        Err(Error::InputClosed) => println!("\nInput closed, saving session."),
        Err(err) => return Err(err).context("session aborted"),
    }
    save_final(&controller)?;

    print_section("Results");
    for seat in Seat::BOTH {
        let agent = controller.agent(seat);
        print_kv(
            &format!("{} ({})", agent.name(), agent.mark()),
            &format_stats(&agent.stats()),
        );
    }
    Ok(())
}
