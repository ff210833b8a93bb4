//! Train command - two autonomous agents play each other

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use super::{RestoreArg, StateFormat, resume, save_final};
use crate::{
    app::{AgentConfig, SessionConfig},
    cli::output::{create_training_progress, format_number, format_stats, print_kv, print_section},
    q_learning::Agent,
    session::{MatchController, MatchPhase, Seat, SessionSummary},
    tictactoe::Mark,
};

#[derive(Debug, Serialize)]
struct SummaryStats {
    iterations: usize,
    matches: usize,
    agents: Vec<AgentSummary>,
}

#[derive(Debug, Serialize)]
struct AgentSummary {
    name: String,
    mark: Mark,
    wins: usize,
    losses: usize,
    draws: usize,
    known_states: usize,
}

impl SummaryStats {
    fn collect(controller: &MatchController, summary: &SessionSummary) -> Self {
        let agents = Seat::BOTH
            .iter()
            .map(|&seat| {
                let agent = controller.agent(seat);
                let stats = summary.stats[seat.index()];
                AgentSummary {
                    name: agent.name().to_string(),
                    mark: agent.mark(),
                    wins: stats.wins,
                    losses: stats.losses,
                    draws: stats.draws,
                    known_states: agent.value_table().len(),
                }
            })
            .collect();
        Self {
            iterations: summary.iterations,
            matches: summary.matches,
            agents,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train two agents against each other")]
pub struct TrainArgs {
    /// Total plies to play
    #[arg(long, short = 'i', default_value_t = 30000)]
    pub iterations: usize,

    /// Board side length
    #[arg(long, short = 'n', default_value_t = 3)]
    pub board_size: usize,

    /// Save the session every this many plies (0 disables)
    #[arg(long, default_value_t = 100)]
    pub checkpoint_every: usize,

    /// Session file
    #[arg(long, short = 's', default_value = "session.json")]
    pub state: PathBuf,

    /// Encoding of the session file
    #[arg(long, value_enum, default_value_t = StateFormat::Json)]
    pub format: StateFormat,

    /// Resume from the session file, keeping the learned tables of these agents
    #[arg(long, value_enum)]
    pub restore: Option<RestoreArg>,

    /// Random seed for reproducibility (the second agent uses seed+1)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Learning rate of the first agent (X)
    #[arg(long, default_value_t = 1.2)]
    pub first_alpha: f64,

    /// Discount factor of the first agent (X)
    #[arg(long, default_value_t = 0.8)]
    pub first_gamma: f64,

    /// Exploration probability of the first agent (X)
    #[arg(long, default_value_t = 0.9)]
    pub first_epsilon: f64,

    /// Learning rate of the second agent (O)
    #[arg(long, default_value_t = 0.95)]
    pub second_alpha: f64,

    /// Discount factor of the second agent (O)
    #[arg(long, default_value_t = 0.95)]
    pub second_gamma: f64,

    /// Exploration probability of the second agent (O)
    #[arg(long, default_value_t = 0.95)]
    pub second_epsilon: f64,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let session = SessionConfig::new()
        .with_board_size(args.board_size)
        .with_iteration_budget(args.iterations)
        .with_checkpoint_interval(args.checkpoint_every)
        .with_checkpoint_path(args.state.clone());

    let mut first = AgentConfig::autonomous("Bot Meshok", Mark::X)
        .with_alpha(args.first_alpha)
        .with_gamma(args.first_gamma)
        .with_epsilon(args.first_epsilon);
    let mut second = AgentConfig::autonomous("Bot AIBA", Mark::O)
        .with_alpha(args.second_alpha)
        .with_gamma(args.second_gamma)
        .with_epsilon(args.second_epsilon);
    if let Some(seed) = args.seed {
        first = first.with_seed(seed);
        second = second.with_seed(seed.wrapping_add(1));
    }

    let mut controller = MatchController::new(
        session,
        Agent::from_config(&first).context("invalid first agent")?,
        Agent::from_config(&second).context("invalid second agent")?,
        args.format.repository(),
    )
    .context("failed to set up session")?;
    resume(&mut controller, args.restore, &args.state);

    print_section("Training");
    print_kv("Board", &format!("{0}x{0}", args.board_size));
    print_kv("Plies", &format_number(args.iterations));
    print_kv("Session file", &args.state.display().to_string());
    if controller.iteration() > 0 {
        print_kv("Resumed at", &format_number(controller.iteration()));
    }

    let progress = if !args.no_progress {
        let pb = create_training_progress(args.iterations as u64)?;
        pb.set_position(controller.iteration() as u64);
        Some(pb)
    } else {
        None
    };

    while !controller.is_finished() {
        let report = controller.step().context("ply failed")?;
        if let Some(pb) = &progress {
            pb.inc(1);
            if matches!(report.phase, MatchPhase::Terminal(_)) {
                pb.set_message(format!("{} matches", controller.matches()));
            }
        }
    }
    if let Some(pb) = progress {
        pb.finish_with_message(format!("{} matches", controller.matches()));
    }

    save_final(&controller)?;
    let summary = controller.summary(false);

    print_section("Results");
    print_kv("Plies", &format_number(summary.iterations));
    print_kv("Matches", &format_number(summary.matches));
    for seat in Seat::BOTH {
        let agent = controller.agent(seat);
        print_kv(
            &format!("{} ({})", agent.name(), agent.mark()),
            &format_stats(&summary.stats[seat.index()]),
        );
    }

    if let Some(path) = &args.summary {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        to_writer_pretty(file, &SummaryStats::collect(&controller, &summary))
            .context("failed to write summary")?;
        println!("\nSummary written to: {}", path.display());
    }

    Ok(())
}
