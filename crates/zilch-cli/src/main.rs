//! CLI frontend for Zilch.

mod commands;
mod prompt;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{FinalRoundArg, GroupArg, OrderArg};

#[derive(Parser)]
#[command(
    name = "zilch",
    about = "Zilch: a ten-dice push-your-luck game",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions (rolls, selections, roll-offs) to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play {
        /// RNG seed for reproducible dice
        #[arg(short, long)]
        seed: Option<u64>,

        /// Score that starts the final round
        #[arg(short, long)]
        target: Option<u32>,

        /// Who plays in the final round
        #[arg(long, value_enum)]
        final_round: Option<FinalRoundArg>,

        /// Never offer the previous player's banked score
        #[arg(long)]
        no_carry: bool,

        /// Which ties the opening roll-off breaks
        #[arg(long, value_enum)]
        order: Option<OrderArg>,

        /// Scoring rule for four or more of a kind
        #[arg(long, value_enum)]
        group_scoring: Option<GroupArg>,

        /// JSON config file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the event log when the game ends
        #[arg(long)]
        log: bool,
    },

    /// List every way to score a roll
    Score {
        /// Die faces, 1 to 6 (at most ten)
        #[arg(required = true)]
        faces: Vec<u8>,

        /// Scoring rule for four or more of a kind
        #[arg(long, value_enum, default_value = "multiplicative")]
        group_scoring: GroupArg,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Roll off to decide the playing order
    Order {
        /// Player names in seating order
        #[arg(required = true)]
        names: Vec<String>,

        /// Which ties to roll off
        #[arg(short, long, value_enum, default_value = "first")]
        mode: OrderArg,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play {
            seed,
            target,
            final_round,
            no_carry,
            order,
            group_scoring,
            config,
            log,
        } => commands::play::run(commands::play::PlayOptions {
            seed,
            target,
            final_round,
            no_carry,
            order,
            group_scoring,
            config,
            log,
        }),
        Commands::Score {
            faces,
            group_scoring,
            json,
        } => commands::score::run(&faces, group_scoring, json),
        Commands::Order { names, mode, seed } => commands::order::run(&names, mode, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr: warnings by default, debug with `--verbose`. `RUST_LOG`
/// takes precedence over both.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
