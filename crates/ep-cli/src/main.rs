//! CLI host for the Eclipse Phase success-test engine.

mod commands;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ep",
    about = "Roll and classify Eclipse Phase success tests",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a known roll against a target
    Classify {
        /// The percentile roll (0-99)
        roll: u32,

        /// The target number (clamped to 0-99)
        #[arg(allow_hyphen_values = true)]
        target: i32,

        /// The character is defaulting on an untrained skill
        #[arg(short, long)]
        defaulting: bool,
    },

    /// Configure and roll a success test
    Roll {
        /// Base skill or attribute rating
        #[arg(short, long, allow_hyphen_values = true)]
        rating: i32,

        /// Flat modifier, repeatable (e.g. --mod Wounded=-10)
        #[arg(short, long = "mod", value_name = "NAME=VALUE", allow_hyphen_values = true)]
        mods: Vec<String>,

        /// The character is defaulting on an untrained skill
        #[arg(short, long)]
        defaulting: bool,

        #[command(flatten)]
        pools: commands::PoolArgs,

        #[command(flatten)]
        output: commands::OutputArgs,
    },

    /// Configure and roll a psi sleight test
    Psi {
        /// Base psi skill rating
        #[arg(short, long, allow_hyphen_values = true)]
        rating: i32,

        /// Sleight name
        #[arg(long, default_value = "Sleight")]
        sleight: String,

        /// The sleight is temporary
        #[arg(long)]
        temporary: bool,

        /// Distance to a target, repeatable (farthest counts)
        #[arg(long)]
        distance: Vec<u32>,

        /// Touching the target
        #[arg(long)]
        touch: bool,

        /// Targeting yourself (no range modifier); counts toward the target limit
        #[arg(long)]
        self_target: bool,

        /// Targeting asynchronously (extends range)
        #[arg(long = "async")]
        targeting_async: bool,

        /// Push to apply (e.g. increased-range)
        #[arg(long)]
        push: Option<String>,

        /// Pool points paid for the push
        #[arg(long, default_value = "0")]
        push_pools: u32,

        /// The character's free push
        #[arg(long)]
        free_push: Option<String>,

        #[command(flatten)]
        pools: commands::PoolArgs,

        #[command(flatten)]
        output: commands::OutputArgs,
    },

    /// Show how every roll resolves against a target
    Odds {
        /// The target number (clamped to 0-99)
        #[arg(allow_hyphen_values = true)]
        target: i32,

        /// The character is defaulting on an untrained skill
        #[arg(short, long)]
        defaulting: bool,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            roll,
            target,
            defaulting,
        } => commands::classify::run(roll, target, defaulting),
        Commands::Roll {
            rating,
            mods,
            defaulting,
            pools,
            output,
        } => commands::roll::run(rating, &mods, defaulting, &pools, &output),
        Commands::Psi {
            rating,
            sleight,
            temporary,
            distance,
            touch,
            self_target,
            targeting_async,
            push,
            push_pools,
            free_push,
            pools,
            output,
        } => commands::psi::run(
            &commands::psi::PsiOptions {
                rating,
                sleight,
                temporary,
                distances: distance,
                touch,
                self_target,
                targeting_async,
                push,
                push_pools,
                free_push,
            },
            &pools,
            &output,
        ),
        Commands::Odds { target, defaulting } => commands::odds::run(target, defaulting),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr, filtered by `EP_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("EP_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
