//! CLI frontend for Textwelt adventures.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "tw",
    about = "Textwelt: play German text adventures from JSON world files",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log more to stderr (-v debug, -vv trace). Overrides TW_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a world file, then summarize it
    Check {
        /// Path to the world JSON document
        file: PathBuf,
    },

    /// Play a world interactively, reading commands from stdin
    Play {
        /// Path to the world JSON document
        file: PathBuf,

        /// Continue from a save game instead of the world's initial state
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Write the final game state to this file when the session ends
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// TOML file with engine settings
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env("TW_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check { file } => commands::check::run(&file),
        Commands::Play {
            file,
            resume,
            save,
            config,
        } => commands::play::run(&commands::play::PlayOptions {
            file: &file,
            resume: resume.as_deref(),
            save: save.as_deref(),
            config: config.as_deref(),
        }),
    };

    if let Err(e) = result {
        eprintln!("{e:?}");
        process::exit(1);
    }
}
