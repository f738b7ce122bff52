//! CLI frontend for Babel Academy: inspect narrator replies and replay
//! scripted sessions.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "babel",
    about = "Babel Academy: status-block tools and scripted play",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log parser and session activity (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a narrator reply into narrative and parsed status
    Parse {
        /// File holding one raw reply
        file: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the status block of a narrator reply
    Check {
        /// File holding one raw reply
        file: PathBuf,
    },

    /// Play interactively against replies replayed from a directory
    Play {
        /// Directory of *.txt replies, used in name order
        #[arg(short, long)]
        script: PathBuf,

        /// Save file to resume from
        #[arg(short, long)]
        load: Option<PathBuf>,

        /// Write a save file here on exit
        #[arg(long)]
        save: Option<PathBuf>,

        /// Settings file (JSON) holding credentials
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Player name for a new game
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Summarise a save file
    State {
        /// Save file to read
        save: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse { file, json } => commands::parse::run(&file, json),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Play {
            script,
            load,
            save,
            settings,
            name,
        } => commands::play::run(
            &script,
            load.as_deref(),
            save.as_deref(),
            settings.as_deref(),
            name.as_deref(),
        ),
        Commands::State { save } => commands::state::run(&save),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
