mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{
    killswitch::KillswitchSubcommand, overrides::OverrideSubcommand, parse::ParseSubcommand,
    run::RunSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "chirp",
    about = "Scheduled posting bots — sequential corpus walker and constant-phrase poster",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding persisted bot state documents
    #[arg(long, global = true, env = "CHIRP_STATE_DIR", default_value = "bot-state")]
    state_dir: PathBuf,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one posting invocation (normally fired by the trigger scheduler)
    Run {
        #[command(subcommand)]
        subcommand: RunSubcommand,
    },

    /// Start the management API server for a phrase bot
    Serve {
        /// Phrase bot identity (derives the override/kill-switch store keys)
        #[arg(long)]
        bot: String,

        /// Port to listen on
        #[arg(long, default_value = "3141")]
        port: u16,
    },

    /// Parse a raw corpus text file into corpus JSON
    Parse {
        #[command(subcommand)]
        subcommand: ParseSubcommand,
    },

    /// Manage date-keyed phrase overrides for a phrase bot
    Override {
        /// Phrase bot identity
        #[arg(long)]
        bot: String,

        #[command(subcommand)]
        subcommand: OverrideSubcommand,
    },

    /// Inspect or flip a phrase bot's kill switch
    Killswitch {
        /// Phrase bot identity
        #[arg(long)]
        bot: String,

        #[command(subcommand)]
        subcommand: KillswitchSubcommand,
    },

    /// Verify a bot's API credentials
    Auth {
        /// Environment variable prefix (e.g. TEHILIM)
        #[arg(long)]
        prefix: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Run { .. } | Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Run { subcommand } => cmd::run::run(&cli.state_dir, subcommand, cli.json),
        Commands::Serve { bot, port } => cmd::serve::run(&cli.state_dir, &bot, port),
        Commands::Parse { subcommand } => cmd::parse::run(subcommand, cli.json),
        Commands::Override { bot, subcommand } => {
            cmd::overrides::run(&cli.state_dir, &bot, subcommand, cli.json)
        }
        Commands::Killswitch { bot, subcommand } => {
            cmd::killswitch::run(&cli.state_dir, &bot, subcommand, cli.json)
        }
        Commands::Auth { prefix } => cmd::auth::run(&prefix, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
