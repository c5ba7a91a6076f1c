use crate::output::print_json;
use chirp_core::config::{PhraseBotConfig, SequentialBotConfig};
use chirp_core::phrase::{PhraseOutcome, PhrasePoster};
use chirp_core::publisher::HttpPublisher;
use chirp_core::sequential::{RunOutcome, SequentialPoster};
use chirp_core::store::FsStore;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum RunSubcommand {
    /// One invocation of a sequential corpus bot
    Sequential {
        /// Environment variable prefix (e.g. TEHILIM)
        #[arg(long)]
        prefix: String,
    },
    /// One invocation of a constant-phrase bot
    Phrase {
        /// Environment variable prefix (e.g. BIBI_QUIT)
        #[arg(long)]
        prefix: String,
    },
}

pub fn run(state_dir: &Path, subcommand: RunSubcommand, json: bool) -> anyhow::Result<()> {
    match subcommand {
        RunSubcommand::Sequential { prefix } => {
            let config = SequentialBotConfig::from_env(&prefix)?;
            let store = FsStore::new(state_dir);
            let publisher = HttpPublisher::new(config.credentials.clone());
            let outcome = SequentialPoster::new(&config, &store, &publisher).run()?;
            if json {
                return print_json(&outcome);
            }
            match outcome {
                RunOutcome::Posted { cursor } => {
                    println!("posted; cursor now {}/{}", cursor.major, cursor.minor)
                }
                RunOutcome::PublishFailed => {
                    println!("publish failed; cursor unchanged, will retry next trigger")
                }
            }
            Ok(())
        }
        RunSubcommand::Phrase { prefix } => {
            let config = PhraseBotConfig::from_env(&prefix)?;
            let store = FsStore::new(state_dir);
            let publisher = HttpPublisher::new(config.credentials.clone());
            let outcome = PhrasePoster::new(&config, &store, &publisher).run();
            if json {
                return print_json(&outcome);
            }
            match outcome {
                PhraseOutcome::Disabled => println!("disabled via kill switch; nothing posted"),
                PhraseOutcome::OutsideWindow => println!("outside posting window; nothing posted"),
                PhraseOutcome::Posted { id } => println!("posted: id {}", id.0),
                PhraseOutcome::PublishFailed => println!("publish failed"),
            }
            Ok(())
        }
    }
}
