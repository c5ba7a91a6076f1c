use crate::output::print_json;
use chirp_core::phrase::PhraseState;
use chirp_core::store::FsStore;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum KillswitchSubcommand {
    /// Show whether the bot is enabled
    Status,
    /// Allow posting
    Enable,
    /// Stop all posting without redeploying
    Disable,
}

pub fn run(
    state_dir: &Path,
    bot: &str,
    subcommand: KillswitchSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let store = FsStore::new(state_dir);
    let state = PhraseState::new(&store, bot);

    let enabled = match subcommand {
        KillswitchSubcommand::Status => state.is_enabled(),
        KillswitchSubcommand::Enable => {
            state.set_enabled(true)?;
            true
        }
        KillswitchSubcommand::Disable => {
            state.set_enabled(false)?;
            false
        }
    };

    if json {
        return print_json(&serde_json::json!({ "enabled": enabled }));
    }
    println!("{bot} is {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}
