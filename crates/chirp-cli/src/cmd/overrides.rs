use crate::output::print_json;
use chirp_core::phrase::PhraseState;
use chirp_core::store::FsStore;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum OverrideSubcommand {
    /// List scheduled overrides in date order
    List,
    /// Add or update the override for a date
    Add {
        /// Date in YYYY-MM-DD
        date: String,
        /// Phrase to post instead of the constant phrase
        phrase: String,
    },
    /// Remove the override for a date
    Remove {
        /// Date in YYYY-MM-DD
        date: String,
    },
}

pub fn run(
    state_dir: &Path,
    bot: &str,
    subcommand: OverrideSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    let store = FsStore::new(state_dir);
    let state = PhraseState::new(&store, bot);

    match subcommand {
        OverrideSubcommand::List => {
            let table = state.load_overrides();
            if json {
                return print_json(&table);
            }
            if table.is_empty() {
                println!("no overrides scheduled");
            }
            for (date, phrase) in table.iter() {
                println!("{date}  {phrase}");
            }
            Ok(())
        }
        OverrideSubcommand::Add { date, phrase } => {
            state.add_override(&date, &phrase)?;
            println!("override scheduled for {date}");
            Ok(())
        }
        OverrideSubcommand::Remove { date } => {
            if !state.remove_override(&date)? {
                anyhow::bail!("no override found for {date}");
            }
            println!("override removed for {date}");
            Ok(())
        }
    }
}
