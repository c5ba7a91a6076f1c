use chirp_core::store::FsStore;
use std::path::Path;
use std::sync::Arc;

pub fn run(state_dir: &Path, bot: &str, port: u16) -> anyhow::Result<()> {
    let store = Arc::new(FsStore::new(state_dir));
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(chirp_server::serve(store, bot, port))
}
