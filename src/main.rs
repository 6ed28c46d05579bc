use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use learning_journal::commands;
use learning_journal::config::{Args, JournalConfig};
use learning_journal::local_store::LocalStore;
use learning_journal::remote::HttpRemote;
use learning_journal::sync::EntrySynchronizer;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = JournalConfig::from(&args);

    let store = LocalStore::open(&config.data_dir).map_err(|e| {
        eyre!(
            "Failed to open local store at {}: {}",
            config.data_dir.display(),
            e
        )
    })?;
    let remote = HttpRemote::new(config.api_url.as_str())?;
    let sync = EntrySynchronizer::new(store, remote, config.remote_enabled);

    commands::run(&sync, args.command).await
}
