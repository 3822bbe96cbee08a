//! Paydesk main entry point

use anyhow::Context;
use clap::Parser;
use paydesk_api::start_server;
use paydesk_client::HttpPaymentsBackend;
use paydesk_config::Config;
use paydesk_core::{FileSessionStore, ReviewService};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "paydesk")]
#[command(author = "Paydesk Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Admin console for reviewing student payments", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn load_config(path: &PathBuf) -> anyhow::Result<Config> {
    Config::load_or_default(path).map_err(|e| {
        for suggestion in e.to_details().suggestions {
            eprintln!("hint: {}", suggestion);
        }
        anyhow::Error::new(e).context(format!("Failed to load {}", path.display()))
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = load_config(&args.config)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.to_lowercase()),
    )
    .init();

    if !args.config.exists() {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!(
        "Config loaded: backend={}, session={}",
        config.backend.base_url,
        config.session.path.display()
    );

    let backend = HttpPaymentsBackend::new(&config.backend).context("Failed to create backend client")?;
    let session = FileSessionStore::from_config(&config.session);
    let service = ReviewService::new(Arc::new(backend), Arc::new(session));

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, service))
}
