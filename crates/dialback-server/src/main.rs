use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dialback_core::{CallScheduler, CallStore, Config, TwilioProvider};

#[derive(Parser)]
#[command(
    name = "dialback-server",
    about = "Schedule a single outbound phone call after a 1-60 minute delay",
    version
)]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, default_value = "dialback.yaml", env = "DIALBACK_CONFIG")]
    config: PathBuf,

    /// Port to listen on (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// Path to the call database (overrides config)
    #[arg(long)]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(&cli.config)?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    let store = CallStore::open(&config.db_path)?;
    let provider = Arc::new(TwilioProvider::new(&config.twilio));
    let scheduler = CallScheduler::new(store, provider, config.target());

    // Re-arm the wake timer from any pending record that survived a restart
    scheduler.resume().await?;

    dialback_server::serve(scheduler, config.port).await
}
