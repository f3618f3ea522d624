//! Nikki CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nikki::cli::Cli;
use nikki::{Config, DiarySyncService};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Configuration problems are the only fatal tier: report and exit 1
    // before any network call.
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };
    config.dry_run = config.dry_run || cli.dry_run;

    // Everything past this point is best-effort: failures are logged and
    // the exit status stays 0.
    let service = DiarySyncService::from_config(config);
    if let Err(err) = service.run().await {
        tracing::error!(error = %err, "Diary sync aborted");
    }
}
