mod app;
mod cli;
mod error;

use crate::app::App;
use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tubestat_config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

/// `RUST_LOG` wins over `-v`.
fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let app = App::new(config, cli.dry_run)?;
    match cli.command {
        Command::Sync => {
            let snapshot = app.sync().await?;
            println!("{} videos, {} with details", snapshot.videos.len(), snapshot.details.len());
        },
        Command::Export { output } => {
            let rows = app.export(output.as_deref()).await?;
            tracing::debug!(rows, "Export finished");
        },
        Command::Status => {
            for file in app.status().await? {
                let records = file.records.map_or_else(|| "missing".to_string(), |count| format!("{count} records"));
                let age = file.age.map_or_else(|| "-".to_string(), |age| format!("written {age} ago"));
                let due = if file.due { "update due" } else { "fresh" };
                println!("{}: {records}, {age}, {due}", file.path.display());
            }
        },
    }
    Ok(())
}
