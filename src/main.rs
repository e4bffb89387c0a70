use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use trainboard::cli::{run, Cli};
use trainboard::{logging, Config};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("Configuration error")?;

    let filter = if cli.verbose {
        "debug"
    } else {
        config.log_filter.as_str()
    };

    // One runtime thread, one connection; the subscriber lives for the whole run.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    let code = tracing::subscriber::with_default(logging::subscriber(filter), || {
        runtime.block_on(run(cli, &config))
    });

    Ok(ExitCode::from(code))
}
