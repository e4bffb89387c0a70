//! Command-line surface: argument definitions, dispatch and the per-invocation run.

pub mod render;

use crate::config::Config;
use crate::db::{open_storage, TrainRepository};
use crate::domain::{NewTrain, TrainNumber};
use crate::error::TrainError;
use clap::{Args, Parser, Subcommand};
use std::io;
use tracing::{error, info_span, warn};

pub use render::{exit_code, render, Outcome, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "trainboard")]
#[command(about = "Record and look up train departures")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new train
    Add(AddArgs),

    /// Show all trains
    List,

    /// Find a train by its number
    Find(FindArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    /// Destination name
    #[arg(short, long)]
    pub destination: String,

    /// Train number
    #[arg(short, long)]
    pub number: String,

    /// Departure time (HH:MM)
    #[arg(short, long)]
    pub time: String,

    /// Station name
    #[arg(short, long)]
    pub station: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct FindArgs {
    /// Train number to look up
    pub number: String,
}

/// Run one repository operation for `command`.
pub async fn execute(repo: &TrainRepository, command: Command) -> Result<Outcome, TrainError> {
    match command {
        Command::Add(args) => {
            let train = NewTrain::new(args.destination, args.number, args.time, args.station);
            repo.add_train(&train).await.map(Outcome::Added)
        }
        Command::List => repo.list_trains().await.map(Outcome::Listed),
        Command::Find(args) => {
            let number = TrainNumber::new(args.number);
            Ok(match repo.find_train(&number).await? {
                Some(train) => Outcome::Found(train),
                None => Outcome::Missing(number),
            })
        }
    }
}

/// Open storage, run the command, print the result and close storage.
///
/// Returns the process exit status.
pub async fn run(cli: Cli, config: &Config) -> u8 {
    let storage = match open_storage(&config.data_dir, &config.db_name).await {
        Ok(storage) => storage,
        Err(e) => {
            error!(error = %e, "Command not run, storage unavailable");
            let result = Err(e);
            report(cli.format, &result);
            return exit_code(&result);
        }
    };

    let span = info_span!("trains", db = %config.db_name);
    let repo = TrainRepository::new(storage.pool().clone(), span);

    let result = execute(&repo, cli.command).await;
    report(cli.format, &result);

    storage.close().await;
    exit_code(&result)
}

fn report(format: OutputFormat, result: &Result<Outcome, TrainError>) {
    let stdout = io::stdout();
    let stderr = io::stderr();
    if let Err(e) = render(&mut stdout.lock(), &mut stderr.lock(), format, result) {
        warn!(error = %e, "Failed to write output");
    }
}
