//! User-facing output for command outcomes.

use crate::domain::{TrainNumber, TrainRecord};
use crate::error::TrainError;
use clap::ValueEnum;
use std::io::{self, Write};

/// Successful result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(TrainRecord),
    Listed(Vec<TrainRecord>),
    Found(TrainRecord),
    Missing(TrainNumber),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write `result` to `out`, or its error to `err`.
pub fn render(
    out: &mut impl Write,
    err: &mut impl Write,
    format: OutputFormat,
    result: &Result<Outcome, TrainError>,
) -> io::Result<()> {
    match result {
        Ok(outcome) => match format {
            OutputFormat::Text => render_text(out, outcome),
            OutputFormat::Json => render_json(out, outcome),
        },
        Err(e) => writeln!(err, "Error: {}", e),
    }
}

/// Process exit status for `result`.
///
/// Expected outcomes, including a duplicate number, exit with 0.
pub fn exit_code(result: &Result<Outcome, TrainError>) -> u8 {
    match result {
        Ok(_) | Err(TrainError::DuplicateTrainNumber(_)) => 0,
        Err(TrainError::StorageFailure(_)) => 1,
        Err(TrainError::ConnectionFailure(_)) => 2,
    }
}

fn render_text(out: &mut impl Write, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Added(train) => writeln!(
            out,
            "Train No. {} to {} added.",
            train.number, train.destination
        ),
        Outcome::Listed(trains) if trains.is_empty() => writeln!(out, "No train data."),
        Outcome::Listed(trains) => {
            for train in trains {
                write_departure(out, train)?;
            }
            Ok(())
        }
        Outcome::Found(train) => write_departure(out, train),
        Outcome::Missing(number) => writeln!(out, "Train with number {} not found.", number),
    }
}

fn write_departure(out: &mut impl Write, train: &TrainRecord) -> io::Result<()> {
    writeln!(
        out,
        "Train No. {} departs for {} at {}, station: {}.",
        train.number,
        train.destination,
        train.departure_time,
        train.station_name.as_deref().unwrap_or("none")
    )
}

fn render_json(out: &mut impl Write, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Added(train) | Outcome::Found(train) => serde_json::to_writer(&mut *out, train)?,
        Outcome::Listed(trains) => serde_json::to_writer(&mut *out, trains)?,
        Outcome::Missing(_) => out.write_all(b"null")?,
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moscow() -> TrainRecord {
        TrainRecord {
            number: TrainNumber::new("001A"),
            destination: "Москва".to_string(),
            departure_time: "10:00".to_string(),
            station_name: Some("Киевский вокзал".to_string()),
        }
    }

    fn rendered(format: OutputFormat, result: &Result<Outcome, TrainError>) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        render(&mut out, &mut err, format, result).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_added_text() {
        let (out, err) = rendered(OutputFormat::Text, &Ok(Outcome::Added(moscow())));
        assert_eq!(out, "Train No. 001A to Москва added.\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_found_text() {
        let (out, _) = rendered(OutputFormat::Text, &Ok(Outcome::Found(moscow())));
        assert_eq!(
            out,
            "Train No. 001A departs for Москва at 10:00, station: Киевский вокзал.\n"
        );
    }

    #[test]
    fn test_listed_text_without_station() {
        let mut orphan = moscow();
        orphan.station_name = None;
        let (out, _) = rendered(
            OutputFormat::Text,
            &Ok(Outcome::Listed(vec![moscow(), orphan])),
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("station: none."));
    }

    #[test]
    fn test_empty_list_text() {
        let (out, _) = rendered(OutputFormat::Text, &Ok(Outcome::Listed(vec![])));
        assert_eq!(out, "No train data.\n");
    }

    #[test]
    fn test_missing_text() {
        let (out, _) = rendered(
            OutputFormat::Text,
            &Ok(Outcome::Missing(TrainNumber::new("002B"))),
        );
        assert_eq!(out, "Train with number 002B not found.\n");
    }

    #[test]
    fn test_error_goes_to_err() {
        let result = Err(TrainError::DuplicateTrainNumber(TrainNumber::new("001A")));
        let (out, err) = rendered(OutputFormat::Json, &result);
        assert!(out.is_empty());
        assert_eq!(err, "Error: Train with number 001A already exists\n");
        assert_eq!(exit_code(&result), 0);
    }

    #[test]
    fn test_json_list_and_missing() {
        let (out, _) = rendered(OutputFormat::Json, &Ok(Outcome::Listed(vec![moscow()])));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["number"], "001A");
        assert_eq!(value[0]["station_name"], "Киевский вокзал");

        let (out, _) = rendered(
            OutputFormat::Json,
            &Ok(Outcome::Missing(TrainNumber::new("9"))),
        );
        assert_eq!(out, "null\n");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&Ok(Outcome::Listed(vec![]))), 0);
        assert_eq!(
            exit_code(&Err(TrainError::StorageFailure("x".to_string()))),
            1
        );
        assert_eq!(
            exit_code(&Err(TrainError::ConnectionFailure("x".to_string()))),
            2
        );
    }
}
