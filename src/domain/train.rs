//! Train domain types: the business key, the add input and the joined record.

use serde::{Deserialize, Serialize};

/// Train number, the unique business key (e.g. "001A").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrainNumber(pub String);

impl TrainNumber {
    /// Create a TrainNumber from a string.
    pub fn new(number: impl Into<String>) -> Self {
        TrainNumber(number.into())
    }

    /// Get the number as a string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A train together with the station it is registered at, as accepted by the add operation.
///
/// `departure_time` is a free-form "HH:MM" label and is stored as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrain {
    pub destination: String,
    pub number: TrainNumber,
    pub departure_time: String,
    pub station_name: String,
}

impl NewTrain {
    pub fn new(
        destination: impl Into<String>,
        number: impl Into<String>,
        departure_time: impl Into<String>,
        station_name: impl Into<String>,
    ) -> Self {
        NewTrain {
            destination: destination.into(),
            number: TrainNumber::new(number),
            departure_time: departure_time.into(),
            station_name: station_name.into(),
        }
    }
}

/// A train joined with its station.
///
/// `station_name` is `None` when the train has no station row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainRecord {
    pub number: TrainNumber,
    pub destination: String,
    pub departure_time: String,
    pub station_name: Option<String>,
}
