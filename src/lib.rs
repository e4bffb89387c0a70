pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::Config;
pub use db::{open_storage, Storage, TrainRepository};
pub use domain::{NewTrain, TrainNumber, TrainRecord};
pub use error::TrainError;
