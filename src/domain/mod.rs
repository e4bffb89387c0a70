//! Domain types for the train registry.

pub mod train;

pub use train::{NewTrain, TrainNumber, TrainRecord};
