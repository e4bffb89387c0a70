//! Repository layer for train and station rows.

use crate::domain::{NewTrain, TrainNumber, TrainRecord};
use crate::error::TrainError;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use tracing::{debug, info, instrument, warn, Span};

const SELECT_JOINED: &str = r#"
    SELECT trains.number, trains.destination, trains.time, stations.station_name
    FROM trains
    LEFT JOIN stations ON trains.id = stations.train_id
"#;

/// Repository for train operations.
///
/// Every operation runs inside the span handed to [`TrainRepository::new`].
pub struct TrainRepository {
    pool: SqlitePool,
    span: Span,
}

impl TrainRepository {
    /// Create a new repository over an initialized pool, logging under `span`.
    pub fn new(pool: SqlitePool, span: Span) -> Self {
        TrainRepository { pool, span }
    }

    /// Insert a train and its station atomically and return the stored record.
    ///
    /// # Errors
    /// `DuplicateTrainNumber` if the number is taken; `StorageFailure` for anything else.
    /// Storage is left untouched in both cases.
    #[instrument(parent = &self.span, skip_all, fields(number = %train.number))]
    pub async fn add_train(&self, train: &NewTrain) -> Result<TrainRecord, TrainError> {
        if let Err(e) = self.insert_train(train).await {
            match &e {
                TrainError::DuplicateTrainNumber(_) => warn!("Train number already exists"),
                other => warn!(error = %other, "Failed to add train"),
            }
            return Err(e);
        }

        info!(
            destination = %train.destination,
            time = %train.departure_time,
            "Train added"
        );

        self.find_train(&train.number).await?.ok_or_else(|| {
            TrainError::StorageFailure(format!(
                "train {} missing right after insert",
                train.number
            ))
        })
    }

    async fn insert_train(&self, train: &NewTrain) -> Result<(), TrainError> {
        let mut tx = self.pool.begin().await?;

        let train_id = sqlx::query("INSERT INTO trains (destination, number, time) VALUES (?, ?, ?)")
            .bind(&train.destination)
            .bind(train.number.as_str())
            .bind(&train.departure_time)
            .execute(&mut *tx)
            .await
            .map_err(|e| classify_insert_error(e, &train.number))?
            .last_insert_rowid();

        sqlx::query("INSERT INTO stations (station_name, train_id) VALUES (?, ?)")
            .bind(&train.station_name)
            .bind(train_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        debug!(train_id, "Train and station rows committed");
        Ok(())
    }

    /// Look up a train by exact number.
    ///
    /// Returns `Ok(None)` when no train has this number.
    ///
    /// # Errors
    /// `StorageFailure` if the query fails or the number matches more than one joined row.
    #[instrument(parent = &self.span, skip_all, fields(number = %number))]
    pub async fn find_train(&self, number: &TrainNumber) -> Result<Option<TrainRecord>, TrainError> {
        let sql = format!("{} WHERE trains.number = ? ORDER BY stations.id ASC LIMIT 2", SELECT_JOINED);
        let rows = sqlx::query(&sql)
            .bind(number.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Train lookup failed");
                TrainError::from(e)
            })?;

        match rows.as_slice() {
            [] => {
                info!("Train not found");
                Ok(None)
            }
            [row] => {
                debug!("Train found");
                Ok(Some(record_from_row(row)))
            }
            _ => {
                warn!("Train has more than one station");
                Err(TrainError::StorageFailure(format!(
                    "train {} has more than one station",
                    number
                )))
            }
        }
    }

    /// All trains with their stations, oldest first.
    ///
    /// Trains without a station are included with `station_name == None`.
    #[instrument(parent = &self.span, skip_all)]
    pub async fn list_trains(&self) -> Result<Vec<TrainRecord>, TrainError> {
        let sql = format!("{} ORDER BY trains.id ASC, stations.id ASC", SELECT_JOINED);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await.map_err(|e| {
            warn!(error = %e, "Failed to list trains");
            TrainError::from(e)
        })?;

        if rows.is_empty() {
            info!("Train list is empty");
        } else {
            info!(count = rows.len(), "Train list fetched");
        }

        Ok(rows.iter().map(record_from_row).collect())
    }

    /// Number of train rows.
    pub async fn count_trains(&self) -> Result<i64, TrainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM trains")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get::<i64, _>("count"))
    }
}

fn record_from_row(row: &SqliteRow) -> TrainRecord {
    TrainRecord {
        number: TrainNumber::new(row.get::<String, _>("number")),
        destination: row.get("destination"),
        departure_time: row.get("time"),
        station_name: row.get("station_name"),
    }
}

fn classify_insert_error(err: sqlx::Error, number: &TrainNumber) -> TrainError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            TrainError::DuplicateTrainNumber(number.clone())
        }
        _ => TrainError::from(err),
    }
}
