//! One-shot loader: spreadsheet rows in, one aggregate per well out.

pub mod aggregate;
pub mod config;
pub mod source;

use crate::database::entities::NewWellAggregate;
use crate::database::{DatabaseError, DatabaseManager};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read source: {0}")]
    SourceRead(String),
    #[error("Invalid source data: {0}")]
    DataFormat(String),
    #[error("Duplicate well identifier: {0}")]
    DuplicateKey(String),
    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for LoadError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Constraint(msg) => LoadError::DuplicateKey(msg),
            other => LoadError::Database(other),
        }
    }
}

pub struct Loader {
    database: Arc<dyn DatabaseManager>,
    sheet: Option<String>,
}

impl Loader {
    pub fn new(database: Arc<dyn DatabaseManager>) -> Self {
        Self {
            database,
            sheet: None,
        }
    }

    /// Read a named worksheet instead of the first one
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    /// Parse `source_path`, aggregate by well and store the result in one batch.
    ///
    /// Returns the number of aggregates written. Nothing is committed on error.
    pub async fn load(&self, source_path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path: PathBuf = source_path.as_ref().to_path_buf();
        info!(path = %path.display(), "Loading well production data");

        let sheet = self.sheet.clone();
        let read_path = path.clone();
        let rows = tokio::task::spawn_blocking(move || {
            source::read_rows(&read_path, sheet.as_deref())
        })
        .await
        .map_err(|e| LoadError::SourceRead(format!("reader task failed: {}", e)))??;

        let aggregates = aggregate::aggregate_by_well(&rows);
        if aggregates.is_empty() {
            warn!(path = %path.display(), "Source contains no production rows");
        }

        let count = self.store(&aggregates).await?;
        info!(
            path = %path.display(),
            rows = rows.len(),
            wells = count,
            "Loaded well aggregates"
        );
        Ok(count)
    }

    /// Write a prepared batch. Identifiers must be unique within the batch and
    /// must not already exist in storage.
    pub async fn store(&self, aggregates: &[NewWellAggregate]) -> Result<usize, LoadError> {
        let mut seen = HashSet::with_capacity(aggregates.len());
        for aggregate in aggregates {
            if !seen.insert(aggregate.well_identifier.as_str()) {
                return Err(LoadError::DuplicateKey(format!(
                    "'{}' appears more than once in the batch",
                    aggregate.well_identifier
                )));
            }
        }

        let dao = self.database.well_aggregates();
        match dao.insert_all(aggregates).await {
            Ok(count) => Ok(count),
            Err(DatabaseError::Constraint(msg)) => {
                // The rolled-back insert only reports the column, so name the well
                for aggregate in aggregates {
                    if dao
                        .find_by_well_identifier(&aggregate.well_identifier)
                        .await?
                        .is_some()
                    {
                        return Err(LoadError::DuplicateKey(format!(
                            "'{}' is already stored",
                            aggregate.well_identifier
                        )));
                    }
                }
                Err(LoadError::DuplicateKey(msg))
            }
            Err(other) => Err(other.into()),
        }
    }
}
