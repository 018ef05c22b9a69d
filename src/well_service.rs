use crate::database::DatabaseManager;
use crate::database::entities::WellAggregate;
use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const WELL_NOT_FOUND: &str = "Well not found";

/// Production totals returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellData {
    pub oil: f64,
    pub gas: f64,
    pub brine: f64,
}

impl From<&WellAggregate> for WellData {
    fn from(aggregate: &WellAggregate) -> Self {
        Self {
            oil: aggregate.oil_total,
            gas: aggregate.gas_total,
            brine: aggregate.brine_total,
        }
    }
}

/// Read-only lookup over the aggregate table
#[async_trait]
pub trait WellService: Send + Sync {
    /// Look up a well by identifier. Surrounding whitespace is ignored, and a
    /// blank identifier matches no well.
    async fn get_well_data(&self, well_identifier: &str) -> Result<WellAggregate, AppError>;
}

pub struct WellServiceImpl {
    database: Arc<dyn DatabaseManager>,
}

impl WellServiceImpl {
    pub fn new(database: Arc<dyn DatabaseManager>) -> Self {
        Self { database }
    }
}

#[async_trait]
impl WellService for WellServiceImpl {
    async fn get_well_data(&self, well_identifier: &str) -> Result<WellAggregate, AppError> {
        self.database
            .well_aggregates()
            .find_by_well_identifier(well_identifier.trim())
            .await?
            .ok_or_else(|| AppError::NotFound(WELL_NOT_FOUND.to_string()))
    }
}
