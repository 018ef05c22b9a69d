use crate::{
    config::Config,
    database::{DatabaseManager, DatabaseManagerImpl, entities::NewWellAggregate},
    loader::source::{BRINE_COLUMN, GAS_COLUMN, OIL_COLUMN, WELL_NUMBER_COLUMN},
    server::Server,
};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tower::ServiceExt;

/// Migrated in-memory database
pub async fn test_database() -> Arc<DatabaseManagerImpl> {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();

    let database = DatabaseManagerImpl::new_from_config(&config).await.unwrap();
    database.migrate().await.unwrap();
    Arc::new(database)
}

pub fn new_aggregate(well: &str, oil: f64, gas: f64, brine: f64) -> NewWellAggregate {
    NewWellAggregate {
        well_identifier: well.to_string(),
        oil_total: oil,
        gas_total: gas,
        brine_total: brine,
    }
}

/// Write production rows to a temporary CSV with the source column layout
pub fn write_csv(rows: &[(&str, f64, f64, f64)]) -> NamedTempFile {
    let file = NamedTempFile::with_suffix(".csv").unwrap();
    let mut writer = csv::Writer::from_path(file.path()).unwrap();
    writer
        .write_record([WELL_NUMBER_COLUMN, OIL_COLUMN, GAS_COLUMN, BRINE_COLUMN])
        .unwrap();
    for (well, oil, gas, brine) in rows {
        writer
            .write_record([
                well.to_string(),
                oil.to_string(),
                gas.to_string(),
                brine.to_string(),
            ])
            .unwrap();
    }
    writer.flush().unwrap();
    file
}

/// Write production rows to a temporary workbook
pub fn write_xlsx(sheet: Option<&str>, rows: &[(&str, f64, f64, f64)]) -> NamedTempFile {
    let file = NamedTempFile::with_suffix(".xlsx").unwrap();
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    if let Some(name) = sheet {
        worksheet.set_name(name).unwrap();
    }

    for (col, header) in [WELL_NUMBER_COLUMN, OIL_COLUMN, GAS_COLUMN, BRINE_COLUMN]
        .into_iter()
        .enumerate()
    {
        worksheet.write_string(0, col as u16, header).unwrap();
    }
    for (index, (well, oil, gas, brine)) in rows.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet.write_string(row, 0, *well).unwrap();
        worksheet.write_number(row, 1, *oil).unwrap();
        worksheet.write_number(row, 2, *gas).unwrap();
        worksheet.write_number(row, 3, *brine).unwrap();
    }

    workbook.save(file.path()).unwrap();
    file
}

/// Send a GET request and decode the JSON body
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Test server builder backed by an in-memory database
pub struct TestServerBuilder {
    config: Config,
    wells: Vec<NewWellAggregate>,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        config.loader.load_on_startup = false;
        config.logging.log_request = false;

        Self {
            config,
            wells: Vec::new(),
        }
    }

    /// Seed aggregates directly, bypassing the loader
    pub fn with_wells(mut self, wells: &[(&str, f64, f64, f64)]) -> Self {
        self.wells.extend(
            wells
                .iter()
                .map(|(well, oil, gas, brine)| new_aggregate(well, *oil, *gas, *brine)),
        );
        self
    }

    /// Build the test server with configured settings
    pub async fn build(self) -> Server {
        let server = Server::new(self.config).await.unwrap();
        server.prepare().await.unwrap();
        server
            .database
            .well_aggregates()
            .insert_all(&self.wells)
            .await
            .unwrap();
        server
    }
}
