use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;
use tower::ServiceExt;
use well_data_service::{Config, Server};

pub const HEADER: &str = "API WELL  NUMBER,OIL,GAS,BRINE";

/// Unified test harness: a server prepared against a CSV source
pub struct TestHarness {
    pub server: Server,
    pub app: Router,
    // Keeps the source file alive for the lifetime of the harness
    #[allow(dead_code)]
    pub source: NamedTempFile,
}

impl TestHarness {
    /// Prepare a server whose startup load reads `csv_body` (rows after the header)
    pub async fn with_source(csv_body: &str) -> Self {
        let source = csv_source(csv_body);
        let config = test_config(&source);

        let server = Server::new(config).await.unwrap();
        server.prepare().await.unwrap();
        let app = server.create_app();

        Self {
            server,
            app,
            source,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

pub fn csv_source(csv_body: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".csv").unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    file.write_all(csv_body.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn test_config(source: &NamedTempFile) -> Config {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.loader.source_path = source.path().display().to_string();
    config.logging.log_request = false;
    config
}
