pub mod config;
pub mod middleware;

use crate::{
    config::Config,
    database::{DatabaseManager, DatabaseManagerImpl},
    error::AppError,
    health::HealthService,
    loader::Loader,
    routes::{create_health_routes, create_well_routes},
    server::middleware::request_response_logger,
    shutdown::ShutdownCoordinator,
    well_service::{WellService, WellServiceImpl},
};
use axum::{Router, middleware as axum_middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Clone)]
pub struct Server {
    pub config: Arc<Config>,
    pub database: Arc<dyn DatabaseManager>,
    pub well_service: Arc<dyn WellService>,
    pub health_service: Arc<HealthService>,
    pub shutdown_coordinator: Arc<ShutdownCoordinator>,
}

impl Server {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        // Initialize database
        let database_impl = Arc::new(DatabaseManagerImpl::new_from_config(&config).await?);
        let database: Arc<dyn DatabaseManager> = database_impl.clone();

        let well_service: Arc<dyn WellService> = Arc::new(WellServiceImpl::new(database.clone()));

        let health_service = Arc::new(HealthService::new());
        health_service.register(database_impl).await;

        Ok(Self {
            config: Arc::new(config),
            database,
            well_service,
            health_service,
            shutdown_coordinator: Arc::new(ShutdownCoordinator::new()),
        })
    }

    /// Loader bound to this server's database and configured sheet
    pub fn loader(&self) -> Loader {
        Loader::new(self.database.clone()).with_sheet(self.config.loader.sheet.clone())
    }

    /// Create the schema and run the configured startup load.
    ///
    /// Must complete before lookups are served; a failed load is fatal.
    pub async fn prepare(&self) -> Result<(), AppError> {
        self.database.migrate().await?;

        if self.config.loader.load_on_startup {
            let count = self.loader().load(&self.config.loader.source_path).await?;
            info!(wells = count, "Startup load completed");
        } else {
            info!("Startup load disabled");
        }

        Ok(())
    }

    pub async fn run(&self) -> Result<(), AppError> {
        self.prepare().await?;

        let app = self.create_app();

        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

        info!("Server listening on http://{}", addr);

        let shutdown_coordinator = self.shutdown_coordinator.clone();
        tokio::spawn(async move {
            shutdown_coordinator.wait_for_shutdown_signal().await;
        });

        let mut shutdown_rx = self.shutdown_coordinator.subscribe();
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
                info!("Graceful shutdown initiated");
            })
            .await;

        if let Err(e) = result {
            error!("Server error: {}", e);
            return Err(AppError::Internal(format!("Server error: {}", e)));
        }

        info!("Server shutdown complete");
        Ok(())
    }

    // Creates an application router
    pub fn create_app(&self) -> Router {
        let mut app = Router::new()
            .merge(create_well_routes())
            .merge(create_health_routes())
            .with_state(self.clone());

        if self.config.logging.log_request {
            app = app.layer(axum_middleware::from_fn(request_response_logger));
        }
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{TestServerBuilder, get_json, write_csv};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_prepare_loads_configured_source() {
        let file = write_csv(&[("A1  ", 10.0, 5.0, 2.0), ("A1", 5.0, 5.0, 1.0)]);
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        config.loader.source_path = file.path().display().to_string();

        let server = Server::new(config).await.unwrap();
        server.prepare().await.unwrap();

        let (status, body) = get_json(&server.create_app(), "/data?well=A1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["oil"], 15.0);
    }

    #[tokio::test]
    async fn test_prepare_fails_on_missing_source() {
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        config.loader.source_path = "does/not/exist.xlsx".to_string();

        let server = Server::new(config).await.unwrap();
        let result = server.prepare().await;
        assert!(matches!(
            result,
            Err(AppError::Load(crate::loader::LoadError::SourceRead(_)))
        ));
    }

    #[tokio::test]
    async fn test_prepare_without_startup_load() {
        let mut config = Config::default();
        config.database.url = "sqlite::memory:".to_string();
        config.loader.load_on_startup = false;
        config.loader.source_path = "does/not/exist.xlsx".to_string();

        let server = Server::new(config).await.unwrap();
        server.prepare().await.unwrap();
        assert_eq!(server.database.well_aggregates().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let server = TestServerBuilder::new().build().await;
        let (status, _) = get_json(&server.create_app(), "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
