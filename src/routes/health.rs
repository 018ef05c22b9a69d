use crate::server::Server;
use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};
use serde_json::Value;

/// Create health check routes
pub fn create_health_routes() -> Router<Server> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(server): State<Server>) -> (StatusCode, Json<Value>) {
    let health = server.health_service.check_health().await;
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = serde_json::to_value(&health).unwrap_or_else(|e| {
        serde_json::json!({ "status": "unhealthy", "error": e.to_string() })
    });

    (status, Json(body))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{TestServerBuilder, get_json};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_check_basic() {
        let server = TestServerBuilder::new().build().await;
        let app = server.create_app();

        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checks"]["database"]["status"], "healthy");
    }
}
