use crate::{error::AppError, server::Server, well_service::WellData};
use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
    routing::get,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WellQuery {
    #[serde(default)]
    pub well: Option<String>,
}

/// Create well lookup routes
pub fn create_well_routes() -> Router<Server> {
    Router::new().route("/data", get(get_well_data))
}

/// GET /data?well=<identifier>
async fn get_well_data(
    State(server): State<Server>,
    query: Result<Query<WellQuery>, QueryRejection>,
) -> Result<Json<WellData>, AppError> {
    let Query(params) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    // Only an absent parameter is rejected; a blank one is looked up and misses
    let well = params.well.ok_or_else(|| {
        AppError::BadRequest("Missing required query parameter 'well'".to_string())
    })?;

    let aggregate = server.well_service.get_well_data(&well).await?;
    Ok(Json(WellData::from(&aggregate)))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{TestServerBuilder, get_json};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_well_data() {
        let server = TestServerBuilder::new()
            .with_wells(&[("A1", 15.0, 10.0, 3.0)])
            .build()
            .await;
        let app = server.create_app();

        let (status, body) = get_json(&app, "/data?well=A1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "oil": 15.0, "gas": 10.0, "brine": 3.0 }));
    }

    #[tokio::test]
    async fn test_get_well_data_encoded_whitespace() {
        let server = TestServerBuilder::new()
            .with_wells(&[("A1", 15.0, 10.0, 3.0)])
            .build()
            .await;
        let app = server.create_app();

        let (status, body) = get_json(&app, "/data?well=%20A1%20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["oil"], 15.0);
    }

    #[tokio::test]
    async fn test_unknown_well() {
        let server = TestServerBuilder::new().build().await;
        let app = server.create_app();

        let (status, body) = get_json(&app, "/data?well=B2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Well not found" }));
    }

    #[tokio::test]
    async fn test_missing_well_parameter() {
        let server = TestServerBuilder::new().build().await;
        let app = server.create_app();

        let (status, body) = get_json(&app, "/data").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("well"));
    }

    #[tokio::test]
    async fn test_blank_well_parameter_is_not_found() {
        let server = TestServerBuilder::new()
            .with_wells(&[("A1", 1.0, 1.0, 1.0)])
            .build()
            .await;
        let app = server.create_app();

        for uri in ["/data?well=", "/data?well=%20%20"] {
            let (status, body) = get_json(&app, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body, json!({ "error": "Well not found" }));
        }
    }

    #[tokio::test]
    async fn test_repeated_well_parameter_is_json_bad_request() {
        let server = TestServerBuilder::new()
            .with_wells(&[("A1", 1.0, 1.0, 1.0), ("B2", 1.0, 1.0, 1.0)])
            .build()
            .await;
        let app = server.create_app();

        let (status, body) = get_json(&app, "/data?well=A1&well=B2").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string(), "{body}");
    }
}
