//! `GET /health`: 200 while the database answers `SELECT 1`, 503 otherwise.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    if state.db.health_check().await {
        Ok(Json(json!({ "status": "ok" })))
    } else {
        Err(ApiError::unavailable("Database is not reachable").context("health check failed"))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::test_support::{app, seeded_db, send};
    use crate::AppState;

    #[tokio::test]
    async fn test_health() {
        let (db, _) = seeded_db().await;
        let app = app(AppState::new(db.clone()));

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        db.close().await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["data"]["code"], "UNAVAILABLE");
    }
}
