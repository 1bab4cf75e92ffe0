//! Liveness for load balancers: the database must answer, and the dashboard
//! cache size is reported alongside.

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use std::time::Duration;

use crate::server::app::AxumAppState;

const DATABASE_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseCheck,
    cached_entries: usize,
}

#[derive(Serialize)]
pub struct DatabaseCheck {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl DatabaseCheck {
    fn failed(error: String) -> Self {
        Self {
            status: "error",
            error: Some(error),
        }
    }
}

async fn ping_database(state: &AxumAppState) -> DatabaseCheck {
    let ping = sqlx::query("SELECT 1").execute(&state.deps.db_pool);
    match tokio::time::timeout(DATABASE_PING_TIMEOUT, ping).await {
        Ok(Ok(_)) => DatabaseCheck {
            status: "ok",
            error: None,
        },
        Ok(Err(e)) => DatabaseCheck::failed(e.to_string()),
        Err(_) => DatabaseCheck::failed(format!(
            "no answer within {}s",
            DATABASE_PING_TIMEOUT.as_secs()
        )),
    }
}

/// `GET /health`: 200 while the database answers, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = ping_database(&state).await;
    let cached_entries = state.deps.dashboard_cache.len().await;

    let (code, status) = if database.error.is_none() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            cached_entries,
        }),
    )
}
