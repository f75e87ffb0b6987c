//! Liveness handler

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
}

/// GET / - Liveness check
pub async fn home() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "GreenGap backend running",
    })
}
