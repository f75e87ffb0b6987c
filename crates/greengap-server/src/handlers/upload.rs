//! Dataset upload handler

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use super::analysis::advise;
use crate::{AppError, AppState, MAX_UPLOAD_SIZE};
use greengap_core::{dataset_series, format_dashboard, import_dataset, Dashboard};

/// Dashboard for an uploaded dataset plus its row count
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub rows: usize,
    #[serde(flatten)]
    pub dashboard: Dashboard,
}

/// POST /api/upload - Analyze an uploaded CSV or JSON dataset
///
/// Expects multipart form with:
/// - file: the dataset (CSV with header row, or JSON array of rows)
pub async fn upload_dataset(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(&format!("Failed to read form field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        filename = field.file_name().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|_| AppError::bad_request("Failed to read file data"))?;

        if bytes.len() > MAX_UPLOAD_SIZE {
            return Err(AppError::bad_request(&format!(
                "File too large. Maximum size is {} MB",
                MAX_UPLOAD_SIZE / 1024 / 1024
            )));
        }

        file_data = Some(bytes.to_vec());
    }

    let file_data = file_data.ok_or_else(|| AppError::bad_request("Missing file field"))?;

    upload_dataset_core(&state, &file_data, filename.as_deref()).await
}

/// Core upload logic - separated from multipart parsing for testability
pub async fn upload_dataset_core(
    state: &AppState,
    file_data: &[u8],
    filename: Option<&str>,
) -> Result<Json<UploadResponse>, AppError> {
    let rows = import_dataset(file_data, filename)?;
    let series = dataset_series(&rows)?;

    let mut report = state.pipeline.run(&series);
    advise(state, &mut report).await;

    info!(
        filename = filename.unwrap_or("<unnamed>"),
        rows = rows.len(),
        level = %report.rebound.rebound_level,
        "Analyzed uploaded dataset"
    );

    Ok(Json(UploadResponse {
        rows: rows.len(),
        dashboard: format_dashboard(&report),
    }))
}
