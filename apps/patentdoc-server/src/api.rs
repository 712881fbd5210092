//! API handlers for the conversion server
//!
//! Provides REST endpoints for:
//! - Health checks
//! - Spreadsheet to document conversion

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConvertError;
use crate::ids::require_id;
use crate::workflow::ConvertReport;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "patentdoc-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Conversion request; both fields accept a bare id or a full share link.
#[derive(Debug, Deserialize)]
pub struct ConvertRequest {
    pub sheet: String,
    pub document: String,
}

#[derive(Serialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub report: ConvertReport,
}

/// Handler: POST /api/convert
pub async fn handle_convert(
    State(state): State<AppState>,
    Json(request): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>, ConvertError> {
    let sheet_id = require_id(&request.sheet, "spreadsheet")?;
    let document_id = require_id(&request.document, "document")?;

    let report = state.workflow.convert(&sheet_id, &document_id).await?;
    info!(
        phases = report.phases.len(),
        end_offset = report.end_offset,
        "Converted {} into {}",
        sheet_id,
        document_id
    );

    Ok(Json(ConvertResponse {
        success: true,
        report,
    }))
}
