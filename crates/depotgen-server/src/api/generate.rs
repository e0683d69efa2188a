use axum::{
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use depotgen_core::ManifestRequest;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::ApiError;

/// Ids may arrive as JSON strings or numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum IdField {
    Text(String),
    Number(serde_json::Number),
}

impl IdField {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateRequest {
    pub app_id: Option<IdField>,
    pub depot_id: Option<IdField>,
    pub manifest_id: Option<IdField>,
}

pub(super) async fn generate_manifest(
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected generate payload");
        ApiError::new(req_id.0.clone(), "bad_request", "request body must be a JSON object")
    })?;

    let app_id = body.app_id.map(IdField::into_text);
    let depot_id = body.depot_id.map(IdField::into_text);
    let manifest_id = body.manifest_id.map(IdField::into_text);

    let request = ManifestRequest::validate(
        app_id.as_deref(),
        depot_id.as_deref(),
        manifest_id.as_deref(),
    )
    .map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.to_string()))?;

    let package = depotgen_manifest::build_manifest_package(&request, Utc::now()).map_err(|e| {
        tracing::error!(error = %e, app_id = %request.app_id, "manifest packaging failed");
        ApiError::new(req_id.0.clone(), "internal_error", "failed to generate manifest")
    })?;

    tracing::info!(
        app_id = %request.app_id,
        depot_id = %request.depot_id,
        bytes = package.bytes.len(),
        "manifest package generated"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", package.file_name),
            ),
        ],
        package.bytes,
    )
        .into_response())
}
