use crate::error::{AppError, AppResult};
use crate::request::RenderRequest;
use crate::AppState;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use lander_bundle::{archive_bytes, ExportPackage, PackageOptions};
use lander_compiler_html::{compile_entries, compile_part_form, CompileOptions};
use lander_parts::{decode_part, registry, PartEntry, PartSchema};
use std::sync::Arc;
use tracing::instrument;

pub const ARCHIVE_NAME: &str = "landing-page.zip";

#[instrument(skip_all)]
pub async fn preview(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> AppResult<Html<String>> {
    let request = RenderRequest::from_multipart(multipart, &state.ingest).await?;
    let options = CompileOptions::for_mode(request.mode).with_pretty(state.pretty);

    tracing::debug!(
        mode = %request.mode,
        parts = request.entries.len(),
        "rendering preview"
    );
    Ok(Html(compile_entries(&request.theme, &request.entries, &options)))
}

#[instrument(skip_all)]
pub async fn export(State(state): State<Arc<AppState>>, multipart: Multipart) -> AppResult<Response> {
    let request = RenderRequest::from_multipart(multipart, &state.ingest).await?;
    let options = PackageOptions {
        pretty: state.pretty,
    };

    let archive = tokio::task::spawn_blocking(move || {
        let package = ExportPackage::from_entries(&request.theme, &request.entries, &options);
        archive_bytes(package.entries())
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    tracing::info!(bytes = archive.len(), "exported archive");
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", ARCHIVE_NAME),
            ),
        ],
        archive,
    )
        .into_response())
}

pub async fn schema() -> Json<Vec<&'static PartSchema>> {
    Json(registry().collect())
}

/// Edit form for one serialized part record
#[instrument(skip_all)]
pub async fn form(Json(record): Json<serde_json::Value>) -> AppResult<Html<String>> {
    let record = record
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Expected a part object".to_string()))?;

    match decode_part(record) {
        PartEntry::Known(part) => Ok(Html(compile_part_form(&part, &CompileOptions::default()))),
        PartEntry::Unsupported { type_name, .. } => Err(AppError::BadRequest(format!(
            "Unknown part type: {}",
            type_name
        ))),
    }
}

pub async fn health() -> &'static str {
    "ok"
}
