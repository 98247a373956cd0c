//! # Lander Render Service
//!
//! HTTP front end for the HTML compiler and the export packager.
//!
//! ```text
//! POST /preview      multipart form  → HTML (preview or export mode)
//! POST /export       multipart form  → landing-page.zip
//! GET  /api/schema                   → part registry as JSON
//! POST /api/form     part JSON       → edit form HTML
//! GET  /health                       → "ok"
//! ```
//!
//! See [`request`] for the multipart fields.

pub mod error;
pub mod handlers;
pub mod request;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use lander_assets::IngestOptions;
use lander_parts::page_asset_capacity;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::{AppError, AppResult};
pub use request::RenderRequest;

/// Room for the theme fields and the JSON around the embedded images
const FORM_OVERHEAD: usize = 4 * 1024 * 1024;

/// Uploads a request may carry as files (`logo`, `mainvisual`)
const FILE_UPLOADS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ingest: IngestOptions,
    /// Indent rendered HTML
    pub pretty: bool,
}

impl AppState {
    pub fn new(ingest: IngestOptions, pretty: bool) -> Self {
        Self { ingest, pretty }
    }

    /// Largest request body accepted before the upload limit is even checked.
    ///
    /// The `parts` field embeds every image as a base64 data URI, so the
    /// limit leaves room for a page holding one full part of every type
    /// next to the two file uploads.
    pub fn body_limit(&self) -> usize {
        let per_file = usize::try_from(self.ingest.max_bytes).unwrap_or(usize::MAX);
        let embedded = per_file
            .saturating_mul(page_asset_capacity())
            .saturating_mul(4)
            / 3;
        per_file
            .saturating_mul(FILE_UPLOADS)
            .saturating_add(embedded)
            .saturating_add(FORM_OVERHEAD)
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.body_limit();

    Router::new()
        .route("/preview", post(handlers::preview))
        .route("/export", post(handlers::export))
        .route("/api/schema", get(handlers::schema))
        .route("/api/form", post(handlers::form))
        .route("/health", get(handlers::health))
        .with_state(Arc::new(state))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
