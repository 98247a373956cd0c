//! Multipart render requests.
//!
//! | field         | kind | meaning                                 |
//! |---------------|------|-----------------------------------------|
//! | `title`       | text | page title                              |
//! | `bgColor`     | text | background colour                       |
//! | `textColor`   | text | text colour                             |
//! | `accentColor` | text | accent colour                           |
//! | `parts`       | text | serialized part list (JSON array)       |
//! | `mode`        | text | `preview` (default) or `export`         |
//! | `logo`        | file | header logo                             |
//! | `mainvisual`  | file | banner above the first part             |
//!
//! A malformed `parts` value renders as an empty page. Unknown fields are
//! ignored.

use crate::error::AppResult;
use axum::extract::Multipart;
use lander_assets::{ingest, IngestOptions, Upload};
use lander_compiler_html::RenderMode;
use lander_parts::{parse_part_list_or_empty, AssetRef, PartEntry, Theme};

#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub theme: Theme,
    pub entries: Vec<PartEntry>,
    pub mode: RenderMode,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            entries: Vec::new(),
            mode: RenderMode::Preview,
        }
    }
}

impl RenderRequest {
    pub async fn from_multipart(mut multipart: Multipart, options: &IngestOptions) -> AppResult<Self> {
        let mut request = RenderRequest::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);

            match name.as_str() {
                "logo" | "mainvisual" => {
                    let bytes = field.bytes().await?;
                    // browsers send an empty part when no file was chosen
                    if bytes.is_empty() {
                        continue;
                    }
                    let upload = Upload::new(file_name.unwrap_or_else(|| name.clone()), bytes.to_vec());
                    let asset = ingest_upload(upload, options).await?;
                    if name == "logo" {
                        request.theme.logo = Some(asset);
                    } else {
                        request.theme.main_visual = Some(asset);
                    }
                }
                "title" | "bgColor" | "textColor" | "accentColor" | "parts" | "mode" => {
                    let value = field.text().await?;
                    request.apply_text(&name, value)?;
                }
                other => {
                    tracing::debug!("ignoring form field '{}'", other);
                }
            }
        }

        Ok(request)
    }

    fn apply_text(&mut self, name: &str, value: String) -> AppResult<()> {
        let trimmed = value.trim();
        match name {
            "parts" => self.entries = parse_part_list_or_empty(&value),
            "mode" if !trimmed.is_empty() => self.mode = trimmed.parse()?,
            _ if trimmed.is_empty() => {}
            "title" => self.theme.title = value,
            "bgColor" => self.theme.background_color = trimmed.to_string(),
            "textColor" => self.theme.text_color = trimmed.to_string(),
            "accentColor" => self.theme.accent_color = trimmed.to_string(),
            _ => {}
        }
        Ok(())
    }
}

/// Image work runs off the async workers
async fn ingest_upload(upload: Upload, options: &IngestOptions) -> AppResult<AssetRef> {
    let options = *options;
    let asset = tokio::task::spawn_blocking(move || ingest(&upload, &options))
        .await
        .map_err(|e| crate::error::AppError::Internal(e.to_string()))??;
    Ok(asset)
}
