pub mod export;
pub mod init;
pub mod render;
pub mod schema;
pub mod serve;

pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use schema::schema;
pub use serve::{serve, ServeArgs};

use anyhow::{Context, Result};
use lander_parts::{decode_page, DecodedPage};
use std::path::Path;

/// Read and decode a page file
pub(crate) fn load_page(path: &Path) -> Result<DecodedPage> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read page file {}", path.display()))?;
    let page = decode_page(&source).with_context(|| format!("Invalid page file {}", path.display()))?;

    for entry in &page.entries {
        if let lander_parts::PartEntry::Unsupported { type_name, .. } = entry {
            tracing::warn!("part type '{}' is not supported; rendering a placeholder", type_name);
        }
    }
    Ok(page)
}
