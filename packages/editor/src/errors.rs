//! Error types for the editor

use crate::session::PartHandle;
use lander_assets::AssetError;
use lander_parts::{CodecError, PathError, SchemaError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Field path error: {0}")]
    Path(#[from] PathError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Part not found: {0}")]
    PartNotFound(PartHandle),

    #[error("The footer cannot be {0}; use the footer visibility toggle instead")]
    ProtectedPart(&'static str),
}

/// A render attempt that did not produce HTML
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Render failed: {0}")]
pub struct RenderError(pub String);
