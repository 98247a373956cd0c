//! # Lander Assets
//!
//! Turns uploaded image bytes into embeddable [`AssetRef`]s.
//!
//! ## Pipeline
//!
//! ```text
//! raw bytes ─→ size ceiling ─→ decode ─→ fit within bounds ─→ lossy re-encode ─→ AssetRef
//!                  │                          (no upscaling)
//!                  └─ too large: rejected, nothing produced
//! ```
//!
//! Oversized input is the only hard failure. If the image cannot be decoded
//! or re-encoded, the original bytes pass through unchanged so an upload is
//! never blocked on a codec problem.
//!
//! Gallery uploads arrive in batches; each file is processed on its own and
//! one bad file does not fail the rest.
//!
//! [`AssetRef`]: lander_parts::AssetRef

mod pipeline;
mod types;

pub use pipeline::{dimensions, ingest, ingest_batch};
pub use types::{BatchItem, IngestOptions, Upload};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("File '{name}' is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { name: String, size: u64, limit: u64 },

    #[error("File '{0}' is empty")]
    Empty(String),
}

pub type Result<T> = std::result::Result<T, AssetError>;
