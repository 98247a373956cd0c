//! # Lander Editor
//!
//! Editing engine for landing pages built from parts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parts: schemas, field paths, page codec     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Session + mutations                 │
//! │  - Part list with a protected footer        │
//! │  - Field, list and asset edits              │
//! │  - Debounced / immediate render scheduling  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: page → preview / export HTML │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lander_editor::{EditorPipeline, LocalRenderer, Mutation, RenderScheduler, Session};
//!
//! let scheduler = RenderScheduler::spawn(Arc::new(LocalRenderer::default()), Default::default());
//! let mut pipeline = EditorPipeline::new(Session::new("page"), scheduler);
//!
//! pipeline.apply(Mutation::AddPart { part_type: "hero".to_string() })?;
//! let html = pipeline.preview().html;
//! ```

mod confirm;
mod errors;
mod mutations;
mod pipeline;
mod scheduler;
mod session;

pub use confirm::{AlwaysConfirm, Confirm};
pub use errors::{EditorError, RenderError};
pub use mutations::{Mutation, MutationError, MutationResult, RenderUrgency, ThemeAsset, ThemeField};
pub use pipeline::EditorPipeline;
pub use scheduler::{
    LocalRenderer, PreviewState, RenderBackend, RenderScheduler, SchedulerOptions,
    DEFAULT_QUIET_PERIOD,
};
pub use session::{ImageUploadReport, PartHandle, Removal, Session};
