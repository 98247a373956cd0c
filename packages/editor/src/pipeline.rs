//! # Editing Pipeline
//!
//! Couples a [`Session`] with a [`RenderScheduler`]: every applied mutation
//! forwards a snapshot of the page to the scheduler with the mutation's
//! render urgency.

use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationResult, ThemeAsset};
use crate::scheduler::{PreviewState, RenderScheduler};
use crate::session::{ImageUploadReport, PartHandle, Session};
use lander_assets::Upload;
use lander_parts::FieldPath;
use tokio::sync::watch;

pub struct EditorPipeline {
    session: Session,
    scheduler: RenderScheduler,
}

impl EditorPipeline {
    /// Create the pipeline and render the initial page
    pub fn new(session: Session, scheduler: RenderScheduler) -> Self {
        let pipeline = Self { session, scheduler };
        pipeline.refresh();
        pipeline
    }

    /// Apply a mutation and schedule the preview update it calls for
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.session.apply(mutation)?;
        self.schedule(result);
        Ok(result)
    }

    pub fn upload_asset(
        &mut self,
        part: &PartHandle,
        path: &FieldPath,
        upload: &Upload,
    ) -> Result<MutationResult, EditorError> {
        let result = self.session.upload_asset(part, path, upload)?;
        self.schedule(result);
        Ok(result)
    }

    pub fn upload_images(
        &mut self,
        part: &PartHandle,
        uploads: &[Upload],
    ) -> Result<ImageUploadReport, EditorError> {
        let (result, report) = self.session.upload_images(part, uploads)?;
        self.schedule(result);
        Ok(report)
    }

    pub fn upload_theme_asset(
        &mut self,
        target: ThemeAsset,
        upload: &Upload,
    ) -> Result<MutationResult, EditorError> {
        let result = self.session.upload_theme_asset(target, upload)?;
        self.schedule(result);
        Ok(result)
    }

    /// Full re-render of the current page
    pub fn refresh(&self) {
        self.scheduler.render_now(self.session.snapshot());
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn preview(&self) -> PreviewState {
        self.scheduler.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewState> {
        self.scheduler.subscribe()
    }

    fn schedule(&self, result: MutationResult) {
        self.scheduler
            .schedule(self.session.snapshot(), result.urgency);
    }
}
