//! # Edit Session
//!
//! The whole editing state of one page: the ordered part list, the theme,
//! the current selection and a version counter. A session is created when
//! editing starts and dropped when it ends; nothing is persisted.
//!
//! ## Part list invariants
//!
//! - Exactly one footer exists and it is always the last part. A session
//!   starts with a default footer, and loading a page repairs it.
//! - New parts go immediately before the footer.
//! - The footer cannot be removed or moved. Hiding it goes through
//!   [`Session::toggle_footer_visibility`]; a hidden footer keeps its place.
//! - Item lists stay within their schema bounds (pricing: 1 to 4 plans).
//!
//! Rejected operations return an error and leave the session unchanged.

use crate::confirm::{AlwaysConfirm, Confirm};
use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationError, MutationResult, RenderUrgency, ThemeAsset, ThemeField};
use lander_assets::{ingest, ingest_batch, IngestOptions, Upload};
use lander_parts::field_path::{self, FieldInput, FieldPath};
use lander_parts::schema::template_named;
use lander_parts::{
    encode_page, schema_for, template_for, AssetRef, FieldKind, FieldValue, IdGenerator, Page,
    Part, PartId, PartType, PathError, SchemaError, Theme,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a part: by id, or by position for legacy parts without one
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartHandle {
    Id(PartId),
    Index(usize),
}

impl fmt::Display for PartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartHandle::Id(id) => write!(f, "{}", id),
            PartHandle::Index(index) => write!(f, "#{}", index),
        }
    }
}

impl From<PartId> for PartHandle {
    fn from(id: PartId) -> Self {
        PartHandle::Id(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    Removed(Part),
    /// The confirmation collaborator declined
    Cancelled,
}

/// Per-file result of a gallery upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUploadReport {
    pub added: usize,
    /// `(file name, reason)` for every file that was not added
    pub failures: Vec<(String, String)>,
}

pub struct Session {
    id: String,
    ids: IdGenerator,
    parts: Vec<Part>,
    theme: Theme,
    selection: Option<PartHandle>,
    version: u64,
    confirm: Box<dyn Confirm>,
    ingest_options: IngestOptions,
}

impl Session {
    /// Fresh session holding only the default footer
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let mut session = Self {
            ids: IdGenerator::new(&id),
            id,
            parts: Vec::new(),
            theme: Theme::default(),
            selection: None,
            version: 0,
            confirm: Box::new(AlwaysConfirm),
            ingest_options: IngestOptions::default(),
        };
        session.ensure_footer();
        session
    }

    pub fn from_page(id: impl Into<String>, page: Page) -> Self {
        let mut session = Self::new(id);
        session.load(page);
        session
    }

    pub fn with_confirm(mut self, confirm: impl Confirm + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    pub fn with_ingest_options(mut self, options: IngestOptions) -> Self {
        self.ingest_options = options;
        self
    }

    /// Replace the session contents, repairing footer placement
    pub fn load(&mut self, page: Page) {
        let Page { theme, parts } = page;

        let mut footer = None;
        let mut body = Vec::with_capacity(parts.len());
        for part in parts {
            if !part.is_footer() {
                body.push(part);
            } else if footer.is_none() {
                footer = Some(part);
            } else {
                tracing::warn!("dropping extra footer {:?}", part.id);
            }
        }
        body.extend(footer);

        self.parts = body;
        self.theme = theme;
        self.selection = None;
        self.ensure_footer();
        self.touch();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn ingest_options(&self) -> &IngestOptions {
        &self.ingest_options
    }

    /// Copy of the current page for rendering
    pub fn snapshot(&self) -> Page {
        Page::new(self.theme.clone(), self.parts.clone())
    }

    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(encode_page(&self.snapshot())?)
    }

    /// Apply a mutation and report how urgently it should be rendered
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let before = self.version;
        let urgency = mutation.urgency();
        let name = mutation.name();

        match mutation {
            Mutation::AddPart { part_type } => {
                self.add(&part_type)?;
            }
            Mutation::RemovePart { part } => {
                self.remove(&part)?;
            }
            Mutation::MoveUp { part } => {
                self.move_up(&part)?;
            }
            Mutation::MoveDown { part } => {
                self.move_down(&part)?;
            }
            Mutation::ToggleFooterVisibility => {
                self.toggle_footer_visibility();
            }
            Mutation::Select { part } => self.select(&part)?,
            Mutation::ClearSelection => self.clear_selection(),
            Mutation::SetField { part, path, value } => {
                self.set_field(&part, &path, value)?;
            }
            Mutation::SetAsset { part, path, asset } => {
                self.set_asset(&part, &path, asset)?;
            }
            Mutation::AddItem { part, list } => {
                self.add_item(&part, &list)?;
            }
            Mutation::RemoveItem { part, list, index } => self.remove_item(&part, &list, index)?,
            Mutation::AddPlan { part } => {
                self.add_plan(&part)?;
            }
            Mutation::RemovePlan { part, index } => self.remove_plan(&part, index)?,
            Mutation::AddImages { part, images } => self.add_images(&part, images)?,
            Mutation::RemoveImage { part, index } => self.remove_image(&part, index)?,
            Mutation::SetTheme { field, value } => self.set_theme(field, value),
            Mutation::SetThemeAsset { target, asset } => self.set_theme_asset(target, asset),
        }

        let changed = self.version != before;
        if changed {
            tracing::debug!(mutation = name, version = self.version, "applied mutation");
        }

        Ok(MutationResult {
            version: self.version,
            urgency: if changed { urgency } else { RenderUrgency::None },
        })
    }

    // -- Part list -------------------------------------------------------

    /// Add a part by type name. Unknown names are rejected without change.
    pub fn add(&mut self, type_name: &str) -> Result<PartId, EditorError> {
        match template_named(type_name) {
            Ok((part_type, fields)) => self.insert_part(part_type, fields),
            Err(e) => {
                tracing::warn!("not adding part: {}", e);
                Err(e.into())
            }
        }
    }

    pub fn add_part(&mut self, part_type: PartType) -> Result<PartId, EditorError> {
        self.insert_part(part_type, template_for(part_type))
    }

    fn insert_part(
        &mut self,
        part_type: PartType,
        fields: lander_parts::Fields,
    ) -> Result<PartId, EditorError> {
        let footer = self.footer_index();
        if part_type.is_footer() && footer.is_some() {
            return Err(MutationError::FooterExists.into());
        }

        let id = self.fresh_id();
        let index = match footer {
            Some(footer) if !part_type.is_footer() => footer,
            _ => self.parts.len(),
        };
        self.parts
            .insert(index, Part::new(id.clone(), part_type, fields));
        self.remap_positional_selection(|i| Some(if i >= index { i + 1 } else { i }));
        self.selection = Some(PartHandle::Id(id.clone()));
        self.touch();

        tracing::debug!("added {} part {} at {}", part_type, id, index);
        Ok(id)
    }

    /// Remove a part by identity after confirmation. The footer is protected.
    pub fn remove(&mut self, handle: &PartHandle) -> Result<Removal, EditorError> {
        let index = self.resolve(handle)?;
        if self.parts[index].is_footer() {
            tracing::warn!("refusing to remove the footer");
            return Err(EditorError::ProtectedPart("removed"));
        }
        if !self.confirm.confirm_remove(&self.parts[index]) {
            tracing::debug!("removal of {} cancelled", handle);
            return Ok(Removal::Cancelled);
        }

        let removed_handle = self.handle_at(index);
        let part = self.parts.remove(index);
        if self.selection.as_ref() == Some(&removed_handle) {
            self.selection = None;
        } else {
            self.remap_positional_selection(|i| Some(if i > index { i - 1 } else { i }));
        }
        self.touch();

        Ok(Removal::Removed(part))
    }

    /// Swap with the previous part; `false` when already first
    pub fn move_up(&mut self, handle: &PartHandle) -> Result<bool, EditorError> {
        let index = self.movable_index(handle)?;
        if index == 0 {
            return Ok(false);
        }
        self.swap(index - 1, index);
        Ok(true)
    }

    /// Swap with the next part; `false` when already last before the footer
    pub fn move_down(&mut self, handle: &PartHandle) -> Result<bool, EditorError> {
        let index = self.movable_index(handle)?;
        let next = index + 1;
        match self.parts.get(next) {
            Some(part) if !part.is_footer() => {
                self.swap(index, next);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Flip footer visibility, creating a default footer first if missing.
    /// Returns the new visibility.
    pub fn toggle_footer_visibility(&mut self) -> bool {
        self.ensure_footer();
        let visible = match self.parts.iter_mut().find(|p| p.is_footer()) {
            Some(footer) => {
                footer.visible = !footer.visible;
                footer.visible
            }
            None => false,
        };
        self.touch();
        visible
    }

    // -- Selection -------------------------------------------------------

    pub fn select(&mut self, handle: &PartHandle) -> Result<(), EditorError> {
        let index = self.resolve(handle)?;
        self.selection = Some(self.handle_at(index));
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// The part currently under edit
    pub fn current_selection(&self) -> Option<&Part> {
        let handle = self.selection.as_ref()?;
        let index = self.resolve(handle).ok()?;
        self.parts.get(index)
    }

    // -- Fields ----------------------------------------------------------

    /// Write editor input at a field path, returning the previous value
    pub fn set_field(
        &mut self,
        handle: &PartHandle,
        path: &FieldPath,
        input: FieldInput,
    ) -> Result<FieldValue, EditorError> {
        let index = self.resolve(handle)?;
        let previous = field_path::set_input(&mut self.parts[index].fields, path, input)?;
        self.touch();
        Ok(previous)
    }

    pub fn set_asset(
        &mut self,
        handle: &PartHandle,
        path: &FieldPath,
        asset: Option<AssetRef>,
    ) -> Result<(), EditorError> {
        let index = self.resolve(handle)?;
        field_path::set_asset(&mut self.parts[index].fields, path, asset)?;
        self.touch();
        Ok(())
    }

    /// Ingest an upload and store it at `path`. Oversized files are rejected
    /// before anything changes.
    pub fn upload_asset(
        &mut self,
        handle: &PartHandle,
        path: &FieldPath,
        upload: &Upload,
    ) -> Result<MutationResult, EditorError> {
        self.resolve(handle)?;
        let asset = ingest(upload, &self.ingest_options)?;
        self.apply(Mutation::SetAsset {
            part: handle.clone(),
            path: path.clone(),
            asset: Some(asset),
        })
    }

    /// Append a template item to a list field; returns the new item's index
    pub fn add_item(&mut self, handle: &PartHandle, list: &str) -> Result<usize, EditorError> {
        let index = self.resolve(handle)?;
        let part = &mut self.parts[index];
        let schema = schema_for(part.part_type);
        let (_, max) = schema.list_bounds(list).ok_or_else(|| SchemaError::UnknownList {
            part_type: part.part_type.to_string(),
            field: list.to_string(),
        })?;
        let item = schema.new_item(list)?;

        let items = match part.fields.get_mut(list) {
            Some(FieldValue::Items(items)) => items,
            _ => return Err(PathError::NotAList(list.to_string()).into()),
        };
        if items.len() >= max {
            return Err(MutationError::ListFull {
                list: list.to_string(),
                max,
            }
            .into());
        }
        items.push(item);
        let added = items.len() - 1;
        self.touch();
        Ok(added)
    }

    pub fn remove_item(
        &mut self,
        handle: &PartHandle,
        list: &str,
        item: usize,
    ) -> Result<(), EditorError> {
        let index = self.resolve(handle)?;
        let part = &mut self.parts[index];
        let (min, _) = schema_for(part.part_type)
            .list_bounds(list)
            .ok_or_else(|| SchemaError::UnknownList {
                part_type: part.part_type.to_string(),
                field: list.to_string(),
            })?;

        let items = match part.fields.get_mut(list) {
            Some(FieldValue::Items(items)) => items,
            _ => return Err(PathError::NotAList(list.to_string()).into()),
        };
        if item >= items.len() {
            return Err(PathError::IndexOutOfRange {
                list: list.to_string(),
                index: item,
                len: items.len(),
            }
            .into());
        }
        if items.len() <= min {
            return Err(MutationError::ListAtMinimum {
                list: list.to_string(),
                min,
            }
            .into());
        }
        items.remove(item);
        self.touch();
        Ok(())
    }

    pub fn add_plan(&mut self, handle: &PartHandle) -> Result<usize, EditorError> {
        self.expect_type(handle, PartType::Pricing)?;
        self.add_item(handle, "plans")
    }

    pub fn remove_plan(&mut self, handle: &PartHandle, plan: usize) -> Result<(), EditorError> {
        self.expect_type(handle, PartType::Pricing)?;
        self.remove_item(handle, "plans", plan)
    }

    /// Append processed images in order. Rejected as a whole if they do not fit.
    pub fn add_images(&mut self, handle: &PartHandle, images: Vec<AssetRef>) -> Result<(), EditorError> {
        let index = self.resolve(handle)?;
        let (list, max) = self.image_list(index)?;
        let current = match self.parts[index].fields.get_mut(list) {
            Some(FieldValue::Images(current)) => current,
            _ => return Err(PathError::NotAList(list.to_string()).into()),
        };
        if current.len() + images.len() > max {
            return Err(MutationError::ListFull {
                list: list.to_string(),
                max,
            }
            .into());
        }
        if images.is_empty() {
            return Ok(());
        }
        current.extend(images);
        self.touch();
        Ok(())
    }

    pub fn remove_image(&mut self, handle: &PartHandle, image: usize) -> Result<(), EditorError> {
        let index = self.resolve(handle)?;
        let (list, _) = self.image_list(index)?;
        let current = match self.parts[index].fields.get_mut(list) {
            Some(FieldValue::Images(current)) => current,
            _ => return Err(PathError::NotAList(list.to_string()).into()),
        };
        if image >= current.len() {
            return Err(PathError::IndexOutOfRange {
                list: list.to_string(),
                index: image,
                len: current.len(),
            }
            .into());
        }
        current.remove(image);
        self.touch();
        Ok(())
    }

    /// Ingest a batch of gallery uploads. Each file succeeds or fails on its
    /// own; successes are appended in batch order while space remains.
    pub fn upload_images(
        &mut self,
        handle: &PartHandle,
        uploads: &[Upload],
    ) -> Result<(MutationResult, ImageUploadReport), EditorError> {
        let index = self.resolve(handle)?;
        let (list, max) = self.image_list(index)?;
        let mut room = max.saturating_sub(self.parts[index].fields.images(list).len());

        let mut report = ImageUploadReport::default();
        let mut accepted = Vec::new();
        for item in ingest_batch(uploads, &self.ingest_options) {
            match item.result {
                Ok(asset) if room > 0 => {
                    room -= 1;
                    accepted.push(asset);
                }
                Ok(_) => report
                    .failures
                    .push((item.name, format!("gallery is full ({} images)", max))),
                Err(e) => report.failures.push((item.name, e.to_string())),
            }
        }
        for (name, reason) in &report.failures {
            tracing::warn!("gallery upload '{}' skipped: {}", name, reason);
        }

        report.added = accepted.len();
        let result = self.apply(Mutation::AddImages {
            part: handle.clone(),
            images: accepted,
        })?;
        Ok((result, report))
    }

    // -- Theme -----------------------------------------------------------

    pub fn set_theme(&mut self, field: ThemeField, value: String) {
        let slot = match field {
            ThemeField::Title => &mut self.theme.title,
            ThemeField::BackgroundColor => &mut self.theme.background_color,
            ThemeField::TextColor => &mut self.theme.text_color,
            ThemeField::AccentColor => &mut self.theme.accent_color,
        };
        *slot = value;
        self.touch();
    }

    pub fn set_theme_asset(&mut self, target: ThemeAsset, asset: Option<AssetRef>) {
        match target {
            ThemeAsset::Logo => self.theme.logo = asset,
            ThemeAsset::MainVisual => self.theme.main_visual = asset,
        }
        self.touch();
    }

    pub fn upload_theme_asset(
        &mut self,
        target: ThemeAsset,
        upload: &Upload,
    ) -> Result<MutationResult, EditorError> {
        let asset = ingest(upload, &self.ingest_options)?;
        self.apply(Mutation::SetThemeAsset {
            target,
            asset: Some(asset),
        })
    }

    // -- Helpers ---------------------------------------------------------

    /// Position of the part a handle refers to
    pub fn resolve(&self, handle: &PartHandle) -> Result<usize, EditorError> {
        let found = match handle {
            PartHandle::Id(id) => self.parts.iter().position(|p| p.id.as_ref() == Some(id)),
            PartHandle::Index(index) => (*index < self.parts.len()).then_some(*index),
        };
        found.ok_or_else(|| EditorError::PartNotFound(handle.clone()))
    }

    pub fn part(&self, handle: &PartHandle) -> Result<&Part, EditorError> {
        let index = self.resolve(handle)?;
        Ok(&self.parts[index])
    }

    fn handle_at(&self, index: usize) -> PartHandle {
        match &self.parts[index].id {
            Some(id) => PartHandle::Id(id.clone()),
            None => PartHandle::Index(index),
        }
    }

    fn movable_index(&self, handle: &PartHandle) -> Result<usize, EditorError> {
        let index = self.resolve(handle)?;
        if self.parts[index].is_footer() {
            tracing::warn!("refusing to move the footer");
            return Err(EditorError::ProtectedPart("moved"));
        }
        Ok(index)
    }

    fn expect_type(&self, handle: &PartHandle, expected: PartType) -> Result<(), EditorError> {
        let found = self.part(handle)?.part_type;
        if found != expected {
            return Err(MutationError::WrongPartType {
                expected: expected.as_str(),
                found: found.as_str(),
            }
            .into());
        }
        Ok(())
    }

    /// Name and capacity of the part's multi-image field
    fn image_list(&self, index: usize) -> Result<(&'static str, usize), EditorError> {
        let part_type = self.parts[index].part_type;
        schema_for(part_type)
            .fields
            .iter()
            .find_map(|spec| match spec.kind {
                FieldKind::Images { max } => Some((spec.name, max)),
                _ => None,
            })
            .ok_or_else(|| {
                MutationError::WrongPartType {
                    expected: PartType::Gallery.as_str(),
                    found: part_type.as_str(),
                }
                .into()
            })
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.parts.swap(a, b);
        self.remap_positional_selection(|i| {
            Some(if i == a {
                b
            } else if i == b {
                a
            } else {
                i
            })
        });
        self.touch();
    }

    /// Keep an index-based selection pointing at the same part
    fn remap_positional_selection(&mut self, remap: impl Fn(usize) -> Option<usize>) {
        if let Some(PartHandle::Index(index)) = self.selection {
            self.selection = remap(index).map(PartHandle::Index);
        }
    }

    fn footer_index(&self) -> Option<usize> {
        self.parts.iter().position(Part::is_footer)
    }

    fn ensure_footer(&mut self) {
        if self.footer_index().is_none() {
            let id = self.fresh_id();
            self.parts
                .push(Part::new(id, PartType::Footer, template_for(PartType::Footer)));
        }
    }

    /// Next generated id not already carried by a loaded part
    fn fresh_id(&mut self) -> PartId {
        loop {
            let id = self.ids.next_id();
            if !self.parts.iter().any(|p| p.id.as_ref() == Some(&id)) {
                return id;
            }
        }
    }

    fn touch(&mut self) {
        self.version += 1;
    }
}
