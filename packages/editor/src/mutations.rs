//! # Part Mutations
//!
//! Every edit a user can make to a session, as a serializable value.
//!
//! ## Render urgency
//!
//! - Text edits (`SetField`, `SetTheme`) are **debounced**: a burst of
//!   keystrokes collapses into one render after a quiet period.
//! - Structural and asset edits render **immediately**.
//! - Selection changes do not render at all.
//!
//! A mutation that turns out to be a no-op (moving the first part up, a
//! cancelled removal) reports [`RenderUrgency::None`] and leaves the
//! version untouched.

use crate::session::PartHandle;
use lander_parts::{AssetRef, FieldInput, FieldPath};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a new part from its template, before the footer
    AddPart { part_type: String },

    RemovePart { part: PartHandle },

    MoveUp { part: PartHandle },

    MoveDown { part: PartHandle },

    /// Show or hide the footer, creating it first if needed
    ToggleFooterVisibility,

    Select { part: PartHandle },

    ClearSelection,

    /// Write raw editor input at a field path
    SetField {
        part: PartHandle,
        path: FieldPath,
        value: FieldInput,
    },

    /// Set or clear an already processed image at a field path
    SetAsset {
        part: PartHandle,
        path: FieldPath,
        asset: Option<AssetRef>,
    },

    /// Append a template item to a list field
    AddItem { part: PartHandle, list: String },

    RemoveItem {
        part: PartHandle,
        list: String,
        index: usize,
    },

    AddPlan { part: PartHandle },

    RemovePlan { part: PartHandle, index: usize },

    /// Append processed images to a gallery, in order
    AddImages {
        part: PartHandle,
        images: Vec<AssetRef>,
    },

    RemoveImage { part: PartHandle, index: usize },

    SetTheme { field: ThemeField, value: String },

    SetThemeAsset {
        target: ThemeAsset,
        asset: Option<AssetRef>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeField {
    Title,
    BackgroundColor,
    TextColor,
    AccentColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeAsset {
    Logo,
    MainVisual,
}

/// How soon a change should reach the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderUrgency {
    None,
    Debounced,
    Immediate,
}

impl Mutation {
    pub fn urgency(&self) -> RenderUrgency {
        match self {
            Mutation::Select { .. } | Mutation::ClearSelection => RenderUrgency::None,
            Mutation::SetField { .. } | Mutation::SetTheme { .. } => RenderUrgency::Debounced,
            _ => RenderUrgency::Immediate,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddPart { .. } => "add_part",
            Mutation::RemovePart { .. } => "remove_part",
            Mutation::MoveUp { .. } => "move_up",
            Mutation::MoveDown { .. } => "move_down",
            Mutation::ToggleFooterVisibility => "toggle_footer_visibility",
            Mutation::Select { .. } => "select",
            Mutation::ClearSelection => "clear_selection",
            Mutation::SetField { .. } => "set_field",
            Mutation::SetAsset { .. } => "set_asset",
            Mutation::AddItem { .. } => "add_item",
            Mutation::RemoveItem { .. } => "remove_item",
            Mutation::AddPlan { .. } => "add_plan",
            Mutation::RemovePlan { .. } => "remove_plan",
            Mutation::AddImages { .. } => "add_images",
            Mutation::RemoveImage { .. } => "remove_image",
            Mutation::SetTheme { .. } => "set_theme",
            Mutation::SetThemeAsset { .. } => "set_theme_asset",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("'{list}' already holds the maximum of {max} entries")]
    ListFull { list: String, max: usize },

    #[error("'{list}' must keep at least {min} entries")]
    ListAtMinimum { list: String, min: usize },

    #[error("Part is a {found}, expected a {expected}")]
    WrongPartType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("A footer already exists")]
    FooterExists,
}

/// Outcome of applying one mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// Session version after the mutation
    pub version: u64,

    pub urgency: RenderUrgency,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lander_parts::PartId;

    #[test]
    fn test_urgency_by_kind() {
        let part = PartHandle::Id(PartId::new("p"));
        assert_eq!(
            Mutation::SetField {
                part: part.clone(),
                path: FieldPath::field("title"),
                value: FieldInput::Text("x".to_string()),
            }
            .urgency(),
            RenderUrgency::Debounced
        );
        assert_eq!(Mutation::MoveUp { part: part.clone() }.urgency(), RenderUrgency::Immediate);
        assert_eq!(Mutation::Select { part }.urgency(), RenderUrgency::None);
        assert_eq!(Mutation::ToggleFooterVisibility.urgency(), RenderUrgency::Immediate);
    }

    #[test]
    fn test_mutation_json_shape() {
        let mutation: Mutation = serde_json::from_str(
            r#"{"SetField": {"part": "abc-3", "path": "items.1.title", "value": "Fast"}}"#,
        )
        .unwrap();

        assert_eq!(
            mutation,
            Mutation::SetField {
                part: PartHandle::Id(PartId::new("abc-3")),
                path: FieldPath::nested("items", 1, "title"),
                value: FieldInput::Text("Fast".to_string()),
            }
        );

        let legacy: Mutation = serde_json::from_str(r#"{"MoveDown": {"part": 2}}"#).unwrap();
        assert_eq!(legacy, Mutation::MoveDown { part: PartHandle::Index(2) });
    }
}
