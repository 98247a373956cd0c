//! # Field Paths
//!
//! Generic read/write addressing into a part's nested fields using a dotted
//! path of one to three segments:
//!
//! ```text
//! title                 → scalar field
//! images.2              → element of a list field
//! items.1.title         → field of an item inside a list field
//! ```
//!
//! Only the middle segment is ever an index. The resolver knows nothing about
//! part types; it walks [`Fields`] and [`FieldValue`] structurally. Index
//! bounds are reported as errors rather than checked ahead of time, since
//! editors only generate paths for indices that exist.

use crate::asset_ref::AssetRef;
use crate::error::PathError;
use crate::part::{FieldValue, Fields};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Field(String),
    Element { list: String, index: usize },
    Nested {
        list: String,
        index: usize,
        field: String,
    },
}

impl FieldPath {
    pub fn field(name: impl Into<String>) -> Self {
        FieldPath::Field(name.into())
    }

    pub fn nested(list: impl Into<String>, index: usize, field: impl Into<String>) -> Self {
        FieldPath::Nested {
            list: list.into(),
            index,
            field: field.into(),
        }
    }

    /// Top-level field the path starts at
    pub fn root(&self) -> &str {
        match self {
            FieldPath::Field(name) => name,
            FieldPath::Element { list, .. } | FieldPath::Nested { list, .. } => list,
        }
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        if path.trim().is_empty() {
            return Err(PathError::Empty);
        }

        let segments: Vec<&str> = path.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PathError::FieldNotFound(path.to_string()));
        }

        let parse_index = |segment: &str| {
            segment.parse::<usize>().map_err(|_| PathError::InvalidIndex {
                path: path.to_string(),
                segment: segment.to_string(),
            })
        };

        match segments.as_slice() {
            [field] => Ok(FieldPath::Field(field.to_string())),
            [list, index] => Ok(FieldPath::Element {
                list: list.to_string(),
                index: parse_index(index)?,
            }),
            [list, index, field] => Ok(FieldPath::Nested {
                list: list.to_string(),
                index: parse_index(index)?,
                field: field.to_string(),
            }),
            _ => Err(PathError::TooManySegments(path.to_string())),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Field(name) => write!(f, "{}", name),
            FieldPath::Element { list, index } => write!(f, "{}.{}", list, index),
            FieldPath::Nested { list, index, field } => write!(f, "{}.{}.{}", list, index, field),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Raw editor input for a field, converted to the field's current shape on write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Toggle(bool),
    Text(String),
    Lines(Vec<String>),
}

impl FieldInput {
    /// Convert to a value shaped like `current`
    fn shape_like(self, current: &FieldValue, path: &FieldPath) -> Result<FieldValue, PathError> {
        let mismatch = |expected: &'static str| PathError::TypeMismatch {
            path: path.to_string(),
            expected,
            found: current.kind_name(),
        };

        match (current, self) {
            (FieldValue::Text(_), FieldInput::Text(s)) => Ok(FieldValue::Text(s)),
            (FieldValue::Text(_), FieldInput::Lines(lines)) => Ok(FieldValue::Text(lines.join("\n"))),
            (FieldValue::Toggle(_), FieldInput::Toggle(b)) => Ok(FieldValue::Toggle(b)),
            (FieldValue::Toggle(_), FieldInput::Text(s)) => {
                Ok(FieldValue::Toggle(matches!(s.as_str(), "true" | "on" | "1")))
            }
            (FieldValue::Lines(_), FieldInput::Lines(lines)) => Ok(FieldValue::Lines(lines)),
            (FieldValue::Lines(_), FieldInput::Text(s)) => Ok(FieldValue::Lines(split_lines(&s))),
            (_, FieldInput::Toggle(_)) => Err(mismatch("toggle")),
            (_, FieldInput::Text(_)) => Err(mismatch("text")),
            (_, FieldInput::Lines(_)) => Err(mismatch("lines")),
        }
    }
}

/// Split textarea input into trimmed, non-empty lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the value at `path`
pub fn get(fields: &Fields, path: &FieldPath) -> Result<FieldValue, PathError> {
    match path {
        FieldPath::Field(name) => fields
            .get(name)
            .cloned()
            .ok_or_else(|| PathError::FieldNotFound(name.clone())),

        FieldPath::Element { list, index } => {
            let value = fields
                .get(list)
                .ok_or_else(|| PathError::FieldNotFound(list.clone()))?;
            match value {
                FieldValue::Lines(lines) => lines
                    .get(*index)
                    .map(|s| FieldValue::Text(s.clone()))
                    .ok_or_else(|| out_of_range(list, *index, lines.len())),
                FieldValue::Images(images) => images
                    .get(*index)
                    .map(|a| FieldValue::Asset(Some(a.clone())))
                    .ok_or_else(|| out_of_range(list, *index, images.len())),
                FieldValue::Items(_) => Err(PathError::TypeMismatch {
                    path: path.to_string(),
                    expected: "element",
                    found: "items",
                }),
                _ => Err(PathError::NotAList(list.clone())),
            }
        }

        FieldPath::Nested { list, index, field } => {
            let item = item(fields, list, *index)?;
            get(item, &FieldPath::Field(field.clone()))
        }
    }
}

/// Replace the value at `path`, returning the previous value.
///
/// The new value must have the same shape as the one it replaces; fields
/// that do not already exist are never created.
pub fn set(fields: &mut Fields, path: &FieldPath, value: FieldValue) -> Result<FieldValue, PathError> {
    match path {
        FieldPath::Field(name) => {
            let slot = fields
                .get_mut(name)
                .ok_or_else(|| PathError::FieldNotFound(name.clone()))?;
            if !slot.same_kind(&value) {
                return Err(PathError::TypeMismatch {
                    path: path.to_string(),
                    expected: value.kind_name(),
                    found: slot.kind_name(),
                });
            }
            Ok(std::mem::replace(slot, value))
        }

        FieldPath::Element { list, index } => {
            let slot = fields
                .get_mut(list)
                .ok_or_else(|| PathError::FieldNotFound(list.clone()))?;
            let found = slot.kind_name();
            match (slot, value) {
                (FieldValue::Lines(lines), FieldValue::Text(text)) => {
                    let len = lines.len();
                    let entry = lines
                        .get_mut(*index)
                        .ok_or_else(|| out_of_range(list, *index, len))?;
                    Ok(FieldValue::Text(std::mem::replace(entry, text)))
                }
                (FieldValue::Images(images), FieldValue::Asset(Some(asset))) => {
                    let len = images.len();
                    let entry = images
                        .get_mut(*index)
                        .ok_or_else(|| out_of_range(list, *index, len))?;
                    Ok(FieldValue::Asset(Some(std::mem::replace(entry, asset))))
                }
                (FieldValue::Lines(_) | FieldValue::Images(_) | FieldValue::Items(_), value) => {
                    Err(PathError::TypeMismatch {
                        path: path.to_string(),
                        expected: value.kind_name(),
                        found,
                    })
                }
                _ => Err(PathError::NotAList(list.clone())),
            }
        }

        FieldPath::Nested { list, index, field } => {
            let item = item_mut(fields, list, *index)?;
            set(item, &FieldPath::Field(field.clone()), value)
        }
    }
}

/// Write raw editor input at `path`, shaped like the value already there
pub fn set_input(fields: &mut Fields, path: &FieldPath, input: FieldInput) -> Result<FieldValue, PathError> {
    let current = get(fields, path)?;
    let value = input.shape_like(&current, path)?;
    set(fields, path, value)
}

/// Set or clear an asset field (`image`, `items.0.image`, `images.3`)
pub fn set_asset(
    fields: &mut Fields,
    path: &FieldPath,
    asset: Option<AssetRef>,
) -> Result<FieldValue, PathError> {
    set(fields, path, FieldValue::Asset(asset))
}

pub fn item<'a>(fields: &'a Fields, list: &str, index: usize) -> Result<&'a Fields, PathError> {
    match fields.get(list) {
        Some(FieldValue::Items(items)) => items
            .get(index)
            .ok_or_else(|| out_of_range(list, index, items.len())),
        Some(_) => Err(PathError::NotAList(list.to_string())),
        None => Err(PathError::FieldNotFound(list.to_string())),
    }
}

pub fn item_mut<'a>(fields: &'a mut Fields, list: &str, index: usize) -> Result<&'a mut Fields, PathError> {
    match fields.get_mut(list) {
        Some(FieldValue::Items(items)) => {
            let len = items.len();
            items
                .get_mut(index)
                .ok_or_else(|| out_of_range(list, index, len))
        }
        Some(_) => Err(PathError::NotAList(list.to_string())),
        None => Err(PathError::FieldNotFound(list.to_string())),
    }
}

fn out_of_range(list: &str, index: usize, len: usize) -> PathError {
    PathError::IndexOutOfRange {
        list: list.to_string(),
        index,
        len,
    }
}
