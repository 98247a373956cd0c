//! # Page Codec
//!
//! Serialized form of a page: `{ "theme": {...}, "parts": [...] }`, where
//! every part record is flat (`id`, `type`, `visible`, then its fields).
//!
//! Decoding is schema driven. Each field the schema knows about is coerced
//! to its declared kind, missing fields fall back to the template, extra
//! fields are ignored. Only syntactic problems are errors; a record with an
//! unknown `type` survives as [`PartEntry::Unsupported`] so the rest of the
//! page still renders.

use crate::asset_ref::AssetRef;
use crate::error::CodecError;
use crate::field_path::split_lines;
use crate::part::{FieldValue, Fields, Page, Part, PartId, PartType, Theme};
use crate::schema::{schema_for, template_for, FieldKind, FieldSpec};
use serde_json::{Map, Value};

/// One decoded part record
#[derive(Debug, Clone, PartialEq)]
pub enum PartEntry {
    Known(Part),
    /// Record whose `type` is outside the catalog
    Unsupported {
        id: Option<PartId>,
        type_name: String,
    },
}

impl PartEntry {
    pub fn as_part(&self) -> Option<&Part> {
        match self {
            PartEntry::Known(part) => Some(part),
            PartEntry::Unsupported { .. } => None,
        }
    }

    pub fn into_part(self) -> Option<Part> {
        match self {
            PartEntry::Known(part) => Some(part),
            PartEntry::Unsupported { .. } => None,
        }
    }
}

impl From<Part> for PartEntry {
    fn from(part: Part) -> Self {
        PartEntry::Known(part)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedPage {
    pub theme: Theme,
    pub entries: Vec<PartEntry>,
}

impl DecodedPage {
    /// Drop unsupported entries, keeping the known parts in order
    pub fn into_page(self) -> Page {
        let parts = self
            .entries
            .into_iter()
            .filter_map(PartEntry::into_part)
            .collect();
        Page::new(self.theme, parts)
    }
}

/// Parse a serialized part list
pub fn parse_part_list(source: &str) -> Result<Vec<PartEntry>, CodecError> {
    let value: Value = serde_json::from_str(source)?;
    decode_part_list(&value)
}

/// Parse a part list on the render boundary, where malformed input means
/// "no parts" instead of a failed request
pub fn parse_part_list_or_empty(source: &str) -> Vec<PartEntry> {
    if source.trim().is_empty() {
        return Vec::new();
    }

    match parse_part_list(source) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("malformed part list, rendering no parts: {}", e);
            Vec::new()
        }
    }
}

pub fn decode_part_list(value: &Value) -> Result<Vec<PartEntry>, CodecError> {
    let records = value.as_array().ok_or(CodecError::NotAList)?;

    Ok(records
        .iter()
        .filter_map(|record| match record.as_object() {
            Some(object) => Some(decode_part(object)),
            None => {
                tracing::warn!("skipping non-object part record: {}", record);
                None
            }
        })
        .collect())
}

pub fn decode_page(source: &str) -> Result<DecodedPage, CodecError> {
    let value: Value = serde_json::from_str(source)?;
    let object = value.as_object().ok_or(CodecError::NotAPage)?;

    let theme = match object.get("theme") {
        Some(theme) if !theme.is_null() => serde_json::from_value(theme.clone())?,
        _ => Theme::default(),
    };

    let entries = match object.get("parts") {
        Some(parts) if !parts.is_null() => decode_part_list(parts)?,
        _ => Vec::new(),
    };

    Ok(DecodedPage { theme, entries })
}

pub fn encode_page(page: &Page) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(page)?)
}

pub fn encode_parts(parts: &[Part]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(parts)?)
}

/// Decode one flat part record
pub fn decode_part(record: &Map<String, Value>) -> PartEntry {
    let id = decode_id(record.get("id"));
    let type_name = record.get("type").and_then(Value::as_str).unwrap_or("");

    let part_type: PartType = match type_name.parse() {
        Ok(part_type) => part_type,
        Err(_) => {
            tracing::warn!("unsupported part type '{}'", type_name);
            return PartEntry::Unsupported {
                id,
                type_name: type_name.to_string(),
            };
        }
    };

    let schema = schema_for(part_type);
    let template = template_for(part_type);
    let fields = coerce_fields(record, schema.fields, &template);
    let visible = record.get("visible").and_then(Value::as_bool).unwrap_or(true);

    PartEntry::Known(Part {
        id,
        part_type,
        visible,
        fields,
    })
}

fn decode_id(value: Option<&Value>) -> Option<PartId> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(PartId::new(s.clone())),
        Value::Number(n) => Some(PartId::new(n.to_string())),
        _ => None,
    }
}

fn coerce_fields(record: &Map<String, Value>, specs: &[FieldSpec], template: &Fields) -> Fields {
    let mut fields = Fields::new();
    for spec in specs {
        let fallback = template
            .get(spec.name)
            .cloned()
            .unwrap_or_else(|| spec.kind.blank());

        let value = match record.get(spec.name) {
            Some(raw) => coerce_value(raw, &spec.kind, template.items(spec.name)).unwrap_or(fallback),
            None => fallback,
        };
        fields.insert(spec.name, value);
    }
    fields
}

/// Coerce a raw JSON value to `kind`; `None` means "use the template value"
fn coerce_value(raw: &Value, kind: &FieldKind, template_items: &[Fields]) -> Option<FieldValue> {
    match kind {
        FieldKind::Text | FieldKind::Multiline | FieldKind::Color | FieldKind::Link => match raw {
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Number(n) => Some(FieldValue::Text(n.to_string())),
            Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
            _ => None,
        },

        FieldKind::Toggle => match raw {
            Value::Bool(b) => Some(FieldValue::Toggle(*b)),
            Value::String(s) => Some(FieldValue::Toggle(s == "true")),
            _ => None,
        },

        FieldKind::Image => Some(FieldValue::Asset(AssetRef::from_json(raw))),

        FieldKind::Images { max } => {
            let images = raw.as_array()?;
            Some(FieldValue::Images(
                images.iter().filter_map(AssetRef::from_json).take(*max).collect(),
            ))
        }

        FieldKind::Lines => match raw {
            Value::Array(values) => Some(FieldValue::Lines(
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            )),
            Value::String(s) => Some(FieldValue::Lines(split_lines(s))),
            _ => None,
        },

        FieldKind::Items { item, min, max } => {
            let records = raw.as_array()?;
            let item_template = template_items
                .first()
                .cloned()
                .unwrap_or_else(|| crate::schema::blank_fields(item));

            let mut items: Vec<Fields> = records
                .iter()
                .filter_map(Value::as_object)
                .take(*max)
                .map(|record| coerce_fields(record, item, &item_template))
                .collect();

            // pad short lists back up to the lower bound from the template
            let mut padding = template_items.iter().skip(items.len());
            while items.len() < *min {
                items.push(padding.next().cloned().unwrap_or_else(|| item_template.clone()));
            }

            Some(FieldValue::Items(items))
        }
    }
}
