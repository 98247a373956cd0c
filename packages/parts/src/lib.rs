//! # Lander Parts
//!
//! Data model for landing pages assembled from a fixed catalog of content
//! blocks ("parts"): the part types and their schemas, the generic field
//! path resolver, embedded asset references and the serialized page codec.

pub mod asset_ref;
pub mod assets;
pub mod codec;
pub mod error;
pub mod field_path;
pub mod id_generator;
pub mod part;
pub mod schema;

pub use asset_ref::{extension_for_mime, mime_for_extension, AssetRef};
pub use assets::{collect_assets, collect_entry_assets, AssetRole, LocatedAsset};
pub use codec::{
    decode_page, decode_part, decode_part_list, encode_page, encode_parts, parse_part_list,
    parse_part_list_or_empty, DecodedPage, PartEntry,
};
pub use error::{AssetRefError, CodecError, PathError, SchemaError};
pub use field_path::{split_lines, FieldInput, FieldPath};
pub use id_generator::IdGenerator;
pub use part::{FieldValue, Fields, Page, Part, PartId, PartType, Theme};
pub use schema::{
    page_asset_capacity, registry, schema_for, template_for, template_named, FieldKind, FieldSpec, PartSchema,
};
