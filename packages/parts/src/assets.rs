//! Deterministic locations of every embedded asset on a page.
//!
//! The HTML compiler uses these to link packaged images, and the bundler
//! uses the same walk to decide which bytes go where in the archive, so the
//! two always agree on names.

use crate::asset_ref::AssetRef;
use crate::codec::PartEntry;
use crate::part::{FieldValue, Part, Theme};
use crate::schema::{schema_for, FieldKind};

/// Role an asset plays on the page, keyed by part index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetRole {
    Logo,
    MainVisual,
    /// The part's own `image` field
    PartImage { part: usize },
    /// `image` field of item `item` in one of the part's lists
    ItemImage { part: usize, item: usize },
    /// Element `index` of a gallery's `images` list
    GalleryImage { part: usize, index: usize },
}

impl AssetRole {
    /// Index of the owning part; `None` for theme assets
    pub fn part_index(&self) -> Option<usize> {
        match self {
            AssetRole::Logo | AssetRole::MainVisual => None,
            AssetRole::PartImage { part }
            | AssetRole::ItemImage { part, .. }
            | AssetRole::GalleryImage { part, .. } => Some(*part),
        }
    }

    /// Path inside the export archive, e.g. `images/gallery-2-0.jpg`
    pub fn archive_path(&self, extension: &str) -> String {
        match self {
            AssetRole::Logo => format!("images/logo.{}", extension),
            AssetRole::MainVisual => format!("images/mainvisual-0.{}", extension),
            AssetRole::PartImage { part } => format!("images/part-{}.{}", part, extension),
            AssetRole::ItemImage { part, item } => {
                format!("images/part-{}-item-{}.{}", part, item, extension)
            }
            AssetRole::GalleryImage { part, index } => {
                format!("images/gallery-{}-{}.{}", part, index, extension)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocatedAsset<'a> {
    pub role: AssetRole,
    pub asset: &'a AssetRef,
}

impl LocatedAsset<'_> {
    pub fn archive_path(&self) -> String {
        self.role.archive_path(self.asset.extension())
    }
}

/// Every asset on the page: theme assets first, then parts in list order,
/// each part's assets in field order.
pub fn collect_assets<'a>(theme: &'a Theme, parts: &'a [Part]) -> Vec<LocatedAsset<'a>> {
    let mut located = theme_assets(theme);
    for (part_index, part) in parts.iter().enumerate() {
        collect_part_assets(part_index, part, &mut located);
    }
    located
}

/// Same walk over decoded entries. Unsupported entries keep their index
/// but carry no assets.
pub fn collect_entry_assets<'a>(theme: &'a Theme, entries: &'a [PartEntry]) -> Vec<LocatedAsset<'a>> {
    let mut located = theme_assets(theme);
    for (part_index, entry) in entries.iter().enumerate() {
        if let Some(part) = entry.as_part() {
            collect_part_assets(part_index, part, &mut located);
        }
    }
    located
}

fn theme_assets(theme: &Theme) -> Vec<LocatedAsset<'_>> {
    let mut located = Vec::new();
    if let Some(asset) = &theme.logo {
        located.push(LocatedAsset {
            role: AssetRole::Logo,
            asset,
        });
    }
    if let Some(asset) = &theme.main_visual {
        located.push(LocatedAsset {
            role: AssetRole::MainVisual,
            asset,
        });
    }
    located
}

fn collect_part_assets<'a>(part_index: usize, part: &'a Part, located: &mut Vec<LocatedAsset<'a>>) {
    for spec in schema_for(part.part_type).fields {
        match (&spec.kind, part.fields.get(spec.name)) {
            (FieldKind::Image, Some(FieldValue::Asset(Some(asset)))) => {
                located.push(LocatedAsset {
                    role: AssetRole::PartImage { part: part_index },
                    asset,
                });
            }
            (FieldKind::Images { .. }, Some(FieldValue::Images(images))) => {
                for (index, asset) in images.iter().enumerate() {
                    located.push(LocatedAsset {
                        role: AssetRole::GalleryImage {
                            part: part_index,
                            index,
                        },
                        asset,
                    });
                }
            }
            (FieldKind::Items { item, .. }, Some(FieldValue::Items(items))) => {
                let image_fields = item.iter().filter(|f| matches!(f.kind, FieldKind::Image));
                for image_field in image_fields {
                    for (item_index, fields) in items.iter().enumerate() {
                        if let Some(asset) = fields.asset(image_field.name) {
                            located.push(LocatedAsset {
                                role: AssetRole::ItemImage {
                                    part: part_index,
                                    item: item_index,
                                },
                                asset,
                            });
                        }
                    }
                }
            }
            _ => {}
        }
    }
}
