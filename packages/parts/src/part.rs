use crate::asset_ref::{lenient_asset, AssetRef};
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Closed set of content block kinds a page can be assembled from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartType {
    Hero,
    Features,
    Pricing,
    Contact,
    Testimonial,
    About,
    Gallery,
    Blog,
    Faq,
    Footer,
}

impl PartType {
    pub const ALL: [PartType; 10] = [
        PartType::Hero,
        PartType::Features,
        PartType::Pricing,
        PartType::Contact,
        PartType::Testimonial,
        PartType::About,
        PartType::Gallery,
        PartType::Blog,
        PartType::Faq,
        PartType::Footer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartType::Hero => "hero",
            PartType::Features => "features",
            PartType::Pricing => "pricing",
            PartType::Contact => "contact",
            PartType::Testimonial => "testimonial",
            PartType::About => "about",
            PartType::Gallery => "gallery",
            PartType::Blog => "blog",
            PartType::Faq => "faq",
            PartType::Footer => "footer",
        }
    }

    pub fn is_footer(&self) -> bool {
        matches!(self, PartType::Footer)
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownPartType(s.to_string()))
    }
}

/// Opaque part identifier, stamped once at creation time
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartId(String);

impl PartId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single field value inside a part's field set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Toggle(bool),
    Lines(Vec<String>),
    Asset(Option<AssetRef>),
    Images(Vec<AssetRef>),
    Items(Vec<Fields>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn lines<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::Lines(values.into_iter().map(Into::into).collect())
    }

    /// Human-readable name of the variant, used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Toggle(_) => "toggle",
            FieldValue::Lines(_) => "lines",
            FieldValue::Asset(_) => "asset",
            FieldValue::Images(_) => "images",
            FieldValue::Items(_) => "items",
        }
    }

    pub fn same_kind(&self, other: &FieldValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Ordered field set of a part or of one list item
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, FieldValue>);

impl Fields {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, name: &str, value: FieldValue) -> Self {
        self.0.insert(name.to_string(), value);
        self
    }

    pub fn with_text(self, name: &str, value: impl Into<String>) -> Self {
        self.with(name, FieldValue::Text(value.into()))
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.0.get_mut(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.0.insert(name.into(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text value of a field, empty when absent or not text
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn toggle(&self, name: &str) -> bool {
        matches!(self.get(name), Some(FieldValue::Toggle(true)))
    }

    pub fn asset(&self, name: &str) -> Option<&AssetRef> {
        match self.get(name) {
            Some(FieldValue::Asset(asset)) => asset.as_ref(),
            _ => None,
        }
    }

    pub fn lines(&self, name: &str) -> &[String] {
        match self.get(name) {
            Some(FieldValue::Lines(lines)) => lines,
            _ => &[],
        }
    }

    pub fn images(&self, name: &str) -> &[AssetRef] {
        match self.get(name) {
            Some(FieldValue::Images(images)) => images,
            _ => &[],
        }
    }

    pub fn items(&self, name: &str) -> &[Fields] {
        match self.get(name) {
            Some(FieldValue::Items(items)) => items,
            _ => &[],
        }
    }
}

/// One content block instance on the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    /// Absent only for legacy parts that were never stamped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PartId>,

    #[serde(rename = "type")]
    pub part_type: PartType,

    pub visible: bool,

    #[serde(flatten)]
    pub fields: Fields,
}

impl Part {
    pub fn new(id: PartId, part_type: PartType, fields: Fields) -> Self {
        Self {
            id: Some(id),
            part_type,
            fields,
            visible: true,
        }
    }

    /// Part without an id, addressable only by position
    pub fn unstamped(part_type: PartType, fields: Fields) -> Self {
        Self {
            id: None,
            part_type,
            fields,
            visible: true,
        }
    }

    pub fn is_footer(&self) -> bool {
        self.part_type.is_footer()
    }
}

pub const DEFAULT_TITLE: &str = "My Landing Page";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_TEXT: &str = "#333333";
pub const DEFAULT_ACCENT: &str = "#ff0000";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

fn default_text() -> String {
    DEFAULT_TEXT.to_string()
}

fn default_accent() -> String {
    DEFAULT_ACCENT.to_string()
}

/// Page-wide settings independent of parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_background")]
    pub background_color: String,

    #[serde(default = "default_text")]
    pub text_color: String,

    #[serde(default = "default_accent")]
    pub accent_color: String,

    #[serde(default, deserialize_with = "lenient_asset")]
    pub logo: Option<AssetRef>,

    #[serde(default, deserialize_with = "lenient_asset")]
    pub main_visual: Option<AssetRef>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: default_title(),
            background_color: default_background(),
            text_color: default_text(),
            accent_color: default_accent(),
            logo: None,
            main_visual: None,
        }
    }
}

/// Everything needed to render a page: theme plus ordered parts
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Page {
    pub theme: Theme,
    pub parts: Vec<Part>,
}

impl Page {
    pub fn new(theme: Theme, parts: Vec<Part>) -> Self {
        Self { theme, parts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_type_round_trips_through_name() {
        for part_type in PartType::ALL {
            assert_eq!(part_type.as_str().parse::<PartType>(), Ok(part_type));
        }
    }

    #[test]
    fn test_unknown_part_type_name() {
        assert_eq!(
            "banner".parse::<PartType>(),
            Err(SchemaError::UnknownPartType("banner".to_string()))
        );
    }

    #[test]
    fn test_part_serializes_flat() {
        let part = Part::new(
            PartId::new("p-1"),
            PartType::About,
            Fields::new().with_text("title", "About"),
        );

        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value["id"], "p-1");
        assert_eq!(value["type"], "about");
        assert_eq!(value["visible"], true);
        assert_eq!(value["title"], "About");
    }

    #[test]
    fn test_theme_defaults_fill_missing_fields() {
        let theme: Theme = serde_json::from_str(r##"{"accentColor": "#00ff00"}"##).unwrap();
        assert_eq!(theme.accent_color, "#00ff00");
        assert_eq!(theme.background_color, DEFAULT_BACKGROUND);
        assert_eq!(theme.title, DEFAULT_TITLE);
        assert!(theme.logo.is_none());
    }

    #[test]
    fn test_theme_invalid_asset_becomes_none() {
        let theme: Theme =
            serde_json::from_str(r#"{"logo": 42, "mainVisual": "not-a-data-uri"}"#).unwrap();
        assert!(theme.logo.is_none());
        assert!(theme.main_visual.is_none());
    }

    #[test]
    fn test_field_accessors_tolerate_wrong_kinds() {
        let fields = Fields::new()
            .with_text("title", "Hi")
            .with("items", FieldValue::Items(vec![]));

        assert_eq!(fields.text("title"), "Hi");
        assert_eq!(fields.text("items"), "");
        assert!(fields.items("title").is_empty());
        assert!(fields.asset("missing").is_none());
    }
}
