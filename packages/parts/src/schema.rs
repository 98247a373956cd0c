//! # Part Schema Registry
//!
//! Per part type: the ordered field layout (what the edit form shows and
//! how serialized input is coerced) and the default template a new part is
//! cloned from.
//!
//! This module and the HTML compiler are the only places that know what a
//! given part type contains. Everything else (field paths, the part store,
//! the codec) works over [`Fields`] generically.

use crate::error::SchemaError;
use crate::part::{FieldValue, Fields, PartType};
use serde::Serialize;

/// Shape of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Multiline,
    Color,
    Link,
    Toggle,
    Image,
    /// Ordered multi-image field
    Images { max: usize },
    /// Ordered list of short strings, edited one per line
    Lines,
    /// Ordered list of nested field sets
    Items {
        item: &'static [FieldSpec],
        min: usize,
        max: usize,
    },
}

impl FieldKind {
    /// Value a field of this kind holds when nothing else is known
    pub fn blank(&self) -> FieldValue {
        match self {
            FieldKind::Text | FieldKind::Multiline | FieldKind::Color | FieldKind::Link => {
                FieldValue::Text(String::new())
            }
            FieldKind::Toggle => FieldValue::Toggle(false),
            FieldKind::Image => FieldValue::Asset(None),
            FieldKind::Images { .. } => FieldValue::Images(Vec::new()),
            FieldKind::Lines => FieldValue::Lines(Vec::new()),
            FieldKind::Items { .. } => FieldValue::Items(Vec::new()),
        }
    }

    pub fn is_asset(&self) -> bool {
        matches!(self, FieldKind::Image | FieldKind::Images { .. })
    }

    /// Most assets a field of this kind can hold, nested items included
    pub fn asset_capacity(&self) -> usize {
        match self {
            FieldKind::Image => 1,
            FieldKind::Images { max } => *max,
            FieldKind::Items { item, max, .. } => {
                max * item.iter().map(|spec| spec.kind.asset_capacity()).sum::<usize>()
            }
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartSchema {
    pub part_type: PartType,
    pub label: &'static str,
    pub fields: &'static [FieldSpec],
}

impl PartSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Inclusive item-count bounds of a list field
    pub fn list_bounds(&self, name: &str) -> Option<(usize, usize)> {
        match self.field(name)?.kind {
            FieldKind::Items { min, max, .. } => Some((min, max)),
            FieldKind::Images { max } => Some((0, max)),
            _ => None,
        }
    }

    /// Most assets one part of this type can carry
    pub fn asset_capacity(&self) -> usize {
        self.fields.iter().map(|spec| spec.kind.asset_capacity()).sum()
    }

    /// Item layout of an `Items` field
    pub fn item_fields(&self, name: &str) -> Option<&'static [FieldSpec]> {
        match self.field(name)?.kind {
            FieldKind::Items { item, .. } => Some(item),
            _ => None,
        }
    }

    /// Fresh item for an `Items` field: a copy of the template's first item,
    /// or blank values when the template list is empty.
    pub fn new_item(&self, name: &str) -> Result<Fields, SchemaError> {
        let item = self.item_fields(name).ok_or_else(|| SchemaError::UnknownList {
            part_type: self.part_type.to_string(),
            field: name.to_string(),
        })?;

        let template = template_for(self.part_type);
        Ok(template
            .items(name)
            .first()
            .cloned()
            .unwrap_or_else(|| blank_fields(item)))
    }
}

pub fn blank_fields(specs: &[FieldSpec]) -> Fields {
    specs.iter().fold(Fields::new(), |fields, spec| {
        fields.with(spec.name, spec.kind.blank())
    })
}

pub const MAX_LIST_ITEMS: usize = 12;
pub const MAX_GALLERY_IMAGES: usize = 24;
pub const MIN_PRICING_PLANS: usize = 1;
pub const MAX_PRICING_PLANS: usize = 4;

const FEATURE_ITEM: &[FieldSpec] = &[
    FieldSpec::new("icon", "Icon", FieldKind::Text),
    FieldSpec::new("title", "Title", FieldKind::Text),
    FieldSpec::new("description", "Description", FieldKind::Multiline),
    FieldSpec::new("link", "Link", FieldKind::Link),
];

const PLAN_ITEM: &[FieldSpec] = &[
    FieldSpec::new("name", "Plan name", FieldKind::Text),
    FieldSpec::new("price", "Price", FieldKind::Text),
    FieldSpec::new("features", "Features (one per line)", FieldKind::Lines),
    FieldSpec::new("link", "Link", FieldKind::Link),
];

const TESTIMONIAL_ITEM: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text),
    FieldSpec::new("role", "Role", FieldKind::Text),
    FieldSpec::new("comment", "Comment", FieldKind::Multiline),
    FieldSpec::new("image", "Photo", FieldKind::Image),
];

const POST_ITEM: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", FieldKind::Text),
    FieldSpec::new("date", "Date", FieldKind::Text),
    FieldSpec::new("excerpt", "Excerpt", FieldKind::Multiline),
    FieldSpec::new("link", "Link", FieldKind::Link),
    FieldSpec::new("image", "Image", FieldKind::Image),
];

const FAQ_ITEM: &[FieldSpec] = &[
    FieldSpec::new("question", "Question", FieldKind::Text),
    FieldSpec::new("answer", "Answer", FieldKind::Multiline),
];

const fn items(item: &'static [FieldSpec], min: usize, max: usize) -> FieldKind {
    FieldKind::Items { item, min, max }
}

static HERO: PartSchema = PartSchema {
    part_type: PartType::Hero,
    label: "Hero",
    fields: &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("subtitle", "Subtitle", FieldKind::Text),
        FieldSpec::new("description", "Description", FieldKind::Multiline),
        FieldSpec::new("buttonText", "Button text", FieldKind::Text),
        FieldSpec::new("buttonLink", "Button link", FieldKind::Link),
        FieldSpec::new("image", "Image", FieldKind::Image),
        FieldSpec::new("backgroundColor", "Background color", FieldKind::Color),
    ],
};

static FEATURES: PartSchema = PartSchema {
    part_type: PartType::Features,
    label: "Features",
    fields: &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("items", "Features", items(FEATURE_ITEM, 0, MAX_LIST_ITEMS)),
    ],
};

static PRICING: PartSchema = PartSchema {
    part_type: PartType::Pricing,
    label: "Pricing",
    fields: &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new(
            "plans",
            "Plans",
            items(PLAN_ITEM, MIN_PRICING_PLANS, MAX_PRICING_PLANS),
        ),
    ],
};

static CONTACT: PartSchema = PartSchema {
    part_type: PartType::Contact,
    label: "Contact",
    fields: &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("description", "Description", FieldKind::Multiline),
        FieldSpec::new("email", "Email", FieldKind::Text),
        FieldSpec::new("phone", "Phone", FieldKind::Text),
        FieldSpec::new("address", "Address", FieldKind::Multiline),
        FieldSpec::new("buttonText", "Button text", FieldKind::Text),
    ],
};

static TESTIMONIAL: PartSchema = PartSchema {
    part_type: PartType::Testimonial,
    label: "Testimonials",
    fields: &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("items", "Testimonials", items(TESTIMONIAL_ITEM, 0, MAX_LIST_ITEMS)),
    ],
};

static ABOUT: PartSchema = PartSchema {
    part_type: PartType::About,
    label: "About",
    fields: &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("description", "Description", FieldKind::Multiline),
        FieldSpec::new("image", "Image", FieldKind::Image),
    ],
};

static GALLERY: PartSchema = PartSchema {
    part_type: PartType::Gallery,
    label: "Gallery",
    fields: &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new(
            "images",
            "Images",
            FieldKind::Images {
                max: MAX_GALLERY_IMAGES,
            },
        ),
    ],
};

static BLOG: PartSchema = PartSchema {
    part_type: PartType::Blog,
    label: "Blog",
    fields: &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("posts", "Posts", items(POST_ITEM, 0, MAX_LIST_ITEMS)),
    ],
};

static FAQ: PartSchema = PartSchema {
    part_type: PartType::Faq,
    label: "FAQ",
    fields: &[
        FieldSpec::new("title", "Title", FieldKind::Text),
        FieldSpec::new("items", "Questions", items(FAQ_ITEM, 0, MAX_LIST_ITEMS)),
    ],
};

static FOOTER: PartSchema = PartSchema {
    part_type: PartType::Footer,
    label: "Footer",
    fields: &[
        FieldSpec::new("companyName", "Company name", FieldKind::Text),
        FieldSpec::new("backgroundColor", "Background color", FieldKind::Color),
        FieldSpec::new("textColor", "Text color", FieldKind::Color),
    ],
};

pub fn schema_for(part_type: PartType) -> &'static PartSchema {
    match part_type {
        PartType::Hero => &HERO,
        PartType::Features => &FEATURES,
        PartType::Pricing => &PRICING,
        PartType::Contact => &CONTACT,
        PartType::Testimonial => &TESTIMONIAL,
        PartType::About => &ABOUT,
        PartType::Gallery => &GALLERY,
        PartType::Blog => &BLOG,
        PartType::Faq => &FAQ,
        PartType::Footer => &FOOTER,
    }
}

/// All schemas in catalog order
pub fn registry() -> impl Iterator<Item = &'static PartSchema> {
    PartType::ALL.into_iter().map(schema_for)
}

/// Assets a page holding one part of every type can carry
pub fn page_asset_capacity() -> usize {
    registry().map(PartSchema::asset_capacity).sum()
}

/// Template lookup by type name; fails for names outside the catalog
pub fn template_named(name: &str) -> Result<(PartType, Fields), SchemaError> {
    let part_type: PartType = name.parse()?;
    Ok((part_type, template_for(part_type)))
}

/// Default field values for a new part of the given type
pub fn template_for(part_type: PartType) -> Fields {
    match part_type {
        PartType::Hero => Fields::new()
            .with_text("title", "Grow your business faster")
            .with_text("subtitle", "The all-in-one platform for modern teams")
            .with_text(
                "description",
                "Launch campaigns, track results and delight customers from a single dashboard.",
            )
            .with_text("buttonText", "Get started")
            .with_text("buttonLink", "#contact")
            .with("image", FieldValue::Asset(None))
            .with_text("backgroundColor", "#f5f7fa"),

        PartType::Features => Fields::new().with_text("title", "Features").with(
            "items",
            FieldValue::Items(vec![
                feature("⚡", "Fast", "Pages load in a blink on every device."),
                feature("🔒", "Secure", "Your data is encrypted at rest and in transit."),
                feature("📈", "Scalable", "Grows with your team without extra setup."),
            ]),
        ),

        PartType::Pricing => Fields::new().with_text("title", "Pricing").with(
            "plans",
            FieldValue::Items(vec![
                plan("Basic", "$9/mo", &["1 user", "5 projects", "Email support"]),
                plan("Standard", "$29/mo", &["5 users", "Unlimited projects", "Priority support"]),
                plan("Premium", "$59/mo", &["Unlimited users", "Custom domains", "Dedicated manager"]),
            ]),
        ),

        PartType::Contact => Fields::new()
            .with_text("title", "Contact us")
            .with_text("description", "Questions? Send us a message and we will get back to you.")
            .with_text("email", "info@example.com")
            .with_text("phone", "000-0000-0000")
            .with_text("address", "")
            .with_text("buttonText", "Send"),

        PartType::Testimonial => Fields::new()
            .with_text("title", "What our customers say")
            .with(
                "items",
                FieldValue::Items(vec![
                    Fields::new()
                        .with_text("name", "Alex Morgan")
                        .with_text("role", "Marketing lead")
                        .with_text("comment", "We doubled our sign-ups within a month.")
                        .with("image", FieldValue::Asset(None)),
                    Fields::new()
                        .with_text("name", "Sam Lee")
                        .with_text("role", "Founder")
                        .with_text("comment", "Setting up our page took an afternoon.")
                        .with("image", FieldValue::Asset(None)),
                ]),
            ),

        PartType::About => Fields::new()
            .with_text("title", "About us")
            .with_text(
                "description",
                "We are a small team building tools that make launching products simple.",
            )
            .with("image", FieldValue::Asset(None)),

        PartType::Gallery => Fields::new()
            .with_text("title", "Gallery")
            .with("images", FieldValue::Images(Vec::new())),

        PartType::Blog => Fields::new().with_text("title", "Latest news").with(
            "posts",
            FieldValue::Items(vec![
                post("Welcome to our blog", "2024-01-15", "Our first post about what comes next."),
                post("Product update", "2024-02-01", "A roundup of everything we shipped."),
            ]),
        ),

        PartType::Faq => Fields::new()
            .with_text("title", "Frequently asked questions")
            .with(
                "items",
                FieldValue::Items(vec![
                    faq("How do I get started?", "Sign up and follow the setup guide."),
                    faq("Can I cancel anytime?", "Yes, plans can be cancelled at any time."),
                    faq("Do you offer support?", "Email support is included with every plan."),
                ]),
            ),

        PartType::Footer => Fields::new()
            .with_text("companyName", "Your Company")
            .with_text("backgroundColor", "#333333")
            .with_text("textColor", "#ffffff"),
    }
}

fn feature(icon: &str, title: &str, description: &str) -> Fields {
    Fields::new()
        .with_text("icon", icon)
        .with_text("title", title)
        .with_text("description", description)
        .with_text("link", "")
}

fn plan(name: &str, price: &str, features: &[&str]) -> Fields {
    Fields::new()
        .with_text("name", name)
        .with_text("price", price)
        .with("features", FieldValue::lines(features.iter().copied()))
        .with_text("link", "#contact")
}

fn post(title: &str, date: &str, excerpt: &str) -> Fields {
    Fields::new()
        .with_text("title", title)
        .with_text("date", date)
        .with_text("excerpt", excerpt)
        .with_text("link", "#")
        .with("image", FieldValue::Asset(None))
}

fn faq(question: &str, answer: &str) -> Fields {
    Fields::new()
        .with_text("question", question)
        .with_text("answer", answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_matches_specs(fields: &Fields, specs: &[FieldSpec], context: &str) {
        let names: Vec<&str> = specs.iter().map(|s| s.name).collect();
        let mut expected = names.clone();
        expected.sort_unstable();
        let actual: Vec<&str> = fields.names().collect();
        assert_eq!(actual, expected, "field names differ for {}", context);

        for spec in specs {
            let value = fields.get(spec.name).unwrap();
            assert!(
                value.same_kind(&spec.kind.blank()),
                "{}.{} holds {}",
                context,
                spec.name,
                value.kind_name()
            );
            if let FieldKind::Items { item, .. } = spec.kind {
                if let FieldValue::Items(list) = value {
                    for entry in list {
                        assert_matches_specs(entry, item, spec.name);
                    }
                }
            }
        }
    }

    #[test]
    fn test_templates_match_schema_layout() {
        for schema in registry() {
            let template = template_for(schema.part_type);
            assert_matches_specs(&template, schema.fields, schema.label);
        }
    }

    #[test]
    fn test_template_list_sizes_within_bounds() {
        for schema in registry() {
            let template = template_for(schema.part_type);
            for spec in schema.fields {
                if let Some((min, max)) = schema.list_bounds(spec.name) {
                    let len = match template.get(spec.name) {
                        Some(FieldValue::Items(items)) => items.len(),
                        Some(FieldValue::Images(images)) => images.len(),
                        _ => 0,
                    };
                    assert!(len >= min && len <= max, "{}.{}", schema.label, spec.name);
                }
            }
        }
    }

    #[test]
    fn test_template_named_rejects_unknown() {
        assert!(template_named("pricing").is_ok());
        assert_eq!(
            template_named("carousel").unwrap_err(),
            SchemaError::UnknownPartType("carousel".to_string())
        );
    }

    #[test]
    fn test_pricing_bounds() {
        let schema = schema_for(PartType::Pricing);
        assert_eq!(schema.list_bounds("plans"), Some((1, 4)));
        assert_eq!(schema.list_bounds("title"), None);
    }

    #[test]
    fn test_asset_capacity_counts_nested_images() {
        assert_eq!(schema_for(PartType::Gallery).asset_capacity(), 24);
        assert_eq!(schema_for(PartType::Testimonial).asset_capacity(), 12);
        assert_eq!(schema_for(PartType::Hero).asset_capacity(), 1);
        assert_eq!(schema_for(PartType::Faq).asset_capacity(), 0);
        assert_eq!(page_asset_capacity(), 50);
    }

    #[test]
    fn test_new_item_copies_template_item() {
        let schema = schema_for(PartType::Faq);
        let item = schema.new_item("items").unwrap();
        assert_eq!(item.text("question"), "How do I get started?");

        assert!(schema.new_item("title").is_err());
    }

    #[test]
    fn test_registry_serializes_for_form_clients() {
        let json = serde_json::to_value(registry().collect::<Vec<_>>()).unwrap();
        assert_eq!(json[0]["partType"], "hero");
        assert_eq!(json[0]["fields"][0]["name"], "title");
        assert_eq!(json[0]["fields"][0]["kind"], "text");
        assert_eq!(json[2]["fields"][1]["kind"], "items");
        assert_eq!(json[2]["fields"][1]["max"], 4);
    }
}
