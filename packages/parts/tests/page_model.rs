//! Schema, resolver and codec working together on whole pages

use lander_parts::field_path::{self, FieldInput};
use lander_parts::{
    collect_assets, decode_page, encode_page, registry, template_for, AssetRef, FieldPath,
    FieldValue, Page, Part, PartEntry, PartId, PartType, Theme,
};

fn features_part() -> Part {
    Part::new(
        PartId::new("f1"),
        PartType::Features,
        template_for(PartType::Features),
    )
}

#[test]
fn test_every_registered_type_has_a_template() {
    for schema in registry() {
        let template = template_for(schema.part_type);
        for spec in schema.fields {
            assert!(
                template.contains(spec.name),
                "{} template lacks {}",
                schema.part_type,
                spec.name
            );
        }
    }
}

#[test]
fn test_nested_edit_survives_serialization() {
    let mut part = features_part();
    field_path::set_input(
        &mut part.fields,
        &"items.2.link".parse::<FieldPath>().unwrap(),
        FieldInput::Text("https://example.com".to_string()),
    )
    .unwrap();

    let page = Page::new(Theme::default(), vec![part.clone()]);
    let decoded = decode_page(&encode_page(&page).unwrap()).unwrap();

    match &decoded.entries[0] {
        PartEntry::Known(restored) => {
            assert_eq!(restored, &part);
            assert_eq!(restored.fields.items("items")[2].text("link"), "https://example.com");
        }
        other => panic!("expected a known part, got {:?}", other),
    }
}

#[test]
fn test_assets_on_decoded_page_are_located() {
    let source = r#"{
        "theme": {"title": "Shop", "logo": "data:image/png;base64,AQID"},
        "parts": [
            {"id": "h", "type": "hero", "image": "data:image/jpeg;base64,BAUG"},
            {"id": "x", "type": "ticker"},
            {"id": "g", "type": "gallery", "images": ["data:image/png;base64,BwgJ"]}
        ]
    }"#;

    let page = decode_page(source).unwrap().into_page();
    assert_eq!(page.parts.len(), 2);

    let located: Vec<(String, Vec<u8>)> = collect_assets(&page.theme, &page.parts)
        .into_iter()
        .map(|l| (l.archive_path(), l.asset.bytes().to_vec()))
        .collect();

    assert_eq!(
        located,
        vec![
            ("images/logo.png".to_string(), vec![1, 2, 3]),
            ("images/part-0.jpg".to_string(), vec![4, 5, 6]),
            ("images/gallery-1-0.png".to_string(), vec![7, 8, 9]),
        ]
    );
}

#[test]
fn test_set_asset_on_item_image() {
    let mut part = Part::new(
        PartId::new("t"),
        PartType::Testimonial,
        template_for(PartType::Testimonial),
    );
    let avatar = AssetRef::new("image/jpeg", vec![0xff, 0xd8]);

    field_path::set_asset(
        &mut part.fields,
        &FieldPath::nested("items", 0, "image"),
        Some(avatar.clone()),
    )
    .unwrap();

    assert_eq!(part.fields.items("items")[0].asset("image"), Some(&avatar));
    assert_eq!(
        part.fields.items("items")[1].get("image"),
        Some(&FieldValue::Asset(None))
    );
}
