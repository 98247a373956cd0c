use crate::{compile_entries, compile_page, CompileError, CompileOptions, RenderMode};
use lander_parts::{
    template_for, AssetRef, FieldValue, Part, PartEntry, PartId, PartType, Theme,
};

fn part(id: &str, part_type: PartType) -> Part {
    Part::new(PartId::new(id), part_type, template_for(part_type))
}

fn sample_parts() -> Vec<Part> {
    vec![
        part("1", PartType::Hero),
        part("2", PartType::Features),
        part("3", PartType::Pricing),
        part("4", PartType::Footer),
    ]
}

#[test]
fn test_compile_preview_has_controls() {
    let html = compile_page(&Theme::default(), &sample_parts(), &CompileOptions::preview());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("data-action=\"edit\" data-part-id=\"1\""));
    assert!(html.contains("<input type=\"hidden\" class=\"part-id\" value=\"2\">"));
    assert!(html.contains("Grow your business faster"));
    assert!(html.contains("Hide footer"));
    assert!(html.contains("<style>"));
}

#[test]
fn test_compile_export_has_no_controls() {
    let html = compile_page(&Theme::default(), &sample_parts(), &CompileOptions::export_preview());

    assert!(!html.contains("part-controls\">"));
    assert!(!html.contains("data-action"));
    assert!(!html.contains("part-id"));
    assert!(html.contains("&copy; Your Company. All rights reserved."));
    assert!(html.contains(".pricing-card"));
}

#[test]
fn test_move_controls_respect_boundaries() {
    let html = compile_page(&Theme::default(), &sample_parts(), &CompileOptions::preview());

    assert!(html.contains("data-action=\"move-up\" data-part-id=\"1\" disabled"));
    assert!(html.contains("data-action=\"move-up\" data-part-id=\"2\">"));
    // the part right before the footer cannot move down
    assert!(html.contains("data-action=\"move-down\" data-part-id=\"3\" disabled"));
    assert!(!html.contains("data-action=\"move-up\" data-part-id=\"4\""));
    assert!(!html.contains("data-action=\"delete\" data-part-id=\"4\""));
}

#[test]
fn test_hidden_footer_in_preview_keeps_toggle() {
    let mut parts = sample_parts();
    parts[3].visible = false;

    let preview = compile_page(&Theme::default(), &parts, &CompileOptions::preview());
    assert!(preview.contains("Show footer"));
    assert!(!preview.contains("All rights reserved"));

    let export = compile_page(&Theme::default(), &parts, &CompileOptions::export_preview());
    assert!(!export.contains("All rights reserved"));
    assert!(!export.contains("Footer hidden"));
}

#[test]
fn test_missing_footer_shows_placeholder_only_in_preview() {
    let parts = vec![part("1", PartType::About)];

    let preview = compile_page(&Theme::default(), &parts, &CompileOptions::preview());
    assert!(preview.contains("data-action=\"toggle-footer\">Show footer"));

    let export = compile_page(&Theme::default(), &parts, &CompileOptions::export_preview());
    assert!(!export.contains("footer-placeholder"));
    assert!(!export.contains("<footer class=\"part"));
}

#[test]
fn test_hidden_parts_dimmed_in_preview_and_dropped_from_export() {
    let mut parts = sample_parts();
    parts[1].visible = false;

    let preview = compile_page(&Theme::default(), &parts, &CompileOptions::preview());
    assert!(preview.contains("part-wrapper part-hidden\" data-part-index=\"1\""));

    let export = compile_page(&Theme::default(), &parts, &CompileOptions::export_preview());
    assert!(!export.contains("<div class=\"features-grid\">"));
}

#[test]
fn test_unsupported_entry_renders_placeholder() {
    let entries = vec![
        PartEntry::Known(part("1", PartType::About)),
        PartEntry::Unsupported {
            id: Some(PartId::new("9")),
            type_name: "countdown".to_string(),
        },
    ];

    let html = compile_entries(&Theme::default(), &entries, &CompileOptions::export_preview());
    assert!(html.contains("Part type &quot;countdown&quot; is not supported yet."));
    assert!(html.contains("About us"));
}

#[test]
fn test_render_is_deterministic() {
    let mut theme = Theme::default();
    theme.logo = Some(AssetRef::new("image/png", vec![1u8, 2, 3]));
    let parts = sample_parts();

    for options in [
        CompileOptions::preview(),
        CompileOptions::export_preview(),
        CompileOptions::packaged(),
    ] {
        assert_eq!(
            compile_page(&theme, &parts, &options),
            compile_page(&theme, &parts, &options)
        );
    }
}

#[test]
fn test_theme_colors_become_custom_properties() {
    let theme = Theme {
        background_color: "#101010".to_string(),
        accent_color: "red; } body { display: none".to_string(),
        ..Theme::default()
    };
    let html = compile_page(&theme, &[], &CompileOptions::preview());

    assert!(html.contains("--bg-color: #101010;"));
    assert!(html.contains("--accent-color: #ff0000;"));
}

#[test]
fn test_embedded_vs_packaged_assets() {
    let image = AssetRef::new("image/jpeg", vec![0xff, 0xd8, 0xff]);
    let mut about = part("1", PartType::About);
    about.fields.insert("image", FieldValue::Asset(Some(image.clone())));
    let mut theme = Theme::default();
    theme.main_visual = Some(image.clone());
    let parts = vec![about];

    let embedded = compile_page(&theme, &parts, &CompileOptions::export_preview());
    assert!(embedded.contains(&image.to_data_uri()));
    assert!(embedded.contains("<script>"));

    let packaged = compile_page(&theme, &parts, &CompileOptions::packaged());
    assert!(packaged.contains("src=\"images/part-0.jpg\""));
    assert!(packaged.contains("src=\"images/mainvisual-0.jpg\""));
    assert!(packaged.contains("<link rel=\"stylesheet\" href=\"style.css\">"));
    assert!(packaged.contains("<script src=\"script.js\"></script>"));
    assert!(!packaged.contains("data:image"));
}

#[test]
fn test_text_is_escaped() {
    let mut hero = part("1", PartType::Hero);
    hero.fields.insert("title", FieldValue::text("<script>alert(1)</script>"));

    let html = compile_page(&Theme::default(), &[hero], &CompileOptions::export_preview());
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn test_compact_output() {
    let options = CompileOptions::export_preview().with_pretty(false);
    let html = compile_page(&Theme::default(), &sample_parts(), &options);
    assert!(!html.contains("\n  "));
}

#[test]
fn test_mode_parses_from_name() {
    assert_eq!("preview".parse::<RenderMode>(), Ok(RenderMode::Preview));
    assert_eq!("export".parse::<RenderMode>(), Ok(RenderMode::Export));
    let err = "print".parse::<RenderMode>().unwrap_err();
    assert_eq!(err, CompileError::UnknownMode("print".to_string()));
    assert_eq!(err.to_string(), "Unknown render mode: print");
}
