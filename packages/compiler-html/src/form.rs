//! Edit forms generated from a part's schema.
//!
//! Every input is named by the field path it edits (`title`,
//! `items.1.title`, `plans.0.features`), and inputs exist only for list
//! indices the part actually has. Add/remove controls are disabled at the
//! list bounds.

use crate::compiler::CompileOptions;
use crate::context::{escape_html, Context};
use lander_parts::{schema_for, FieldKind, FieldSpec, Fields, Part};

pub fn compile_part_form(part: &Part, options: &CompileOptions) -> String {
    let schema = schema_for(part.part_type);
    let mut ctx = Context::new(options);

    let id_attr = part
        .id
        .as_ref()
        .map(|id| format!(" data-part-id=\"{}\"", escape_html(id.as_str())))
        .unwrap_or_default();
    ctx.open(&format!(
        "<form class=\"part-form\" data-part-type=\"{}\"{}>",
        part.part_type, id_attr
    ));
    ctx.add_line(&format!("<h3>{}</h3>", escape_html(schema.label)));

    for spec in schema.fields {
        compile_field(spec, &part.fields, spec.name, &mut ctx);
    }

    ctx.close("</form>");
    ctx.into_output()
}

fn compile_field(spec: &FieldSpec, fields: &Fields, path: &str, ctx: &mut Context) {
    let label = escape_html(spec.label);
    let name = escape_html(path);

    match spec.kind {
        FieldKind::Text | FieldKind::Link | FieldKind::Color => {
            let input_type = if matches!(spec.kind, FieldKind::Color) {
                "color"
            } else {
                "text"
            };
            ctx.add_line(&format!(
                "<label>{} <input type=\"{}\" name=\"{}\" value=\"{}\"></label>",
                label,
                input_type,
                name,
                escape_html(fields.text(spec.name))
            ));
        }

        FieldKind::Multiline => {
            ctx.add_line(&format!(
                "<label>{} <textarea name=\"{}\" rows=\"3\">{}</textarea></label>",
                label,
                name,
                escape_html(fields.text(spec.name))
            ));
        }

        FieldKind::Lines => {
            ctx.add_line(&format!(
                "<label>{} <textarea name=\"{}\" data-kind=\"lines\" rows=\"4\">{}</textarea></label>",
                label,
                name,
                escape_html(&fields.lines(spec.name).join("\n"))
            ));
        }

        FieldKind::Toggle => {
            let checked = if fields.toggle(spec.name) { " checked" } else { "" };
            ctx.add_line(&format!(
                "<label><input type=\"checkbox\" name=\"{}\"{}> {}</label>",
                name, checked, label
            ));
        }

        FieldKind::Image => {
            ctx.open("<div class=\"form-image\">");
            ctx.add_line(&format!("<span>{}</span>", label));
            if let Some(asset) = fields.asset(spec.name) {
                ctx.add_line(&format!(
                    "<img class=\"form-thumb\" src=\"{}\" alt=\"\">",
                    escape_html(&asset.to_data_uri())
                ));
                ctx.add_line(&format!(
                    "<button type=\"button\" data-action=\"clear-asset\" data-path=\"{}\">Remove</button>",
                    name
                ));
            }
            ctx.add_line(&format!(
                "<input type=\"file\" name=\"{}\" accept=\"image/*\">",
                name
            ));
            ctx.close("</div>");
        }

        FieldKind::Images { max } => {
            let images = fields.images(spec.name);
            ctx.open(&format!("<fieldset class=\"form-images\" data-list=\"{}\">", name));
            ctx.add_line(&format!("<legend>{} ({}/{})</legend>", label, images.len(), max));
            for (index, asset) in images.iter().enumerate() {
                ctx.open("<div class=\"form-item\">");
                ctx.add_line(&format!(
                    "<img class=\"form-thumb\" src=\"{}\" alt=\"\">",
                    escape_html(&asset.to_data_uri())
                ));
                ctx.add_line(&format!(
                    "<button type=\"button\" data-action=\"remove-image\" data-path=\"{}.{}\">Remove</button>",
                    name, index
                ));
                ctx.close("</div>");
            }
            let disabled = if images.len() >= max { " disabled" } else { "" };
            ctx.add_line(&format!(
                "<input type=\"file\" name=\"{}\" accept=\"image/*\" multiple{}>",
                name, disabled
            ));
            ctx.close("</fieldset>");
        }

        FieldKind::Items { item, min, max } => {
            let items = fields.items(spec.name);
            ctx.open(&format!("<fieldset class=\"form-list\" data-list=\"{}\">", name));
            ctx.add_line(&format!("<legend>{}</legend>", label));

            for (index, item_fields) in items.iter().enumerate() {
                ctx.open(&format!("<div class=\"form-item\" data-index=\"{}\">", index));
                for item_spec in item {
                    let item_path = format!("{}.{}.{}", path, index, item_spec.name);
                    compile_field(item_spec, item_fields, &item_path, ctx);
                }
                let disabled = if items.len() <= min { " disabled" } else { "" };
                ctx.add_line(&format!(
                    "<button type=\"button\" data-action=\"remove-item\" data-list=\"{}\" data-index=\"{}\"{}>Remove</button>",
                    name, index, disabled
                ));
                ctx.close("</div>");
            }

            let disabled = if items.len() >= max { " disabled" } else { "" };
            ctx.add_line(&format!(
                "<button type=\"button\" data-action=\"add-item\" data-list=\"{}\"{}>Add</button>",
                name, disabled
            ));
            ctx.close("</fieldset>");
        }
    }
}
