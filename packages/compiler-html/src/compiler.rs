use crate::context::{css_color, escape_html, Context};
use crate::fragments::{asset_src, compile_fragment, compile_unsupported};
use crate::static_files::{PREVIEW_CSS, SCRIPT_FILE, SCRIPT_JS, STYLE_CSS, STYLE_FILE};
use lander_parts::part::{DEFAULT_ACCENT, DEFAULT_BACKGROUND, DEFAULT_TEXT};
use lander_parts::{AssetRole, Page, Part, PartEntry, PartType, Theme};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Unknown render mode: {0}")]
    UnknownMode(String),
}

/// Whether editing affordances are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Preview,
    Export,
}

impl FromStr for RenderMode {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preview" => Ok(RenderMode::Preview),
            "export" => Ok(RenderMode::Export),
            other => Err(CompileError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Preview => f.write_str("preview"),
            RenderMode::Export => f.write_str("export"),
        }
    }
}

/// How images and companion files are referenced from the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AssetLinking {
    /// Data URIs and inline style/script; the document stands alone
    #[default]
    Embedded,
    /// Archive paths and linked `style.css` / `script.js`
    Packaged,
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub mode: RenderMode,
    pub assets: AssetLinking,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Preview,
            assets: AssetLinking::Embedded,
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl CompileOptions {
    pub fn preview() -> Self {
        Self::default()
    }

    /// Clean output that still stands alone
    pub fn export_preview() -> Self {
        Self {
            mode: RenderMode::Export,
            ..Self::default()
        }
    }

    /// Clean output for the export archive
    pub fn packaged() -> Self {
        Self {
            mode: RenderMode::Export,
            assets: AssetLinking::Packaged,
            ..Self::default()
        }
    }

    pub fn for_mode(mode: RenderMode) -> Self {
        match mode {
            RenderMode::Preview => Self::preview(),
            RenderMode::Export => Self::export_preview(),
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

pub fn compile_document(page: &Page, options: &CompileOptions) -> String {
    compile_page(&page.theme, &page.parts, options)
}

pub fn compile_page(theme: &Theme, parts: &[Part], options: &CompileOptions) -> String {
    let entries: Vec<PartEntry> = parts.iter().cloned().map(PartEntry::Known).collect();
    compile_entries(theme, &entries, options)
}

/// Render a full document. Same inputs always give byte-identical output.
#[tracing::instrument(skip_all, fields(mode = %options.mode, parts = entries.len()))]
pub fn compile_entries(theme: &Theme, entries: &[PartEntry], options: &CompileOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.open("<html lang=\"en\">");
    compile_head(theme, &mut ctx);

    ctx.open("<body>");
    compile_header(theme, &mut ctx);

    if let Some(visual) = &theme.main_visual {
        ctx.open("<div class=\"main-visual\">");
        let src = asset_src(&ctx, AssetRole::MainVisual, visual);
        ctx.add_line(&format!(
            "<img src=\"{}\" alt=\"{}\">",
            escape_html(&src),
            escape_html(&theme.title)
        ));
        ctx.close("</div>");
    }

    ctx.open("<main>");
    let mut anchors = Vec::new();
    let mut footer = None;
    for (index, entry) in entries.iter().enumerate() {
        match entry {
            PartEntry::Known(part) if part.is_footer() => {
                if footer.is_none() {
                    footer = Some((index, part));
                }
            }
            PartEntry::Known(part) => {
                let anchor = anchor_for(part.part_type, index, &mut anchors);
                compile_body_part(part, index, &anchor, entries, &mut ctx);
            }
            PartEntry::Unsupported { id, type_name } => {
                if options.mode == RenderMode::Preview {
                    let handle = id.as_ref().map(|id| id.as_str());
                    open_wrapper(&mut ctx, index, handle, false);
                    add_controls(&mut ctx, index, handle, move_bounds(index, entries));
                    compile_unsupported(type_name, &mut ctx);
                    ctx.close("</div>");
                } else {
                    compile_unsupported(type_name, &mut ctx);
                }
            }
        }
    }
    ctx.close("</main>");

    compile_footer_slot(footer, &mut ctx);

    if options.assets == AssetLinking::Embedded {
        ctx.open("<script>");
        ctx.add_block(SCRIPT_JS);
        ctx.close("</script>");
    } else {
        ctx.add_line(&format!("<script src=\"{}\"></script>", SCRIPT_FILE));
    }

    ctx.close("</body>");
    ctx.close("</html>");

    ctx.into_output()
}

fn compile_head(theme: &Theme, ctx: &mut Context) {
    ctx.open("<head>");
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_text_element("title", "", &theme.title);

    ctx.open("<style>");
    ctx.add_line(&format!(
        ":root {{ --bg-color: {}; --text-color: {}; --accent-color: {}; }}",
        css_color(&theme.background_color, DEFAULT_BACKGROUND),
        css_color(&theme.text_color, DEFAULT_TEXT),
        css_color(&theme.accent_color, DEFAULT_ACCENT)
    ));
    if ctx.options.assets == AssetLinking::Embedded {
        ctx.add_block(STYLE_CSS);
    }
    if ctx.options.mode == RenderMode::Preview {
        ctx.add_block(PREVIEW_CSS);
    }
    ctx.close("</style>");

    if ctx.options.assets == AssetLinking::Packaged {
        ctx.add_line(&format!("<link rel=\"stylesheet\" href=\"{}\">", STYLE_FILE));
    }

    ctx.close("</head>");
}

fn compile_header(theme: &Theme, ctx: &mut Context) {
    ctx.open("<header class=\"site-header\">");
    if let Some(logo) = &theme.logo {
        let src = asset_src(ctx, AssetRole::Logo, logo);
        ctx.add_line(&format!(
            "<img class=\"site-logo\" src=\"{}\" alt=\"{}\">",
            escape_html(&src),
            escape_html(&theme.title)
        ));
    }
    ctx.add_text_element("span", " class=\"site-title\"", &theme.title);
    ctx.close("</header>");
}

/// Section id: the type name for its first occurrence, `type-index` after that
fn anchor_for(part_type: PartType, index: usize, seen: &mut Vec<PartType>) -> String {
    if seen.contains(&part_type) {
        format!("{}-{}", part_type, index)
    } else {
        seen.push(part_type);
        part_type.to_string()
    }
}

fn compile_body_part(
    part: &Part,
    index: usize,
    anchor: &str,
    entries: &[PartEntry],
    ctx: &mut Context,
) {
    match ctx.options.mode {
        RenderMode::Export => {
            if part.visible {
                compile_fragment(part, index, anchor, ctx);
            }
        }
        RenderMode::Preview => {
            let handle = part.id.as_ref().map(|id| id.as_str());
            open_wrapper(ctx, index, handle, !part.visible);
            add_controls(ctx, index, handle, move_bounds(index, entries));
            compile_fragment(part, index, anchor, ctx);
            ctx.close("</div>");
        }
    }
}

fn compile_footer_slot(footer: Option<(usize, &Part)>, ctx: &mut Context) {
    match (ctx.options.mode, footer) {
        (RenderMode::Export, Some((index, part))) => {
            if part.visible {
                compile_fragment(part, index, "footer", ctx);
            }
        }
        (RenderMode::Export, None) => {}
        (RenderMode::Preview, Some((index, part))) if part.visible => {
            let handle = part.id.as_ref().map(|id| id.as_str());
            open_wrapper(ctx, index, handle, false);
            add_footer_controls(ctx, index, handle, true);
            compile_fragment(part, index, "footer", ctx);
            ctx.close("</div>");
        }
        (RenderMode::Preview, Some((index, part))) => {
            let handle = part.id.as_ref().map(|id| id.as_str());
            open_wrapper(ctx, index, handle, true);
            add_footer_controls(ctx, index, handle, false);
            ctx.add_line("<div class=\"footer-placeholder\">Footer hidden</div>");
            ctx.close("</div>");
        }
        (RenderMode::Preview, None) => {
            // No footer part yet; the toggle creates one
            ctx.open("<div class=\"part-wrapper footer-placeholder-wrapper\">");
            ctx.open("<div class=\"part-controls\">");
            ctx.add_line(
                "<button type=\"button\" data-action=\"toggle-footer\">Show footer</button>",
            );
            ctx.close("</div>");
            ctx.add_line("<div class=\"footer-placeholder\">No footer</div>");
            ctx.close("</div>");
        }
    }
}

struct MoveBounds {
    can_move_up: bool,
    can_move_down: bool,
}

fn move_bounds(index: usize, entries: &[PartEntry]) -> MoveBounds {
    let next_is_footer = matches!(
        entries.get(index + 1),
        Some(PartEntry::Known(part)) if part.is_footer()
    );
    MoveBounds {
        can_move_up: index > 0,
        can_move_down: index + 1 < entries.len() && !next_is_footer,
    }
}

fn open_wrapper(ctx: &mut Context, index: usize, id: Option<&str>, dimmed: bool) {
    let class = if dimmed {
        "part-wrapper part-hidden"
    } else {
        "part-wrapper"
    };
    let id_attr = id
        .map(|id| format!(" data-part-id=\"{}\"", escape_html(id)))
        .unwrap_or_default();
    ctx.open(&format!(
        "<div class=\"{}\" data-part-index=\"{}\"{}>",
        class, index, id_attr
    ));
    if let Some(id) = id {
        ctx.add_line(&format!(
            "<input type=\"hidden\" class=\"part-id\" value=\"{}\">",
            escape_html(id)
        ));
    }
}

fn control_button(index: usize, id: Option<&str>, action: &str, label: &str, enabled: bool) -> String {
    let target = match id {
        Some(id) => format!("data-part-id=\"{}\"", escape_html(id)),
        None => format!("data-part-index=\"{}\"", index),
    };
    format!(
        "<button type=\"button\" data-action=\"{}\" {}{}>{}</button>",
        action,
        target,
        if enabled { "" } else { " disabled" },
        label
    )
}

fn add_controls(ctx: &mut Context, index: usize, id: Option<&str>, bounds: MoveBounds) {
    ctx.open("<div class=\"part-controls\">");
    ctx.add_line(&control_button(index, id, "edit", "Edit", true));
    ctx.add_line(&control_button(index, id, "move-up", "&uarr;", bounds.can_move_up));
    ctx.add_line(&control_button(index, id, "move-down", "&darr;", bounds.can_move_down));
    ctx.add_line(&control_button(index, id, "delete", "Delete", true));
    ctx.close("</div>");
}

fn add_footer_controls(ctx: &mut Context, index: usize, id: Option<&str>, visible: bool) {
    ctx.open("<div class=\"part-controls\">");
    ctx.add_line(&control_button(index, id, "edit", "Edit", true));
    let label = if visible { "Hide footer" } else { "Show footer" };
    ctx.add_line(&control_button(index, id, "toggle-footer", label, true));
    ctx.close("</div>");
}
