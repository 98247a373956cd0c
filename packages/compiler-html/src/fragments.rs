//! Per-type HTML fragments. Each generator reads only the part's own fields.

use crate::compiler::{AssetLinking, RenderMode};
use crate::context::{css_color, escape_html, escape_multiline, Context};
use lander_parts::{AssetRef, AssetRole, Fields, Part, PartType};

pub(crate) fn compile_fragment(part: &Part, index: usize, anchor: &str, ctx: &mut Context) {
    let fields = &part.fields;
    let open = format!(
        "<section id=\"{}\" class=\"part part-{}\">",
        escape_html(anchor),
        part.part_type
    );

    match part.part_type {
        PartType::Hero => compile_hero(fields, index, anchor, ctx),
        PartType::Features => {
            ctx.open(&open);
            compile_features(fields, ctx);
            ctx.close("</section>");
        }
        PartType::Pricing => {
            ctx.open(&open);
            compile_pricing(fields, ctx);
            ctx.close("</section>");
        }
        PartType::Contact => {
            ctx.open(&open);
            compile_contact(fields, ctx);
            ctx.close("</section>");
        }
        PartType::Testimonial => {
            ctx.open(&open);
            compile_testimonials(fields, index, ctx);
            ctx.close("</section>");
        }
        PartType::About => {
            ctx.open(&open);
            compile_about(fields, index, ctx);
            ctx.close("</section>");
        }
        PartType::Gallery => {
            ctx.open(&open);
            compile_gallery(fields, index, ctx);
            ctx.close("</section>");
        }
        PartType::Blog => {
            ctx.open(&open);
            compile_blog(fields, index, ctx);
            ctx.close("</section>");
        }
        PartType::Faq => {
            ctx.open(&open);
            compile_faq(fields, ctx);
            ctx.close("</section>");
        }
        PartType::Footer => compile_footer(fields, ctx),
    }
}

/// Neutral stand-in for a record whose type this renderer does not know
pub(crate) fn compile_unsupported(type_name: &str, ctx: &mut Context) {
    ctx.open("<section class=\"part part-unsupported\">");
    ctx.add_line(&format!(
        "<p>Part type &quot;{}&quot; is not supported yet.</p>",
        escape_html(type_name)
    ));
    ctx.close("</section>");
}

/// `src` for an asset: inline data in embedded mode, archive path when packaged
pub(crate) fn asset_src(ctx: &Context, role: AssetRole, asset: &AssetRef) -> String {
    match ctx.options.assets {
        AssetLinking::Embedded => asset.to_data_uri(),
        AssetLinking::Packaged => role.archive_path(asset.extension()),
    }
}

fn add_image(ctx: &mut Context, class: &str, role: AssetRole, asset: &AssetRef, alt: &str) {
    let src = asset_src(ctx, role, asset);
    ctx.add_line(&format!(
        "<img class=\"{}\" src=\"{}\" alt=\"{}\">",
        class,
        escape_html(&src),
        escape_html(alt)
    ));
}

fn add_link_button(ctx: &mut Context, href: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    let href = if href.is_empty() { "#" } else { href };
    ctx.add_line(&format!(
        "<a class=\"button\" href=\"{}\">{}</a>",
        escape_html(href),
        escape_html(text)
    ));
}

fn compile_hero(fields: &Fields, index: usize, anchor: &str, ctx: &mut Context) {
    let background = css_color(fields.text("backgroundColor"), "transparent");
    ctx.open(&format!(
        "<section id=\"{}\" class=\"part part-hero\" style=\"background-color: {}\">",
        escape_html(anchor),
        background
    ));

    ctx.open("<div class=\"hero-content\">");
    ctx.add_text_element("h1", "", fields.text("title"));
    ctx.add_text_element("p", " class=\"hero-subtitle\"", fields.text("subtitle"));
    let description = fields.text("description");
    if !description.is_empty() {
        ctx.add_line(&format!(
            "<p class=\"hero-description\">{}</p>",
            escape_multiline(description)
        ));
    }
    add_link_button(ctx, fields.text("buttonLink"), fields.text("buttonText"));
    ctx.close("</div>");

    if let Some(image) = fields.asset("image") {
        ctx.open("<div class=\"hero-image\">");
        add_image(ctx, "hero-img", AssetRole::PartImage { part: index }, image, fields.text("title"));
        ctx.close("</div>");
    }

    ctx.close("</section>");
}

fn compile_features(fields: &Fields, ctx: &mut Context) {
    ctx.add_text_element("h2", "", fields.text("title"));
    ctx.open("<div class=\"features-grid\">");
    for item in fields.items("items") {
        ctx.open("<div class=\"feature-card\">");
        ctx.add_text_element("div", " class=\"feature-icon\"", item.text("icon"));
        ctx.add_text_element("h3", "", item.text("title"));
        ctx.add_text_element("p", "", item.text("description"));
        let link = item.text("link");
        if !link.is_empty() {
            ctx.add_line(&format!("<a href=\"{}\">Learn more</a>", escape_html(link)));
        }
        ctx.close("</div>");
    }
    ctx.close("</div>");
}

fn compile_pricing(fields: &Fields, ctx: &mut Context) {
    ctx.add_text_element("h2", "", fields.text("title"));
    ctx.open("<div class=\"pricing-grid\">");
    for plan in fields.items("plans") {
        ctx.open("<div class=\"pricing-card\">");
        ctx.add_text_element("h3", "", plan.text("name"));
        ctx.add_text_element("p", " class=\"price\"", plan.text("price"));
        let features = plan.lines("features");
        if !features.is_empty() {
            ctx.open("<ul>");
            for feature in features {
                ctx.add_text_element("li", "", feature);
            }
            ctx.close("</ul>");
        }
        add_link_button(ctx, plan.text("link"), "Choose plan");
        ctx.close("</div>");
    }
    ctx.close("</div>");
}

fn compile_contact(fields: &Fields, ctx: &mut Context) {
    ctx.add_text_element("h2", "", fields.text("title"));
    let description = fields.text("description");
    if !description.is_empty() {
        ctx.add_line(&format!("<p>{}</p>", escape_multiline(description)));
    }

    let email = fields.text("email");
    let phone = fields.text("phone");
    let address = fields.text("address");
    if !(email.is_empty() && phone.is_empty() && address.is_empty()) {
        ctx.open("<ul class=\"contact-info\">");
        if !email.is_empty() {
            let email = escape_html(email);
            ctx.add_line(&format!("<li><a href=\"mailto:{}\">{}</a></li>", email, email));
        }
        if !phone.is_empty() {
            let phone = escape_html(phone);
            ctx.add_line(&format!("<li><a href=\"tel:{}\">{}</a></li>", phone, phone));
        }
        if !address.is_empty() {
            ctx.add_line(&format!("<li>{}</li>", escape_multiline(address)));
        }
        ctx.close("</ul>");
    }

    ctx.open("<form class=\"contact-form\">");
    ctx.add_line("<input type=\"text\" name=\"name\" placeholder=\"Name\" required>");
    ctx.add_line("<input type=\"email\" name=\"email\" placeholder=\"Email\" required>");
    ctx.add_line("<textarea name=\"message\" rows=\"5\" placeholder=\"Message\" required></textarea>");
    let button = match fields.text("buttonText") {
        "" => "Send",
        text => text,
    };
    ctx.add_line(&format!(
        "<button type=\"submit\" class=\"button\">{}</button>",
        escape_html(button)
    ));
    ctx.close("</form>");
}

fn compile_testimonials(fields: &Fields, index: usize, ctx: &mut Context) {
    ctx.add_text_element("h2", "", fields.text("title"));
    ctx.open("<div class=\"testimonial-grid\">");
    for (item_index, item) in fields.items("items").iter().enumerate() {
        ctx.open("<blockquote class=\"testimonial-card\">");
        if let Some(image) = item.asset("image") {
            let role = AssetRole::ItemImage {
                part: index,
                item: item_index,
            };
            add_image(ctx, "avatar", role, image, item.text("name"));
        }
        let comment = item.text("comment");
        if !comment.is_empty() {
            ctx.add_line(&format!("<p>{}</p>", escape_multiline(comment)));
        }
        ctx.add_line(&format!(
            "<footer><strong>{}</strong> <span>{}</span></footer>",
            escape_html(item.text("name")),
            escape_html(item.text("role"))
        ));
        ctx.close("</blockquote>");
    }
    ctx.close("</div>");
}

fn compile_about(fields: &Fields, index: usize, ctx: &mut Context) {
    ctx.add_text_element("h2", "", fields.text("title"));
    ctx.open("<div class=\"about-body\">");
    if let Some(image) = fields.asset("image") {
        add_image(ctx, "about-img", AssetRole::PartImage { part: index }, image, fields.text("title"));
    }
    let description = fields.text("description");
    if !description.is_empty() {
        ctx.add_line(&format!("<p>{}</p>", escape_multiline(description)));
    }
    ctx.close("</div>");
}

fn compile_gallery(fields: &Fields, index: usize, ctx: &mut Context) {
    ctx.add_text_element("h2", "", fields.text("title"));
    let images = fields.images("images");
    if images.is_empty() {
        if ctx.options.mode == RenderMode::Preview {
            ctx.add_line("<p class=\"gallery-empty\">No images yet</p>");
        }
        return;
    }

    ctx.open("<div class=\"gallery-grid\">");
    for (image_index, image) in images.iter().enumerate() {
        let role = AssetRole::GalleryImage {
            part: index,
            index: image_index,
        };
        let alt = format!("{} {}", fields.text("title"), image_index + 1);
        add_image(ctx, "gallery-img", role, image, alt.trim());
    }
    ctx.close("</div>");
}

fn compile_blog(fields: &Fields, index: usize, ctx: &mut Context) {
    ctx.add_text_element("h2", "", fields.text("title"));
    ctx.open("<div class=\"blog-grid\">");
    for (post_index, post) in fields.items("posts").iter().enumerate() {
        ctx.open("<article class=\"blog-post\">");
        if let Some(image) = post.asset("image") {
            let role = AssetRole::ItemImage {
                part: index,
                item: post_index,
            };
            add_image(ctx, "post-img", role, image, post.text("title"));
        }
        let date = post.text("date");
        if !date.is_empty() {
            let date = escape_html(date);
            ctx.add_line(&format!("<time datetime=\"{}\">{}</time>", date, date));
        }
        let title = escape_html(post.text("title"));
        match post.text("link") {
            "" => ctx.add_line(&format!("<h3>{}</h3>", title)),
            link => ctx.add_line(&format!(
                "<h3><a href=\"{}\">{}</a></h3>",
                escape_html(link),
                title
            )),
        }
        ctx.add_text_element("p", "", post.text("excerpt"));
        ctx.close("</article>");
    }
    ctx.close("</div>");
}

fn compile_faq(fields: &Fields, ctx: &mut Context) {
    ctx.add_text_element("h2", "", fields.text("title"));
    for item in fields.items("items") {
        ctx.open("<details class=\"faq-item\">");
        ctx.add_text_element("summary", "", item.text("question"));
        let answer = item.text("answer");
        if !answer.is_empty() {
            ctx.add_line(&format!("<p>{}</p>", escape_multiline(answer)));
        }
        ctx.close("</details>");
    }
}

fn compile_footer(fields: &Fields, ctx: &mut Context) {
    let background = css_color(fields.text("backgroundColor"), "#333333");
    let color = css_color(fields.text("textColor"), "#ffffff");
    ctx.open(&format!(
        "<footer class=\"part part-footer\" style=\"background-color: {}; color: {}\">",
        background, color
    ));
    ctx.add_line(&format!(
        "<p>&copy; {}. All rights reserved.</p>",
        escape_html(fields.text("companyName"))
    ));
    ctx.close("</footer>");
}
