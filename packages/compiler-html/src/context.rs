use crate::compiler::CompileOptions;

/// Output buffer with indentation tracking
pub(crate) struct Context<'a> {
    pub options: &'a CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    pub fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    /// Emit a multi-line block (style sheet, script) line by line
    pub fn add_block(&mut self, block: &str) {
        for line in block.lines().filter(|l| !l.trim().is_empty()) {
            self.add_line(line);
        }
    }

    /// `<tag attrs>escaped text</tag>` on one line; skipped when text is empty
    pub fn add_text_element(&mut self, tag: &str, attrs: &str, text: &str) {
        if text.is_empty() {
            return;
        }
        self.add_line(&format!("<{}{}>{}</{}>", tag, attrs, escape_html(text), tag));
    }

    pub fn open(&mut self, tag: &str) {
        self.add_line(tag);
        self.indent();
    }

    pub fn close(&mut self, tag: &str) {
        self.dedent();
        self.add_line(tag);
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    pub fn into_output(self) -> String {
        self.buffer
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escaped text with newlines turned into `<br>`
pub fn escape_multiline(text: &str) -> String {
    escape_html(text).replace("\r\n", "\n").replace('\n', "<br>")
}

/// Colour value safe to place inside a `style` attribute or rule
pub fn css_color<'v>(value: &'v str, fallback: &'v str) -> &'v str {
    let value = value.trim();
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' ');
    if !value.is_empty() && value.chars().all(allowed) {
        value
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_entities() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_multiline() {
        assert_eq!(escape_multiline("a\nb <c>"), "a<br>b &lt;c&gt;");
    }

    #[test]
    fn test_css_color_rejects_injection() {
        assert_eq!(css_color("#ff0000", "#000"), "#ff0000");
        assert_eq!(css_color("rgb(1, 2, 3)", "#000"), "rgb(1, 2, 3)");
        assert_eq!(css_color("red;} body{display:none", "#000"), "#000");
        assert_eq!(css_color("</style>", "#000"), "#000");
        assert_eq!(css_color("", "#000"), "#000");
    }

    #[test]
    fn test_compact_output_has_no_newlines() {
        let options = CompileOptions {
            pretty: false,
            ..CompileOptions::default()
        };
        let mut ctx = Context::new(&options);
        ctx.open("<div>");
        ctx.add_text_element("p", "", "hi");
        ctx.close("</div>");
        assert_eq!(ctx.into_output(), "<div><p>hi</p></div>");
    }
}
