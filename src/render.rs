//! Rendering of decorated text
//!
//! A `TokenRenderer` wraps the text of a marked run in its visual form.
//! Two renderers ship with the crate: HTML spans carrying the mark's class
//! name, and ANSI escape sequences styled through a `Theme`.

use crate::decorate::{AnnotationBuffer, Mark};
use crate::theme::Theme;

/// Maps a syntax-token mark and its text to a visual wrapper
pub trait TokenRenderer {
    /// Wrap the text of a marked run
    fn render(&self, mark: &Mark, children: &str) -> String;

    /// Render text carrying no syntax-token mark
    fn plain(&self, text: &str) -> String {
        text.to_string()
    }
}

impl<F> TokenRenderer for F
where
    F: Fn(&Mark, &str) -> String,
{
    fn render(&self, mark: &Mark, children: &str) -> String {
        self(mark, children)
    }
}

/// `<span class="...">` wrapper
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl TokenRenderer for HtmlRenderer {
    fn render(&self, mark: &Mark, children: &str) -> String {
        format!(
            r#"<span class="{}">{}</span>"#,
            escape_html(&mark.class_name),
            escape_html(children)
        )
    }

    fn plain(&self, text: &str) -> String {
        escape_html(text)
    }
}

/// Terminal renderer using crossterm styles
#[derive(Debug, Clone, Default)]
pub struct AnsiRenderer {
    theme: Theme,
}

impl AnsiRenderer {
    /// Create a renderer with a theme
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Get the theme
    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl TokenRenderer for AnsiRenderer {
    fn render(&self, mark: &Mark, children: &str) -> String {
        match self.theme.style_for(mark) {
            Some(style) if !style.is_default() => {
                style.to_content_style().apply(children).to_string()
            }
            _ => children.to_string(),
        }
    }
}

/// Escape text for HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render a whole annotation buffer, run by run
pub fn render_buffer(buffer: &AnnotationBuffer, renderer: &dyn TokenRenderer) -> String {
    let mut out = String::new();
    for run in buffer.runs() {
        match run.token_mark() {
            Some(mark) => out.push_str(&renderer.render(mark, &run.text)),
            None => out.push_str(&renderer.plain(&run.text)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorate::Label;

    fn keyword() -> Mark {
        Mark::token("token", &Label::extend(None, "keyword", None))
    }

    fn buffer() -> AnnotationBuffer {
        let mut buffer = AnnotationBuffer::from_text("var a<b;");
        buffer.write(0..3, &keyword());
        buffer.write(4..5, &Mark::new("bold", "bold"));
        buffer
    }

    #[test]
    fn test_html_render() {
        let html = render_buffer(&buffer(), &HtmlRenderer);
        assert_eq!(html, r#"<span class="token keyword">var</span> a&lt;b;"#);
    }

    #[test]
    fn test_html_escapes_class_and_text() {
        let mark = Mark::new("syntax-token", "a\"b");
        assert_eq!(
            HtmlRenderer.render(&mark, "<&>"),
            r#"<span class="a&quot;b">&lt;&amp;&gt;</span>"#
        );
    }

    #[test]
    fn test_closure_renderer() {
        let brackets = |mark: &Mark, children: &str| format!("[{}:{}]", mark.class_name, children);
        assert_eq!(render_buffer(&buffer(), &brackets), "[token keyword:var] a<b;");
    }

    #[test]
    fn test_ansi_render() {
        let ansi = AnsiRenderer::default();
        let rendered = ansi.render(&keyword(), "var");
        assert!(rendered.contains("var"));
        assert!(rendered.starts_with('\x1b'));

        let punctuation = Mark::token("token", &Label::extend(None, "punctuation", None));
        assert_eq!(ansi.render(&punctuation, ";"), ";");
        assert_eq!(ansi.plain("x"), "x");
    }
}
