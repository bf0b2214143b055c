//! Markdown fields (titles, copy, article bodies) rendered to HTML.

use maud::{Markup, PreEscaped};
use pulldown_cmark::{Event, Options, Parser, html as md_html};

/// Renders markdown to HTML. Raw HTML in the source is escaped, not passed through.
#[must_use]
pub fn render_markdown(source: &str) -> Markup {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    PreEscaped(body_html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_markdown() {
        let html = render_markdown("We build **fast** sites").into_string();
        assert_eq!(html.trim(), "<p>We build <strong>fast</strong> sites</p>");
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("<script>alert(1)</script>").into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_tables_enabled() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |").into_string();
        assert!(html.contains("<table>"));
    }
}
