//! HTML renderer — standalone page with the summary and a highlighted trace.

use crate::analyzer::render_highlighted;
use crate::model::*;
use crate::render::{Renderer, Report};
use anyhow::Result;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String> {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        if let Some(source) = report.source {
            out.push_str(&format!("<title>{}</title>\n", html_escape(source)));
        }
        out.push_str("<style>\n");
        out.push_str("body { font-family: system-ui, sans-serif; max-width: 60em; margin: 2em auto; padding: 0 1em; }\n");
        out.push_str(".trace { font-family: ui-monospace, monospace; font-size: 0.85em; background: #f9fafb; padding: 1em; border-radius: 5px; white-space: pre-wrap; }\n");
        out.push_str(".plain { color: #9ca3af; }\n");
        out.push_str(".hl { padding: 0 0.25em; border-radius: 3px; border: 1px solid; font-weight: 600; }\n");
        for color in [
            Color::Red,
            Color::Orange,
            Color::Blue,
            Color::Purple,
            Color::Teal,
            Color::Pink,
            Color::Gray,
        ] {
            let (bg, fg, border) = palette(color);
            out.push_str(&format!(
                ".hl-{} {{ background: {}; color: {}; border-color: {}; }}\n",
                color.name(),
                bg,
                fg,
                border
            ));
        }
        out.push_str("</style>\n");
        out.push_str("</head>\n<body>\n");

        if let Some(source) = report.source {
            out.push_str(&format!("<h1>{}</h1>\n", html_escape(source)));
        }

        out.push_str("<h2>Summary</h2>\n<ul class=\"summary\">\n");
        for line in report.analysis.summary.lines() {
            out.push_str(&format!("  <li>{}</li>\n", html_escape(line)));
        }
        out.push_str("</ul>\n");

        out.push_str("<h2>Trace</h2>\n");
        out.push_str(&render_trace_html(report.text, &report.analysis.results));
        out.push('\n');

        out.push_str("</body>\n</html>\n");
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

/// Trace block: a bare `<pre>` when nothing matched, otherwise one span per
/// segment with the matcher label as tooltip.
fn render_trace_html(text: &str, results: &[MatcherResult]) -> String {
    if text.is_empty() || results.is_empty() {
        return format!("<pre class=\"trace\">{}</pre>", html_escape(text));
    }

    let mut out = String::from("<div class=\"trace\">");
    for segment in render_highlighted(text, results) {
        match segment.style {
            Some(style) => out.push_str(&format!(
                "<span class=\"hl hl-{}\" title=\"{}\">{}</span>",
                style.color.name(),
                html_escape(style.kind.label()),
                html_escape(segment.text)
            )),
            None => out.push_str(&format!(
                "<span class=\"plain\">{}</span>",
                html_escape(segment.text)
            )),
        }
    }
    out.push_str("</div>");
    out
}

/// (background, text, border) per color tag.
fn palette(color: Color) -> (&'static str, &'static str, &'static str) {
    match color {
        Color::Red => ("#fee2e2", "#991b1b", "#fecaca"),
        Color::Orange => ("#ffedd5", "#9a3412", "#fed7aa"),
        Color::Blue => ("#dbeafe", "#1e40af", "#bfdbfe"),
        Color::Purple => ("#f3e8ff", "#6b21a8", "#e9d5ff"),
        Color::Teal => ("#ccfbf1", "#115e59", "#99f6e4"),
        Color::Pink => ("#fce7f3", "#9d174d", "#fbcfe8"),
        Color::Gray => ("#f3f4f6", "#1f2937", "#e5e7eb"),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
