//! GitHub-flavored markdown renderer.
//!
//! Code blocks cannot carry highlighting, so matches are listed in a table
//! with their position and the trace follows verbatim in a fence.

use crate::analyzer::highlight_spans;
use crate::render::{Renderer, Report};
use anyhow::Result;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String> {
        let mut lines: Vec<String> = Vec::new();

        if let Some(source) = report.source {
            lines.push(format!("# {}\n", source));
        }

        lines.push("## Summary\n".to_string());
        for line in report.analysis.summary.lines() {
            lines.push(format!("* {}", line));
        }
        lines.push(String::new());

        let spans = highlight_spans(&report.analysis.results);
        if !spans.is_empty() {
            lines.push("## Matches\n".to_string());
            lines.push("| Label | Offset | Text |".to_string());
            lines.push("|-------|--------|------|".to_string());
            for span in &spans {
                let text = report.text.get(span.start..span.end).unwrap_or("");
                lines.push(format!(
                    "| {} | {}..{} | {} |",
                    span.kind.label(),
                    span.start,
                    span.end,
                    table_cell(text)
                ));
            }
            lines.push(String::new());
        }

        lines.push("## Trace\n".to_string());
        let fence = fence_for(report.text);
        lines.push(fence.clone());
        lines.push(report.text.trim_end_matches('\n').to_string());
        lines.push(fence);

        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Inline code cell; pipes are escaped and newlines flattened.
fn table_cell(text: &str) -> String {
    let flat = text.replace('\r', "").replace('\n', " ").replace('|', "\\|");
    format!("`{}`", flat.replace('`', "'"))
}

/// A backtick fence longer than any backtick run inside the text.
fn fence_for(text: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat(longest.max(2) + 1)
}
