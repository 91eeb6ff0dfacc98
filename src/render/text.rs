//! Terminal renderers — plain summary, and summary plus ANSI-highlighted trace.

use crate::analyzer::render_highlighted;
use crate::model::*;
use crate::render::{Renderer, Report};
use anyhow::Result;

const RESET: &str = "\x1b[0m";

/// Summary followed by the trace with every match highlighted.
pub struct TextRenderer {
    pub color: bool,
}

/// Just the summary, as it would be stored in an issue's `error_pattern`.
pub struct SummaryRenderer;

impl Renderer for TextRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String> {
        let mut out = String::new();

        if let Some(source) = report.source {
            out.push_str(&format!("==> {} <==\n", source));
        }

        out.push_str("Summary:\n");
        for line in report.analysis.summary.lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }

        if !report.analysis.results.is_empty() {
            out.push_str("Matches:\n");
            for result in &report.analysis.results {
                out.push_str(&format!(
                    "  {}: {}\n",
                    result.label(),
                    result.matches.len()
                ));
            }
        }

        out.push_str("Trace:\n");
        for segment in render_highlighted(report.text, &report.analysis.results) {
            match segment.style {
                Some(style) if self.color => {
                    out.push_str(ansi_code(style.color));
                    out.push_str(segment.text);
                    out.push_str(RESET);
                }
                _ => out.push_str(segment.text),
            }
        }
        if !out.ends_with('\n') {
            out.push('\n');
        }

        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

impl Renderer for SummaryRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String> {
        Ok(format!("{}\n", report.analysis.summary))
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

/// Bold SGR sequence per color tag. Orange and pink use the 256-color palette.
fn ansi_code(color: Color) -> &'static str {
    match color {
        Color::Red => "\x1b[1;31m",
        Color::Orange => "\x1b[1;38;5;208m",
        Color::Blue => "\x1b[1;34m",
        Color::Purple => "\x1b[1;35m",
        Color::Teal => "\x1b[1;36m",
        Color::Pink => "\x1b[1;38;5;205m",
        Color::Gray => "\x1b[1;90m",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze;

    fn render(text: &str, color: bool) -> String {
        let analysis = analyze(text);
        let report = Report {
            source: None,
            text,
            analysis: &analysis,
        };
        TextRenderer { color }.render(&report).unwrap()
    }

    #[test]
    fn plain_output_keeps_trace() {
        let out = render("Cannot find module 'left-pad'", false);
        assert_eq!(
            out,
            "Summary:\n  Missing module: left-pad\nMatches:\n  Missing Module: 1\nTrace:\nCannot find module 'left-pad'\n"
        );
    }

    #[test]
    fn colored_output_wraps_matches() {
        let out = render("oops: Cannot find module 'x'", true);
        assert!(out.contains("oops: \x1b[1;35mCannot find module 'x'\x1b[0m"));
    }

    #[test]
    fn no_match_has_no_escape_codes() {
        let out = render("segfault", true);
        assert!(!out.contains('\x1b'));
        assert!(out.starts_with("Summary:\n  segfault\nTrace:\n"));
    }

    #[test]
    fn source_header() {
        let analysis = analyze("");
        let report = Report {
            source: Some("logs/ci.log"),
            text: "",
            analysis: &analysis,
        };
        let out = TextRenderer { color: false }.render(&report).unwrap();
        assert!(out.starts_with("==> logs/ci.log <==\nSummary:\n  Unknown error format\n"));
    }

    #[test]
    fn summary_only() {
        let analysis = analyze("Type 'A' is not assignable to type 'B'");
        let report = Report {
            source: None,
            text: "",
            analysis: &analysis,
        };
        let out = SummaryRenderer.render(&report).unwrap();
        assert_eq!(out, "Type 'A' is not assignable to type 'B'\n");
    }
}
