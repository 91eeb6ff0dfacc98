//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the summary, the per-matcher results, and the highlight
//! segments, so another UI can redo the highlighting without re-parsing.

use crate::analyzer::render_highlighted;
use crate::model::*;
use crate::render::{Renderer, Report};
use anyhow::{Context, Result};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct JsonReport<'a> {
    source: Option<&'a str>,
    summary: &'a str,
    results: &'a [MatcherResult],
    segments: Vec<Segment<'a>>,
}

impl Renderer for JsonRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String> {
        let doc = JsonReport {
            source: report.source,
            summary: &report.analysis.summary,
            results: &report.analysis.results,
            segments: render_highlighted(report.text, &report.analysis.results),
        };
        let mut out = serde_json::to_string_pretty(&doc).context("failed to serialize report")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
