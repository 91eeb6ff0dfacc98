//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;
pub mod markdown;
pub mod text;

use crate::model::Analysis;
use anyhow::{anyhow, Result};

/// One analyzed trace, ready to render.
pub struct Report<'a> {
    /// Where the trace came from (file path), if not stdin.
    pub source: Option<&'a str>,
    /// The raw trace text.
    pub text: &'a str,
    pub analysis: &'a Analysis,
}

/// Trait for rendering a Report into a specific output format.
pub trait Renderer {
    fn render(&self, report: &Report<'_>) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
///
/// `color` only affects the terminal text format.
pub fn create_renderer(format: &str, color: bool) -> Result<Box<dyn Renderer>> {
    match format {
        "text" | "txt" => Ok(Box::new(text::TextRenderer { color })),
        "summary" => Ok(Box::new(text::SummaryRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!(
            "unknown format: {}. Use text, summary, markdown, html, or json",
            format
        )),
    }
}
