//! Data model for analyzed traces — format-agnostic.

use regex::Regex;
use serde::{Serialize, Serializer};

/// Which error dialect a matcher detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    ErrorLocation,
    StackEntry,
    CompilerError,
    MissingModule,
    TypeError,
    ReactError,
}

impl MatcherKind {
    /// Display label, also used as the tooltip of a highlighted span.
    pub fn label(self) -> &'static str {
        match self {
            MatcherKind::ErrorLocation => "Error Location",
            MatcherKind::StackEntry => "Stack Entry",
            MatcherKind::CompilerError => "Compiler Error",
            MatcherKind::MissingModule => "Missing Module",
            MatcherKind::TypeError => "Type Error",
            MatcherKind::ReactError => "React Error",
        }
    }
}

impl Serialize for MatcherKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Color tag attached to a matcher. Renderers map it to their own styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Blue,
    Purple,
    Teal,
    Pink,
    Gray,
}

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Teal => "teal",
            Color::Pink => "pink",
            Color::Gray => "gray",
        }
    }
}

/// A fixed matcher: pattern plus the metadata the summary and highlighter use.
#[derive(Debug)]
pub struct MatcherSpec {
    pub kind: MatcherKind,
    pub pattern: Regex,
    pub color: Color,
}

/// One match of a matcher's pattern against the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    pub full_match: String,
    /// Capture groups 1..n; a group that did not participate is `""`.
    pub groups: Vec<String>,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
}

impl MatchRecord {
    /// Capture group by zero-based index (group 1 is `group(0)`).
    pub fn group(&self, index: usize) -> &str {
        self.groups.get(index).map(String::as_str).unwrap_or("")
    }
}

/// All matches of one matcher, in order of occurrence. Never empty once
/// returned from [`crate::analyzer::analyze`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatcherResult {
    #[serde(rename = "label")]
    pub kind: MatcherKind,
    pub color: Color,
    pub matches: Vec<MatchRecord>,
}

impl MatcherResult {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// Flattened, position-sorted view of every match across all matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "label")]
    pub kind: MatcherKind,
    pub color: Color,
}

/// Style applied to a highlighted segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentStyle {
    #[serde(rename = "label")]
    pub kind: MatcherKind,
    pub color: Color,
}

/// A slice of the input text, highlighted or plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub style: Option<SegmentStyle>,
}

impl<'a> Segment<'a> {
    pub fn plain(text: &'a str) -> Self {
        Segment { text, style: None }
    }

    pub fn styled(text: &'a str, kind: MatcherKind, color: Color) -> Self {
        Segment {
            text,
            style: Some(SegmentStyle { kind, color }),
        }
    }
}

/// Result of [`crate::analyzer::analyze`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Multi-line summary, suitable for storing as an issue's `error_pattern`.
    pub summary: String,
    /// Matchers that found something, in declaration order.
    pub results: Vec<MatcherResult>,
}
