//! Error trace analyzer — fixed regex battery over a pasted trace.
//!
//! Each matcher runs over the whole text independently (not line by line),
//! so one character may be claimed by several matchers. The summary takes the
//! first hit of every matcher that fired, in declaration order; the
//! highlighter pools every hit and orders them by position.

use crate::model::*;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

/// Summary used when the input has no matches and an empty first line.
pub const UNKNOWN_ERROR_FORMAT: &str = "Unknown error format";

// -- Regex patterns -----------------------------------------------------------
//
// `(?R)` keeps `.` off `\r` as well as `\n`, and `[0-9]` stands in for `\d`
// so that only ASCII digits count as line/column numbers. Unlike browser
// regexes, `.` still crosses U+2028/U+2029 and `\s` also accepts U+0085.

/// `Error: <message> at <file>:<line>:<col>`
const PAT_ERROR_LOCATION: &str = r"(?R)Error:\s+(.+?)\s+at\s+(.+?):([0-9]+):([0-9]+)";

/// `at <function> (<file>:<line>:<col>)`
const PAT_STACK_ENTRY: &str = r"(?R)at\s+(.+?)\s+\((.+?):([0-9]+):([0-9]+)\)";

/// `src/app.tsx:12:5 - message`, `src/app.tsx(12,5): - message`
const PAT_COMPILER_ERROR: &str = concat!(
    r"(?R)([a-zA-Z0-9/\\._\-]+\.(?:ts|tsx|js|jsx))",
    r"(?::|\s*\(?)([0-9]+)(?::|\s*,\s*)([0-9]+)(?:\)?)?",
    r"\s*(?:-|–)\s*(.+)"
);

const PAT_MISSING_MODULE: &str = r#"Cannot find module\s*['"]([^'"]+)['"]"#;

const PAT_TYPE_ERROR: &str =
    r"(?R)Type\s+'(.+?)'\s+is\s+not\s+assignable\s+to\s+type\s+'(.+?)'";

const PAT_REACT_ERROR: &str = concat!(
    r"(?R)React.createElement:\s+type\s+is\s+invalid\s+--\s+expected\s+a\s+string",
    r"\s+or\s+a\s+class/function\s+but\s+got:\s+(.+?)\."
);

fn matcher(kind: MatcherKind, pattern: &str, color: Color) -> MatcherSpec {
    MatcherSpec {
        kind,
        pattern: Regex::new(pattern).unwrap(),
        color,
    }
}

/// The matcher table, in declaration order. Order drives summary line order.
pub static MATCHERS: LazyLock<[MatcherSpec; 6]> = LazyLock::new(|| {
    [
        matcher(MatcherKind::ErrorLocation, PAT_ERROR_LOCATION, Color::Red),
        matcher(MatcherKind::StackEntry, PAT_STACK_ENTRY, Color::Orange),
        matcher(MatcherKind::CompilerError, PAT_COMPILER_ERROR, Color::Blue),
        matcher(MatcherKind::MissingModule, PAT_MISSING_MODULE, Color::Purple),
        matcher(MatcherKind::TypeError, PAT_TYPE_ERROR, Color::Teal),
        matcher(MatcherKind::ReactError, PAT_REACT_ERROR, Color::Pink),
    ]
});

// -- Analysis -----------------------------------------------------------------

/// Analyze a pasted trace: run every matcher, keep the ones that hit, and
/// build the summary.
pub fn analyze(text: &str) -> Analysis {
    let results: Vec<MatcherResult> = MATCHERS
        .iter()
        .filter_map(|spec| {
            let matches = find_all_matches(spec, text);
            debug!(matcher = spec.kind.label(), hits = matches.len(), "matcher scanned");
            if matches.is_empty() {
                None
            } else {
                Some(MatcherResult {
                    kind: spec.kind,
                    color: spec.color,
                    matches,
                })
            }
        })
        .collect();

    let summary = if results.is_empty() {
        fallback_summary(text)
    } else {
        results
            .iter()
            .filter_map(summary_line)
            .collect::<Vec<_>>()
            .join("\n")
    };

    Analysis { summary, results }
}

/// Every non-overlapping match of one matcher, left to right.
pub fn find_all_matches(spec: &MatcherSpec, text: &str) -> Vec<MatchRecord> {
    spec.pattern
        .captures_iter(text)
        .filter_map(|caps| to_record(&caps))
        .collect()
}

fn to_record(caps: &Captures<'_>) -> Option<MatchRecord> {
    let whole = caps.get(0)?;
    let groups = caps
        .iter()
        .skip(1)
        .map(|g| g.map(|m| m.as_str().to_string()).unwrap_or_default())
        .collect();
    Some(MatchRecord {
        full_match: whole.as_str().to_string(),
        groups,
        start: whole.start(),
        end: whole.end(),
    })
}

/// One summary line from the first match of a result.
fn summary_line(result: &MatcherResult) -> Option<String> {
    let first = result.matches.first()?;
    let g = |i| first.group(i);
    let line = match result.kind {
        MatcherKind::ErrorLocation => format!(
            "Error in {} at line {}, column {}: {}",
            g(1),
            g(2),
            g(3),
            g(0)
        ),
        MatcherKind::StackEntry => format!("Stack: {} in {} at line {}", g(0), g(1), g(2)),
        MatcherKind::CompilerError => format!("{}:{}:{} - {}", g(0), g(1), g(2), g(3)),
        MatcherKind::MissingModule => format!("Missing module: {}", g(0)),
        MatcherKind::TypeError => format!(
            "Type '{}' is not assignable to type '{}'",
            g(0),
            g(1)
        ),
        MatcherKind::ReactError => format!("React error: invalid element type {}", g(0)),
    };
    Some(line)
}

/// Trimmed first line of the input, or [`UNKNOWN_ERROR_FORMAT`].
fn fallback_summary(text: &str) -> String {
    let first_line = text.split('\n').next().unwrap_or("").trim();
    if first_line.is_empty() {
        UNKNOWN_ERROR_FORMAT.to_string()
    } else {
        first_line.to_string()
    }
}

// -- Highlighting -------------------------------------------------------------

/// Pool every match from every result and stable-sort by start offset.
/// Overlapping spans are kept as-is.
pub fn highlight_spans(results: &[MatcherResult]) -> Vec<HighlightSpan> {
    let mut spans: Vec<HighlightSpan> = results
        .iter()
        .flat_map(|result| {
            result.matches.iter().map(move |m| HighlightSpan {
                start: m.start,
                end: m.end,
                kind: result.kind,
                color: result.color,
            })
        })
        .collect();
    spans.sort_by_key(|span| span.start);
    spans
}

/// Split `text` into plain and highlighted segments.
///
/// Walks the sorted spans with a cursor: a plain gap is emitted only when a
/// span starts past the cursor, the span itself is always emitted, and the
/// cursor jumps to the span's end. A span starting before the cursor
/// (overlap between matchers) therefore repeats text already emitted, and
/// concatenating the segments no longer reproduces the input.
pub fn render_highlighted<'a>(text: &'a str, results: &[MatcherResult]) -> Vec<Segment<'a>> {
    if text.is_empty() || results.is_empty() {
        return vec![Segment::plain(text)];
    }

    let mut segments = Vec::new();
    let mut cursor = 0;
    for span in highlight_spans(results) {
        if span.start > cursor {
            segments.push(Segment::plain(slice(text, cursor, span.start)));
        }
        segments.push(Segment::styled(
            slice(text, span.start, span.end),
            span.kind,
            span.color,
        ));
        cursor = span.end;
    }
    if cursor < text.len() {
        segments.push(Segment::plain(slice(text, cursor, text.len())));
    }
    segments
}

/// Slice with offsets clamped to `text` and swapped when reversed, so offsets
/// from another text never panic. Yields `""` only when a clamped offset falls
/// inside a multi-byte character.
fn slice(text: &str, start: usize, end: usize) -> &str {
    let len = text.len();
    let (a, b) = (start.min(len), end.min(len));
    let (a, b) = if a > b { (b, a) } else { (a, b) };
    text.get(a..b).unwrap_or("")
}
