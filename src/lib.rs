//! tracelens — pull structured fields out of pasted error traces.
//!
//! [`analyzer::analyze`] runs a fixed battery of matchers (Node/browser
//! `Error: ... at file:line:col`, stack frames, TypeScript/ESLint compiler
//! output, missing modules, type-assignability errors, React invalid element
//! errors) and condenses the first hit of each into a short summary.
//! [`analyzer::render_highlighted`] re-slices the original text into plain and
//! highlighted segments, which the [`render`] module turns into terminal,
//! markdown, HTML, or JSON output.

pub mod analyzer;
pub mod issue;
pub mod model;
pub mod render;

pub use analyzer::{analyze, highlight_spans, render_highlighted};
pub use model::{Analysis, Color, MatchRecord, MatcherKind, MatcherResult, Segment};
