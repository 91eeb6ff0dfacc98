//! Issue records as exported from the record store, and the analyzer's
//! contract with them: the summary is persisted as `error_pattern` next to
//! the verbatim `error_trace`; match results are never persisted.
//!
//! Exports are often partial (the recent-logs query selects only a handful of
//! columns), so a record is kept as the raw JSON object. Only `error_pattern`
//! is ever written; every other column round-trips untouched.

use crate::analyzer::analyze;
use crate::model::Analysis;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How many parsed logs the dashboard's "recent error logs" panel shows.
pub const RECENT_LOG_LIMIT: usize = 5;

/// One row of the `issues` table, as exported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueRecord {
    pub fields: Map<String, Value>,
}

impl IssueRecord {
    fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("id")
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    /// Verbatim pasted trace.
    pub fn error_trace(&self) -> Option<&str> {
        self.str_field("error_trace")
    }

    /// Analyzer summary of `error_trace`.
    pub fn error_pattern(&self) -> Option<&str> {
        self.str_field("error_pattern")
    }

    pub fn created_at(&self) -> Option<&str> {
        self.str_field("created_at")
    }

    /// Re-derive `error_pattern` from `error_trace`.
    ///
    /// Returns the analysis for transient highlighting. Without a trace the
    /// result is `None` and an existing `error_pattern` is nulled; a record
    /// that had no `error_pattern` column does not gain one.
    pub fn analyze_trace(&mut self) -> Option<Analysis> {
        match self.error_trace().filter(|t| !t.is_empty()) {
            Some(trace) => {
                let analysis = analyze(trace);
                self.fields.insert(
                    "error_pattern".to_string(),
                    Value::String(analysis.summary.clone()),
                );
                Some(analysis)
            }
            None => {
                if let Some(pattern) = self.fields.get_mut("error_pattern") {
                    *pattern = Value::Null;
                }
                None
            }
        }
    }

    /// Whether the unauthenticated shared view may show this issue.
    pub fn is_publicly_visible(&self) -> bool {
        self.fields.get("is_shared").and_then(Value::as_bool) == Some(true)
    }
}

/// Parse a JSON export holding either a single issue or an array of issues.
pub fn load_issues(json: &str) -> Result<Vec<IssueRecord>> {
    let value: Value = serde_json::from_str(json).context("invalid issue JSON")?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item).with_context(|| format!("invalid issue at index {}", i))
            })
            .collect(),
        Value::Object(fields) => Ok(vec![IssueRecord { fields }]),
        other => Err(anyhow!(
            "invalid issue JSON: expected an object or an array, found {}",
            json_kind(&other)
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Issues that already carry an `error_pattern`, newest first, at most `limit`.
///
/// `created_at` values are ISO-8601 timestamps from the store and compare
/// correctly as strings; records without one sort last.
pub fn recent_parsed(records: &[IssueRecord], limit: usize) -> Vec<&IssueRecord> {
    let mut parsed: Vec<&IssueRecord> = records
        .iter()
        .filter(|r| r.error_pattern().is_some())
        .collect();
    parsed.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    parsed.truncate(limit);
    parsed
}
