//! Job candidates discovered by a search run.
//!
//! The agent's search result is free-form JSON. [`normalize_candidates`]
//! accepts either a bare array or an object wrapping an array and never
//! fails: anything else yields an empty list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::goals::{PLACEHOLDER_COMPANY, PLACEHOLDER_TITLE};

/// Field name preferred when the result is an object wrapping the list.
pub const NESTED_JOBS_FIELD: &str = "jobs";

/// One discovered posting. Immutable once produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl JobCandidate {
    /// Build a candidate from one element of the agent's result list.
    ///
    /// Non-object elements produce an empty candidate, which is later
    /// skipped for lacking an application URL.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let text = |keys: &[&str]| {
            keys.iter().find_map(|k| match obj.get(*k) {
                Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
        };

        Self {
            title: text(&["title"]),
            company: text(&["company"]),
            location: text(&["location"]),
            application_url: text(&["application_url", "url"]),
            description: text(&["description"]),
            posted_date: text(&["posted_date"]),
            board: text(&["board", "source"]),
            external_id: text(&["id", "job_id", "external_id"]),
        }
    }

    /// Tag the candidate with the board it was found on, unless it already
    /// names one.
    pub fn with_board(mut self, board: &str) -> Self {
        if self.board.is_none() {
            self.board = Some(board.to_string());
        }
        self
    }

    /// Title for display and goal rendering.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(PLACEHOLDER_TITLE)
    }

    /// Company for display and goal rendering.
    pub fn display_company(&self) -> &str {
        self.company.as_deref().unwrap_or(PLACEHOLDER_COMPANY)
    }
}

/// Extract the list of raw job entries from a search result payload.
///
/// - an array is returned as-is;
/// - an object returns its `jobs` array, or else its first array-valued
///   field;
/// - anything else returns an empty slice.
pub fn result_entries(result: &Value) -> &[Value] {
    match result {
        Value::Array(items) => items,
        Value::Object(obj) => obj
            .get(NESTED_JOBS_FIELD)
            .and_then(Value::as_array)
            .or_else(|| obj.values().find_map(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// Normalize a search result payload into candidates, preserving order.
pub fn normalize_candidates(result: &Value) -> Vec<JobCandidate> {
    result_entries(result)
        .iter()
        .map(JobCandidate::from_value)
        .collect()
}
