//! Utility helpers shared across the WASM frontend.

use chrono::{Local, TimeZone};
use uuid::Uuid;

use crate::constants::RUN_LABEL_FALLBACK;

/// Join a sequence of optional class names into a single `class` attribute
/// value.
///
/// `None` entries and empty strings are dropped so call sites can pass
/// conditional classes inline without building intermediate vectors:
///
/// ```ignore
/// let class = join_class_names([
///     Some("panel"),
///     if active { Some("panel-active") } else { None },
/// ]);
/// ```
pub fn join_class_names<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Format the suffix appended to a workflow run name, e.g. `" (14:05:09)"`.
///
/// `finished_at` is seconds since UNIX epoch; the wall-clock time is rendered
/// in the viewer's local timezone. Runs without a finish time get the
/// `"running"` placeholder instead.
pub fn format_run_label(finished_at: Option<i64>) -> String {
    format_run_label_or(finished_at, RUN_LABEL_FALLBACK)
}

/// Like [`format_run_label`] but with a caller-supplied placeholder for runs
/// that have not finished yet.
pub fn format_run_label_or(finished_at: Option<i64>, fallback: &str) -> String {
    let finished = finished_at.and_then(|secs| Local.timestamp_opt(secs, 0).single());
    match finished {
        Some(at) => format!(" ({})", at.format("%H:%M:%S")),
        None => format!(" ({})", fallback),
    }
}

/// Generate a fresh 128-bit identifier in hyphenated UUID form.
///
/// Used for checklist items, value selectors and other client-side records
/// that need an id before the backend has seen them.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Truncate `text` to at most `max_graphemes` user-perceived characters,
/// appending an ellipsis when anything was cut.
///
/// Counting grapheme clusters instead of bytes keeps multi-byte characters
/// and emoji sequences intact.
pub fn truncate_graphemes(text: &str, max_graphemes: usize) -> String {
    use unicode_segmentation::UnicodeSegmentation;

    let graphemes: Vec<&str> = text.graphemes(true).collect();

    if graphemes.len() <= max_graphemes {
        text.to_string()
    } else {
        format!("{}...", graphemes[..max_graphemes].concat())
    }
}

// Native unit tests -----------------------------------------------------------
