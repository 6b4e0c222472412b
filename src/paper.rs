//! Canonical paper record and schema-variant field extraction.
//!
//! The two OpenReview API versions store note content differently: the
//! legacy (v1) schema keeps each field as a direct value, the current (v2)
//! schema nests each field under a `value` key. [`Schema`] selects one
//! mapping function per variant behind a single `extract` entry point, so
//! the variant-specific key paths stay in two small, independently testable
//! units.

use crate::error::{DownloadError, Result};
use crate::note::Note;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Base URL relative PDF paths are resolved against
const OPENREVIEW_BASE: &str = "https://openreview.net/";

/// Canonical, serialization-ready record for one accepted paper.
///
/// A `Paper` is a pure projection of one remote note plus the
/// caller-supplied year; it is never mutated after construction.
/// `id` always equals `paperhash` (both come from the same source field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub author_ids: Vec<String>,
    pub keywords: Vec<String>,
    /// One-line summary; absent in many records, serialized as null
    pub tldr: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Primary subject area; absent entirely in the legacy schema
    pub primary_area: Option<String>,
    /// Human-readable venue label
    pub venue: String,
    /// Machine-readable venue identifier
    pub venue_id: String,
    pub pdf_url: String,
    pub bibtex: String,
    pub paperhash: String,
    /// Caller-supplied year, not extracted from the remote data
    pub year: i32,
}

/// Which of the two API content shapes a venue uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// v1: direct values under named keys
    Legacy,
    /// v2: each field nested as `{"value": ...}`
    Current,
}

impl Schema {
    /// Map one note into a [`Paper`], stamping `year` onto the record.
    pub fn extract(&self, note: &Note, year: i32) -> Result<Paper> {
        match self {
            Schema::Legacy => extract_legacy(note, year),
            Schema::Current => extract_current(note, year),
        }
    }
}

/// Legacy (v1) mapping: `content[name]` holds the value directly.
fn extract_legacy(note: &Note, year: i32) -> Result<Paper> {
    let text = |name: &str| required_str(note, note.content.get(name), name);
    let list = |name: &str| required_str_list(note, note.content.get(name), name);

    let paperhash = text("paperhash")?;

    Ok(Paper {
        id: paperhash.clone(),
        title: text("title")?,
        authors: list("authors")?,
        author_ids: list("authorids")?,
        keywords: list("keywords")?,
        tldr: optional_str(note.content.get("one-sentence_summary")),
        abstract_text: text("abstract")?,
        primary_area: None,
        venue: text("venue")?,
        venue_id: text("venueid")?,
        pdf_url: resolve_pdf_url(&text("pdf")?)?,
        bibtex: text("_bibtex")?,
        paperhash,
        year,
    })
}

/// Current (v2) mapping: `content[name]["value"]` holds the value.
fn extract_current(note: &Note, year: i32) -> Result<Paper> {
    let value = |name: &str| note.content.get(name).and_then(|v| v.get("value"));
    let text = |name: &str| required_str(note, value(name), name);
    let list = |name: &str| required_str_list(note, value(name), name);

    let paperhash = text("paperhash")?;

    Ok(Paper {
        id: paperhash.clone(),
        title: text("title")?,
        authors: list("authors")?,
        author_ids: list("authorids")?,
        keywords: list("keywords")?,
        tldr: optional_str(value("TLDR")),
        abstract_text: text("abstract")?,
        primary_area: Some(text("primary_area")?),
        venue: text("venue")?,
        venue_id: text("venueid")?,
        pdf_url: resolve_pdf_url(&text("pdf")?)?,
        bibtex: text("_bibtex")?,
        paperhash,
        year,
    })
}

/// Resolve a PDF path against the OpenReview base URL.
///
/// Relative paths (e.g. `/pdf?id=...`) become absolute; already-absolute
/// URLs pass through unchanged (standard relative-resolution semantics).
fn resolve_pdf_url(path: &str) -> Result<String> {
    let base = Url::parse(OPENREVIEW_BASE)
        .map_err(|e| DownloadError::Parse(format!("bad base URL: {}", e)))?;
    let resolved = base
        .join(path)
        .map_err(|e| DownloadError::Parse(format!("bad pdf path {:?}: {}", path, e)))?;
    Ok(resolved.into())
}

fn missing(note: &Note, field: &str) -> DownloadError {
    DownloadError::SchemaMismatch {
        note: note.id.clone(),
        field: field.to_string(),
    }
}

fn required_str(note: &Note, value: Option<&Value>, field: &str) -> Result<String> {
    value
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| missing(note, field))
}

fn required_str_list(note: &Note, value: Option<&Value>, field: &str) -> Result<Vec<String>> {
    // Every element must be a string; dropping malformed entries would
    // break the authors/author_ids same-length pairing.
    value
        .and_then(Value::as_array)
        .ok_or_else(|| missing(note, field))?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or_else(|| missing(note, field))
        })
        .collect()
}

fn optional_str(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}
