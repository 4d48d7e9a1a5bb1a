//! Document loading
//!
//! Deserializes a [`Document`] from JSON or YAML. The serialized shape is
//!
//! ```text
//! { "title": "...",
//!   "chapters": [ { "number"?: 1, "title"?: "...", "lines": ["...", { "number"?: 2, "text": "..." }] } ] }
//! ```
//!
//! Explicit numbers are optional, but when present they must match the position of the
//! chapter or line; a gap or reordering is rejected rather than renumbered.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::document::{Chapter, Document, Line};
use crate::errors::{invalid_document, io_error, load_error, Result, TextbitesError};

/// Serialization formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension (`json`, `yaml`, `yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(DocumentFormat::Json),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            _ => None,
        }
    }
}

// ============================================================================
// SERIALIZED SHAPE
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentRecord {
    title: String,
    chapters: Vec<ChapterRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChapterRecord {
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    title: Option<String>,
    lines: Vec<LineRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LineRecord {
    Text(String),
    Numbered {
        #[serde(default)]
        number: Option<u32>,
        text: String,
    },
}

impl LineRecord {
    fn into_parts(self) -> (Option<u32>, String) {
        match self {
            LineRecord::Text(text) => (None, text),
            LineRecord::Numbered { number, text } => (number, text),
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

impl Document {
    pub fn from_json_str(source: &str) -> Result<Document> {
        let record: DocumentRecord =
            serde_json::from_str(source).map_err(|e| load_error("JSON", e))?;
        record.into_document()
    }

    pub fn from_yaml_str(source: &str) -> Result<Document> {
        let record: DocumentRecord =
            serde_yaml::from_str(source).map_err(|e| load_error("YAML", e))?;
        record.into_document()
    }

    pub fn from_str_with(source: &str, format: DocumentFormat) -> Result<Document> {
        match format {
            DocumentFormat::Json => Self::from_json_str(source),
            DocumentFormat::Yaml => Self::from_yaml_str(source),
        }
    }

    /// Reads a document from disk, choosing the format from the file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path).ok_or_else(|| {
            invalid_document(format!(
                "cannot tell the format of '{}' (expected .json, .yaml or .yml)",
                path.display()
            ))
        })?;
        let source = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        debug!("loading {:?} document from {}", format, path.display());
        Self::from_str_with(&source, format).map_err(|e| match e {
            TextbitesError::Load { source, .. } => TextbitesError::Load {
                origin: path.display().to_string(),
                source,
            },
            other => other,
        })
    }
}

impl DocumentRecord {
    fn into_document(self) -> Result<Document> {
        let title = self.title;
        if self.chapters.is_empty() {
            return Err(invalid_document(format!("'{title}' has no chapters")));
        }

        let mut chapters = Vec::with_capacity(self.chapters.len());
        for (record, number) in self.chapters.into_iter().zip(1u32..) {
            check_number("chapter", record.number, number, &title)?;
            if record.lines.is_empty() {
                return Err(invalid_document(format!(
                    "chapter {number} of '{title}' has no lines"
                )));
            }

            let mut lines = Vec::with_capacity(record.lines.len());
            for (line, line_number) in record.lines.into_iter().zip(1u32..) {
                let (explicit, text) = line.into_parts();
                check_number(
                    &format!("line in chapter {number}"),
                    explicit,
                    line_number,
                    &title,
                )?;
                lines.push(Line {
                    number: line_number,
                    text,
                });
            }

            chapters.push(Chapter {
                number,
                title: record.title,
                lines,
            });
        }

        debug!("loaded '{}' with {} chapters", title, chapters.len());
        Ok(Document { title, chapters })
    }
}

fn check_number(what: &str, explicit: Option<u32>, expected: u32, title: &str) -> Result<()> {
    match explicit {
        Some(found) if found != expected => Err(invalid_document(format!(
            "{what} of '{title}' is numbered {found}, expected {expected} (numbers must run from 1 without gaps)"
        ))),
        _ => Ok(()),
    }
}
