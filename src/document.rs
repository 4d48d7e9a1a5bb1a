//! Document tree
//!
//! The immutable in-memory shape of a book: an ordered list of chapters, each an ordered
//! list of lines. Chapter numbers run `1..=N` and line numbers `1..=M` within a chapter,
//! with no gaps; both constructors ([`DocumentBuilder`] and the [`loader`]) enforce this,
//! so the rest of the crate can index by number without re-checking contiguity.

use serde::Serialize;

use crate::errors::{invalid_document, Result};

pub mod loader;

pub use loader::DocumentFormat;

/// A single line of text. Leaf of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    number: u32,
    text: String,
}

impl Line {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A numbered chapter with an optional title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    lines: Vec<Line>,
}

impl Chapter {
    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines; also the number of the last line.
    pub fn len(&self) -> u32 {
        self.lines.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, number: u32) -> Option<&Line> {
        let index = number.checked_sub(1)?;
        self.lines.get(index as usize)
    }

    /// Lines `first..=last`, with both ends clamped to the chapter. Returns an empty
    /// slice when the clamped range is empty.
    pub fn lines_between(&self, first: u32, last: u32) -> &[Line] {
        let start = first.max(1) as usize - 1;
        let end = (last as usize).min(self.lines.len());
        if start >= end {
            return &[];
        }
        &self.lines[start..end]
    }
}

/// A whole book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    title: String,
    chapters: Vec<Chapter>,
}

impl Document {
    pub fn builder(title: impl Into<String>) -> DocumentBuilder {
        DocumentBuilder::new(title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Number of chapters; also the number of the last chapter.
    pub fn chapter_count(&self) -> u32 {
        self.chapters.len() as u32
    }

    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        let index = number.checked_sub(1)?;
        self.chapters.get(index as usize)
    }

    pub fn line(&self, chapter: u32, line: u32) -> Option<&Line> {
        self.chapter(chapter)?.line(line)
    }

    /// Chapters `first..=last`, clamped to the document.
    pub fn chapters_between(&self, first: u32, last: u32) -> &[Chapter] {
        let start = first.max(1) as usize - 1;
        let end = (last as usize).min(self.chapters.len());
        if start >= end {
            return &[];
        }
        &self.chapters[start..end]
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Programmatic construction of a [`Document`]. Chapters and lines are numbered in the
/// order they are added.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    title: String,
    chapters: Vec<Chapter>,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            chapters: Vec::new(),
        }
    }

    /// Appends an untitled chapter.
    pub fn chapter<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_chapter(None, lines)
    }

    /// Appends a chapter with a title.
    pub fn titled_chapter<I, S>(self, title: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push_chapter(Some(title.into()), lines)
    }

    fn push_chapter<I, S>(mut self, title: Option<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = lines
            .into_iter()
            .zip(1u32..)
            .map(|(text, number)| Line {
                number,
                text: text.into(),
            })
            .collect();
        let number = self.chapters.len() as u32 + 1;
        self.chapters.push(Chapter {
            number,
            title,
            lines,
        });
        self
    }

    /// Finishes the document. Fails when there are no chapters or a chapter has no lines.
    pub fn build(self) -> Result<Document> {
        if self.chapters.is_empty() {
            return Err(invalid_document(format!(
                "'{}' has no chapters",
                self.title
            )));
        }
        if let Some(empty) = self.chapters.iter().find(|c| c.is_empty()) {
            return Err(invalid_document(format!(
                "chapter {} of '{}' has no lines",
                empty.number, self.title
            )));
        }
        Ok(Document {
            title: self.title,
            chapters: self.chapters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn small() -> Document {
        Document::builder("Small")
            .chapter(["a", "b", "c"])
            .titled_chapter("Second", ["d", "e"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_numbering_is_contiguous() {
        let doc = small();
        assert_eq!(doc.chapter_count(), 2);
        for (i, chapter) in doc.chapters().iter().enumerate() {
            assert_eq!(chapter.number(), i as u32 + 1);
            for (j, line) in chapter.lines().iter().enumerate() {
                assert_eq!(line.number(), j as u32 + 1);
            }
        }
        assert_eq!(doc.chapter(2).unwrap().title(), Some("Second"));
        assert_eq!(doc.chapter(1).unwrap().title(), None);
    }

    #[test]
    fn test_lookup_out_of_range() {
        let doc = small();
        assert!(doc.chapter(0).is_none());
        assert!(doc.chapter(3).is_none());
        assert!(doc.line(1, 4).is_none());
        assert_eq!(doc.line(2, 2).unwrap().text(), "e");
    }

    #[test]
    fn test_slices_are_clamped() {
        let doc = small();
        let chapter = doc.chapter(1).unwrap();
        let texts: Vec<_> = chapter.lines_between(2, 10).iter().map(Line::text).collect();
        assert_eq!(texts, ["b", "c"]);
        assert!(chapter.lines_between(3, 2).is_empty());
        assert!(chapter.lines_between(4, 9).is_empty());
        assert_eq!(doc.chapters_between(0, 1).len(), 1);
        assert_eq!(doc.chapters_between(2, u32::MAX).len(), 1);
    }

    #[test]
    fn test_build_rejects_empty_shapes() {
        let err = Document::builder("Empty").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDocument);

        let err = Document::builder("Hollow")
            .chapter(["x"])
            .chapter(Vec::<String>::new())
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("chapter 2"));
    }
}
