//! # Resource facade
//!
//! A [`Resource`] owns one immutable [`Document`] and is the usual entry point for
//! callers: parse reference text, walk chapters, pull text, and search. Every method is
//! read-only, so a `Resource` can be shared freely between threads.

use std::path::Path;

use crate::document::Document;
use crate::errors::{invalid_reference, Result, TextbitesError};
use crate::reference::{self, Reference, Scope};
use crate::search::{self, SearchFilter};
use crate::syntax::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    document: Document,
}

impl Resource {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Document::from_json_str(source).map(Self::new)
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        Document::from_yaml_str(source).map(Self::new)
    }

    /// Loads a `.json`, `.yaml` or `.yml` document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Document::from_path(path).map(Self::new)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn title(&self) -> &str {
        self.document.title()
    }

    /// The whole-book reference.
    pub fn top_reference(&self) -> Reference<'_> {
        Reference::book(&self.document)
    }

    /// Parses and validates reference text such as `"chapter 2:1-3"`.
    pub fn reference(&self, text: &str) -> Result<Reference<'_>> {
        reference::resolve(&self.document, text)
    }

    /// One chapter reference per chapter, in order.
    pub fn chapter_refs(&self) -> Vec<Reference<'_>> {
        (1..=self.document.chapter_count())
            .map(|c| Reference::new(&self.document, Scope::Chapter(c)))
            .collect()
    }

    /// Number of lines in `chapter`.
    pub fn chapter_length(&self, chapter: u32) -> Result<u32> {
        self.document
            .chapter(chapter)
            .map(|c| c.len())
            .ok_or_else(|| self.chapter_out_of_range(chapter))
    }

    /// Text of `chapter`, optionally cut to `first_line..=last_line`. Missing bounds mean
    /// the first and last line of the chapter; bounds outside the chapter are errors.
    pub fn chapter_text(
        &self,
        chapter: u32,
        first_line: Option<u32>,
        last_line: Option<u32>,
    ) -> Result<String> {
        let len = self.chapter_length(chapter)?;
        let first = first_line.unwrap_or(1);
        let last = last_line.unwrap_or(len);
        let scope = Scope::LineRange {
            chapter,
            first,
            last,
        };
        let reference = Reference::from_scope(&self.document, scope).ok_or_else(|| {
            let text = format!("{chapter}:{first}-{last}");
            invalid_reference(
                &text,
                Span::new(0, text.len()),
                format!("lines {first}-{last} are not within chapter {chapter}"),
            )
            .with_help(format!("chapter {chapter} has lines 1-{len}"))
        })?;
        reference.text()
    }

    /// Searches the whole document, restricted by `filter`.
    pub fn search(&self, pattern: &str, filter: &SearchFilter) -> Result<Vec<Reference<'_>>> {
        let regex = search::compile_pattern(pattern)?;
        Ok(search::search(&self.document, &regex, filter))
    }

    fn chapter_out_of_range(&self, chapter: u32) -> TextbitesError {
        let text = chapter.to_string();
        invalid_reference(
            &text,
            Span::new(0, text.len()),
            format!("chapter {chapter} is out of range"),
        )
        .with_help(format!(
            "'{}' has {} chapters",
            self.title(),
            self.document.chapter_count()
        ))
    }
}

impl From<Document> for Resource {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn resource() -> Resource {
        Document::builder("Book")
            .chapter(["one", "two"])
            .chapter(["three", "four", "five"])
            .build()
            .map(Resource::new)
            .unwrap()
    }

    #[test]
    fn test_chapter_accessors() {
        let res = resource();
        assert_eq!(res.chapter_refs().len(), 2);
        assert_eq!(res.chapter_length(2).unwrap(), 3);
        assert_eq!(res.chapter_text(2, None, None).unwrap(), "three four five");
        assert_eq!(res.chapter_text(2, Some(2), None).unwrap(), "four five");
        assert_eq!(res.chapter_text(2, None, Some(1)).unwrap(), "three");
    }

    #[test]
    fn test_chapter_accessors_reject_bad_numbers() {
        let res = resource();
        assert_eq!(res.chapter_length(3).unwrap_err().kind(), ErrorKind::InvalidReference);
        assert_eq!(res.chapter_length(0).unwrap_err().kind(), ErrorKind::InvalidReference);
        assert!(res.chapter_text(2, Some(0), None).is_err());
        assert!(res.chapter_text(2, None, Some(4)).is_err());
        assert!(res.chapter_text(2, Some(3), Some(2)).is_err());
    }

    #[test]
    fn test_search_delegates_with_filter() {
        let res = resource();
        let hits = res
            .search("o", &SearchFilter::new().first_chapter(2))
            .unwrap();
        let labels: Vec<_> = hits.iter().map(|h| h.pretty()).collect();
        assert_eq!(labels, ["Book 2:2"]);
        assert!(res.search("[", &SearchFilter::new()).is_err());
    }
}
