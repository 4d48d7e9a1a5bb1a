//! References into a document
//!
//! A [`Reference`] names the whole book, one chapter or a run of chapters, or one line or
//! a run of lines inside a single chapter. It is a small `Copy` value: a borrow of the
//! [`Document`] plus a [`Scope`] of plain numbers. Every reference handed out by this
//! crate is in bounds for its document, and since documents are immutable it stays valid
//! for as long as the borrow lives.

use std::cmp::Ordering;
use std::fmt;

use regex::Regex;

use crate::document::Document;
use crate::errors::{not_supported, Result};
use crate::search::{self, SearchFilter};

pub mod resolve;

pub use resolve::resolve;

// ============================================================================
// SCOPE
// ============================================================================

/// The closed set of reference shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Book,
    ChapterRange { first: u32, last: u32 },
    Chapter(u32),
    LineRange { chapter: u32, first: u32, last: u32 },
    Line { chapter: u32, line: u32 },
}

/// Tag of a [`Scope`] without its numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Book,
    ChapterRange,
    Chapter,
    LineRange,
    Line,
}

impl Scope {
    pub fn kind(&self) -> ReferenceKind {
        match self {
            Scope::Book => ReferenceKind::Book,
            Scope::ChapterRange { .. } => ReferenceKind::ChapterRange,
            Scope::Chapter(_) => ReferenceKind::Chapter,
            Scope::LineRange { .. } => ReferenceKind::LineRange,
            Scope::Line { .. } => ReferenceKind::Line,
        }
    }

    /// True when every number in the scope exists in `document` and ranges are ordered.
    pub fn is_within(&self, document: &Document) -> bool {
        let chapter_len = |c: u32| document.chapter(c).map(|ch| ch.len());
        match *self {
            Scope::Book => true,
            Scope::Chapter(c) => document.chapter(c).is_some(),
            Scope::ChapterRange { first, last } => {
                first <= last && document.chapter(first).is_some() && document.chapter(last).is_some()
            }
            Scope::Line { chapter, line } => {
                matches!(chapter_len(chapter), Some(len) if (1..=len).contains(&line))
            }
            Scope::LineRange {
                chapter,
                first,
                last,
            } => {
                first <= last
                    && first >= 1
                    && matches!(chapter_len(chapter), Some(len) if last <= len)
            }
        }
    }

    /// The search filter pinned to exactly this scope.
    pub fn filter(&self) -> SearchFilter {
        match *self {
            Scope::Book => SearchFilter::new(),
            Scope::Chapter(c) => SearchFilter::new().chapters(c, c),
            Scope::ChapterRange { first, last } => SearchFilter::new().chapters(first, last),
            Scope::Line { chapter, line } => {
                SearchFilter::new().chapters(chapter, chapter).lines(line, line)
            }
            Scope::LineRange {
                chapter,
                first,
                last,
            } => SearchFilter::new().chapters(chapter, chapter).lines(first, last),
        }
    }
}

// ============================================================================
// REFERENCE
// ============================================================================

/// A validated reference bound to a document.
#[derive(Clone, Copy)]
pub struct Reference<'a> {
    document: &'a Document,
    scope: Scope,
}

impl<'a> Reference<'a> {
    /// Callers guarantee `scope.is_within(document)`.
    pub(crate) fn new(document: &'a Document, scope: Scope) -> Self {
        debug_assert!(scope.is_within(document), "out-of-bounds scope {scope:?}");
        Self { document, scope }
    }

    /// The whole-book reference.
    pub fn book(document: &'a Document) -> Self {
        Self::new(document, Scope::Book)
    }

    /// Binds a scope to `document`, or `None` when it does not fit the document.
    pub fn from_scope(document: &'a Document, scope: Scope) -> Option<Self> {
        scope
            .is_within(document)
            .then(|| Self::new(document, scope))
    }

    /// Parses and validates reference text against `document`.
    pub fn parse(document: &'a Document, text: &str) -> Result<Self> {
        resolve(document, text)
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn kind(&self) -> ReferenceKind {
        self.scope.kind()
    }

    /// Chapter number for chapter-scoped references; the first chapter of a range.
    pub fn num(&self) -> Option<u32> {
        match self.scope {
            Scope::Book => None,
            Scope::Chapter(c) => Some(c),
            Scope::ChapterRange { first, .. } => Some(first),
            Scope::Line { chapter, .. } | Scope::LineRange { chapter, .. } => Some(chapter),
        }
    }

    /// Line number of a single-line reference.
    pub fn line_num(&self) -> Option<u32> {
        match self.scope {
            Scope::Line { line, .. } => Some(line),
            _ => None,
        }
    }

    /// Canonical label, e.g. `"PRIDE AND PREJUDICE 2:1-3"`. Ranges of one element print
    /// like the singular form.
    pub fn pretty(&self) -> String {
        let title = self.document.title();
        match self.scope {
            Scope::Book => title.to_string(),
            Scope::Chapter(c) => format!("{title} {c}"),
            Scope::ChapterRange { first, last } if first == last => format!("{title} {first}"),
            Scope::ChapterRange { first, last } => format!("{title} {first}-{last}"),
            Scope::Line { chapter, line } => format!("{title} {chapter}:{line}"),
            Scope::LineRange {
                chapter,
                first,
                last,
            } if first == last => format!("{title} {chapter}:{first}"),
            Scope::LineRange {
                chapter,
                first,
                last,
            } => format!("{title} {chapter}:{first}-{last}"),
        }
    }

    /// Text of every line in scope, joined by single spaces. The book as a whole has no
    /// text.
    pub fn text(&self) -> Result<String> {
        if self.scope == Scope::Book {
            return Err(not_supported("text", self.pretty()));
        }
        let texts: Vec<&str> = self.line_texts().collect();
        Ok(texts.join(" "))
    }

    /// Direct children in document order, or `None` for a single line (a leaf).
    pub fn children(&self) -> Option<Vec<Reference<'a>>> {
        let doc = self.document;
        let children = match self.scope {
            Scope::Book => (1..=doc.chapter_count())
                .map(|c| Self::new(doc, Scope::Chapter(c)))
                .collect(),
            Scope::ChapterRange { first, last } => (first..=last)
                .map(|c| Self::new(doc, Scope::Chapter(c)))
                .collect(),
            Scope::Chapter(c) => {
                let len = doc.chapter(c).map_or(0, |ch| ch.len());
                (1..=len)
                    .map(|line| Self::new(doc, Scope::Line { chapter: c, line }))
                    .collect()
            }
            Scope::LineRange {
                chapter,
                first,
                last,
            } => (first..=last)
                .map(|line| Self::new(doc, Scope::Line { chapter, line }))
                .collect(),
            Scope::Line { .. } => return None,
        };
        Some(children)
    }

    /// Every line in scope as a single-line reference, in document order.
    pub fn lines(&self) -> Vec<Reference<'a>> {
        let filter = self.scope.filter();
        filter
            .lines_in(self.document)
            .map(|(chapter, line)| {
                Self::new(
                    self.document,
                    Scope::Line {
                        chapter: chapter.number(),
                        line: line.number(),
                    },
                )
            })
            .collect()
    }

    /// Lines within this reference whose text matches the regular expression `pattern`.
    pub fn search(&self, pattern: &str) -> Result<Vec<Reference<'a>>> {
        let regex = search::compile_pattern(pattern)?;
        Ok(self.search_regex(&regex))
    }

    /// Like [`Reference::search`], further narrowed by `filter`. Bounds outside this
    /// reference never widen it.
    pub fn search_with(&self, pattern: &str, filter: &SearchFilter) -> Result<Vec<Reference<'a>>> {
        let regex = search::compile_pattern(pattern)?;
        let filter = self.scope.filter().intersect(*filter);
        Ok(search::search(self.document, &regex, &filter))
    }

    /// Like [`Reference::search`] with an already compiled pattern.
    pub fn search_regex(&self, pattern: &Regex) -> Vec<Reference<'a>> {
        search::search(self.document, pattern, &self.scope.filter())
    }

    fn line_texts(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.scope
            .filter()
            .lines_in(self.document)
            .map(|(_, line)| line.text())
    }

    /// (first chapter, first line, last chapter, last line) with open line ends widened.
    fn extent(&self) -> (u32, u32, u32, u32) {
        match self.scope {
            Scope::Book => (1, 0, self.document.chapter_count(), u32::MAX),
            Scope::Chapter(c) => (c, 0, c, u32::MAX),
            Scope::ChapterRange { first, last } => (first, 0, last, u32::MAX),
            Scope::Line { chapter, line } => (chapter, line, chapter, line),
            Scope::LineRange {
                chapter,
                first,
                last,
            } => (chapter, first, chapter, last),
        }
    }
}

impl fmt::Debug for Reference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
            .field("document", &self.document.title())
            .field("scope", &self.scope)
            .finish()
    }
}

impl fmt::Display for Reference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

/// Two references are equal when they cover the same extent of the same document, so a
/// one-chapter range equals the chapter itself.
impl PartialEq for Reference<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.extent() == other.extent()
    }
}

impl Eq for Reference<'_> {}

/// Document order. References into different documents are unordered.
impl PartialOrd for Reference<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        std::ptr::eq(self.document, other.document).then(|| self.extent().cmp(&other.extent()))
    }
}
