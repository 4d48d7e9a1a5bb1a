//! Search engine
//!
//! Line-level regular-expression search over a [`Document`], restricted by a
//! [`SearchFilter`]. Hits come back materialised and in document order (chapter, then
//! line), one per matching line no matter how often the pattern occurs in it.
//!
//! Line bounds are applied to every chapter the filter selects. For a single-chapter
//! filter that is the obvious reading; for a multi-chapter filter it means each chapter is
//! cut to the same `first_line..=last_line` window.

use log::{debug, trace};
use regex::Regex;

use crate::document::{Chapter, Document, Line};
use crate::errors::{Result, TextbitesError};
use crate::reference::{Reference, Scope};

/// Inclusive, optional bounds for a search. Open ends default to the start or end of
/// the document (chapters) or of each chapter (lines).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub first_chapter: Option<u32>,
    pub last_chapter: Option<u32>,
    pub first_line: Option<u32>,
    pub last_line: Option<u32>,
}

impl SearchFilter {
    /// A filter covering the whole document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_chapter(mut self, chapter: u32) -> Self {
        self.first_chapter = Some(chapter);
        self
    }

    pub fn last_chapter(mut self, chapter: u32) -> Self {
        self.last_chapter = Some(chapter);
        self
    }

    pub fn first_line(mut self, line: u32) -> Self {
        self.first_line = Some(line);
        self
    }

    pub fn last_line(mut self, line: u32) -> Self {
        self.last_line = Some(line);
        self
    }

    pub fn chapters(self, first: u32, last: u32) -> Self {
        self.first_chapter(first).last_chapter(last)
    }

    pub fn lines(self, first: u32, last: u32) -> Self {
        self.first_line(first).last_line(last)
    }

    /// The bounds admitted by both filters. Open ends defer to the other side.
    pub fn intersect(self, other: SearchFilter) -> Self {
        fn tighter(a: Option<u32>, b: Option<u32>, pick: fn(u32, u32) -> u32) -> Option<u32> {
            match (a, b) {
                (Some(a), Some(b)) => Some(pick(a, b)),
                (a, b) => a.or(b),
            }
        }
        Self {
            first_chapter: tighter(self.first_chapter, other.first_chapter, u32::max),
            last_chapter: tighter(self.last_chapter, other.last_chapter, u32::min),
            first_line: tighter(self.first_line, other.first_line, u32::max),
            last_line: tighter(self.last_line, other.last_line, u32::min),
        }
    }

    /// True when the filter leaves every bound open.
    pub fn is_unbounded(&self) -> bool {
        *self == Self::default()
    }

    /// Every `(chapter, line)` pair the filter admits, in document order.
    pub fn lines_in<'a>(
        self,
        document: &'a Document,
    ) -> impl Iterator<Item = (&'a Chapter, &'a Line)> + 'a {
        let first_line = self.first_line.unwrap_or(1);
        let last_line = self.last_line.unwrap_or(u32::MAX);
        document
            .chapters_between(
                self.first_chapter.unwrap_or(1),
                self.last_chapter.unwrap_or(u32::MAX),
            )
            .iter()
            .flat_map(move |chapter| {
                chapter
                    .lines_between(first_line, last_line)
                    .iter()
                    .map(move |line| (chapter, line))
            })
    }
}

/// Compiles a search pattern, reporting an invalid expression as
/// [`TextbitesError::InvalidPattern`].
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| TextbitesError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Runs `pattern` over the lines admitted by `filter`. Never fails; no match is an empty
/// result.
pub fn search<'a>(document: &'a Document, pattern: &Regex, filter: &SearchFilter) -> Vec<Reference<'a>> {
    let hits: Vec<Reference<'a>> = filter
        .lines_in(document)
        .filter(|(chapter, line)| {
            let matched = pattern.is_match(line.text());
            trace!(
                "line {}:{} {}",
                chapter.number(),
                line.number(),
                if matched { "matches" } else { "skipped" }
            );
            matched
        })
        .map(|(chapter, line)| {
            Reference::new(
                document,
                Scope::Line {
                    chapter: chapter.number(),
                    line: line.number(),
                },
            )
        })
        .collect();

    debug!(
        "search /{}/ in '{}' with {:?}: {} hit(s)",
        pattern.as_str(),
        document.title(),
        filter,
        hits.len()
    );
    hits
}
