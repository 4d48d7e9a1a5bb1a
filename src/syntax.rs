//! Syntax module for textbites references
//!
//! This module holds the syntactic stage of reference parsing: the pest grammar and the
//! structured intermediate it produces. Nothing here knows about a concrete document;
//! bounds are checked later by [`crate::reference::resolve`].

use serde::{Deserialize, Serialize};

pub mod parser;

pub use parser::parse_reference;

/// Represents a byte span in the reference text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Shifts the span right by `offset` bytes.
    pub fn offset(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn join(self, other: Span) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::from(span.start..span.end)
    }
}

/// A number as written in the reference text, with its location.
///
/// Values that do not fit in a `u32` are kept as `None` so that the syntactic stage
/// accepts them and the bounds stage can reject them with a precise span.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Number {
    pub value: Option<u32>,
    pub span: Span,
}

impl Number {
    pub fn new(value: u32, span: Span) -> Self {
        Self {
            value: Some(value),
            span,
        }
    }
}

/// An inclusive `first[-last]` pair. `last` is absent when no dash was written.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub first: Number,
    pub last: Option<Number>,
}

impl Bounds {
    pub fn is_range(&self) -> bool {
        self.last.is_some()
    }

    /// The number closing the range; the first number when no dash was written.
    pub fn last_or_first(&self) -> Number {
        self.last.unwrap_or(self.first)
    }

    pub fn span(&self) -> Span {
        self.first.span.join(self.last_or_first().span)
    }
}

/// The structured result of the syntactic stage: chapter bounds plus optional line
/// bounds. The grammar guarantees that `lines` is only present when `chapters` is a
/// single number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReference {
    pub chapters: Bounds,
    pub lines: Option<Bounds>,
}
