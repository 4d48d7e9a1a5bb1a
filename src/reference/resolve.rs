//! Bounds validation: binding parsed reference text to a document
//!
//! [`resolve`] runs both stages: it strips an optional document-title prefix, hands the
//! rest to the syntactic parser, then [`bind`] checks every number against the document.
//! Nothing is clamped; any number outside the document fails with an `InvalidReference`
//! error whose label points at that number.

use log::debug;

use crate::document::Document;
use crate::errors::{invalid_reference, Result, TextbitesError};
use crate::reference::{Reference, Scope};
use crate::syntax::{parser, Bounds, Number, RawReference, Span};

/// Parses and validates `text` against `document`.
pub fn resolve<'a>(document: &'a Document, text: &str) -> Result<Reference<'a>> {
    let start = title_prefix_len(document.title(), text);
    let raw = parser::parse_reference_from(text, start)?;
    let reference = bind(document, &raw, text)?;
    debug!("resolved {text:?} to {reference:?}");
    Ok(reference)
}

/// Validates a [`RawReference`] produced from `text` against `document`.
pub fn bind<'a>(document: &'a Document, raw: &RawReference, text: &str) -> Result<Reference<'a>> {
    let chapter_count = document.chapter_count();
    let (first_chapter, last_chapter) =
        check_bounds(text, &raw.chapters, chapter_count, "chapter", |n| {
            format!("'{}' has {} chapters", document.title(), n)
        })?;

    let Some(lines) = &raw.lines else {
        let scope = if raw.chapters.is_range() {
            Scope::ChapterRange {
                first: first_chapter,
                last: last_chapter,
            }
        } else {
            Scope::Chapter(first_chapter)
        };
        return Ok(Reference::new(document, scope));
    };

    let chapter_len = document.chapter(first_chapter).map_or(0, |c| c.len());
    let (first_line, last_line) = check_bounds(text, lines, chapter_len, "line", |n| {
        format!("chapter {first_chapter} has {n} lines")
    })?;

    let scope = if lines.is_range() {
        Scope::LineRange {
            chapter: first_chapter,
            first: first_line,
            last: last_line,
        }
    } else {
        Scope::Line {
            chapter: first_chapter,
            line: first_line,
        }
    };
    Ok(Reference::new(document, scope))
}

// ============================================================================
// HELPERS
// ============================================================================

/// Byte length of a leading, case-insensitive document title followed by whitespace,
/// or 0 when `text` does not start with the title.
fn title_prefix_len(title: &str, text: &str) -> usize {
    if title.trim().is_empty() {
        return 0;
    }
    let trimmed = text.trim_start();
    let lead = text.len() - trimmed.len();
    let Some(head) = trimmed.get(..title.len()) else {
        return 0;
    };
    let followed_by_blank = trimmed[title.len()..]
        .chars()
        .next()
        .is_some_and(char::is_whitespace);
    if head.eq_ignore_ascii_case(title) && followed_by_blank {
        lead + title.len()
    } else {
        0
    }
}

fn check_bounds(
    text: &str,
    bounds: &Bounds,
    max: u32,
    what: &str,
    extent: impl Fn(u32) -> String,
) -> Result<(u32, u32)> {
    let first = check_number(text, bounds.first, max, what, &extent)?;
    let last = match bounds.last {
        Some(last) => check_number(text, last, max, what, &extent)?,
        None => first,
    };
    if first > last {
        return Err(invalid_reference(
            text,
            bounds.span(),
            format!("{what} range {first}-{last} runs backwards"),
        )
        .with_help(format!("write the lower {what} first: {last}-{first}")));
    }
    Ok((first, last))
}

fn check_number(
    text: &str,
    number: Number,
    max: u32,
    what: &str,
    extent: &impl Fn(u32) -> String,
) -> Result<u32> {
    match number.value {
        Some(value) if (1..=max).contains(&value) => Ok(value),
        _ => {
            let written = &text[number.span.start..number.span.end];
            Err(out_of_range(text, number.span, what, written, &extent(max)))
        }
    }
}

fn out_of_range(text: &str, span: Span, what: &str, written: &str, extent: &str) -> TextbitesError {
    invalid_reference(text, span, format!("{what} {written} is out of range"))
        .with_help(format!("{extent}; {what} numbers start at 1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::reference::ReferenceKind;
    use miette::Diagnostic;

    fn tiny() -> Document {
        Document::builder("Pride and Prejudice")
            .chapter(["a", "b"])
            .chapter(["c", "d", "e", "f"])
            .chapter(["g"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_variants_from_text() {
        let doc = tiny();
        let kind = |text: &str| resolve(&doc, text).unwrap().kind();
        assert_eq!(kind("2"), ReferenceKind::Chapter);
        assert_eq!(kind("2-3"), ReferenceKind::ChapterRange);
        assert_eq!(kind("2-2"), ReferenceKind::ChapterRange);
        assert_eq!(kind("2:1"), ReferenceKind::Line);
        assert_eq!(kind("2:1-3"), ReferenceKind::LineRange);
        assert_eq!(kind("2:3-3"), ReferenceKind::LineRange);
    }

    #[test]
    fn test_title_prefix() {
        let doc = tiny();
        assert_eq!(resolve(&doc, "Pride and Prejudice 2").unwrap().scope(), Scope::Chapter(2));
        assert_eq!(
            resolve(&doc, "  PRIDE AND PREJUDICE 2:4").unwrap().scope(),
            Scope::Line { chapter: 2, line: 4 }
        );
        // The title alone names no chapter.
        assert!(resolve(&doc, "Pride and Prejudice").is_err());
        assert!(resolve(&doc, "Pride and Prejudice2").is_err());
    }

    #[test]
    fn test_chapter_out_of_range() {
        let doc = tiny();
        for text in ["0", "4", "chapter 2-5", "4294967296"] {
            let err = resolve(&doc, text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidReference, "{text:?}");
        }
    }

    #[test]
    fn test_line_out_of_range() {
        let doc = tiny();
        for text in ["2:0", "2:5", "chapter 2:1-50", "3:2"] {
            let err = resolve(&doc, text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidReference, "{text:?}");
        }
    }

    #[test]
    fn test_reversed_ranges() {
        let doc = tiny();
        assert!(resolve(&doc, "3-2").is_err());
        assert!(resolve(&doc, "2:3-1").is_err());
    }

    #[test]
    fn test_error_label_points_at_offending_number() {
        let doc = tiny();
        let err = resolve(&doc, "chapter 2:1-50").unwrap_err();
        let label = err.labels().unwrap().next().unwrap();
        assert_eq!(label.offset(), 12);
        assert_eq!(label.len(), 2);
        assert!(err.to_string().contains("line 50 is out of range"));
    }

    #[test]
    fn test_title_prefix_len() {
        assert_eq!(title_prefix_len("Book", "book 1"), 4);
        assert_eq!(title_prefix_len("Book", " Book\t1"), 5);
        assert_eq!(title_prefix_len("Book", "Bookish 1"), 0);
        assert_eq!(title_prefix_len("", "1"), 0);
        assert_eq!(title_prefix_len("Long title", "1"), 0);
    }
}
