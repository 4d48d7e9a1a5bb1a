//! Textbites Reference Parser - syntactic stage
//!
//! Converts reference text such as `"Chapter 2:1-3"` into a [`RawReference`] with source
//! spans for every number. This stage is purely syntactic: it never consults a document,
//! so `"chapter 99"` parses fine here and is rejected later by bounds validation.

use log::debug;
use pest::{error::Error, iterators::Pair, Parser};
use pest_derive::Parser;

use crate::errors::{invalid_reference, Result, TextbitesError};
use crate::syntax::{Bounds, Number, RawReference, Span};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct ReferenceParser;

const GRAMMAR_HELP: &str =
    "write a chapter ('2'), a chapter range ('chapter 2-3'), a line ('2:1') or a line range ('2:1-3')";

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse reference text into its structured intermediate form.
pub fn parse_reference(text: &str) -> Result<RawReference> {
    parse_reference_from(text, 0)
}

/// Parse the reference that starts at byte `start` of `text`. Spans in the result and in
/// errors are relative to the whole of `text`, so a caller that consumed a prefix (such
/// as a document title) still gets labels that line up with the full input.
pub fn parse_reference_from(text: &str, start: usize) -> Result<RawReference> {
    let input = Input { text, start };
    let rest = text.get(start..).unwrap_or_default();
    if rest.trim().is_empty() {
        return Err(
            invalid_reference(text, Span::new(0, text.len()), "reference is empty")
                .with_help(GRAMMAR_HELP),
        );
    }

    let mut pairs =
        ReferenceParser::parse(Rule::reference, rest).map_err(|e| convert_parse_error(e, &input))?;

    let reference = pairs.next().ok_or_else(|| input.mismatch())?;

    let location = reference
        .into_inner()
        .find(|p| matches!(p.as_rule(), Rule::line_scope | Rule::chapter_scope))
        .ok_or_else(|| input.mismatch())?;

    let raw = build_location(location, &input)?;
    debug!("parsed reference {text:?} into {raw:?}");
    Ok(raw)
}

/// The text being parsed and where parsing began inside it.
struct Input<'t> {
    text: &'t str,
    start: usize,
}

impl Input<'_> {
    fn span(&self, pair: &Pair<Rule>) -> Span {
        get_span(pair).offset(self.start)
    }

    fn mismatch(&self) -> TextbitesError {
        grammar_mismatch(self.text, Span::new(self.start, self.text.len()))
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

fn build_location(pair: Pair<Rule>, input: &Input) -> Result<RawReference> {
    let rule = pair.as_rule();
    let mut inner = pair.into_inner();

    match rule {
        Rule::chapter_scope => {
            let bounds = inner.next().ok_or_else(|| input.mismatch())?;
            Ok(RawReference {
                chapters: build_bounds(bounds, input)?,
                lines: None,
            })
        }
        Rule::line_scope => {
            let chapter = inner.next().ok_or_else(|| input.mismatch())?;
            let lines = inner.next().ok_or_else(|| input.mismatch())?;
            Ok(RawReference {
                chapters: Bounds {
                    first: build_number(chapter, input),
                    last: None,
                },
                lines: Some(build_bounds(lines, input)?),
            })
        }
        _ => Err(input.mismatch()),
    }
}

fn build_bounds(pair: Pair<Rule>, input: &Input) -> Result<Bounds> {
    let mut numbers = pair.into_inner().map(|p| build_number(p, input));
    let first = numbers.next().ok_or_else(|| input.mismatch())?;
    Ok(Bounds {
        first,
        last: numbers.next(),
    })
}

fn build_number(pair: Pair<Rule>, input: &Input) -> Number {
    Number {
        // Overflowing values survive as `None`; bounds validation reports them.
        value: pair.as_str().parse::<u32>().ok(),
        span: input.span(&pair),
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn get_span(pair: &Pair<Rule>) -> Span {
    Span {
        start: pair.as_span().start(),
        end: pair.as_span().end(),
    }
}

fn grammar_mismatch(text: &str, span: Span) -> TextbitesError {
    invalid_reference(text, span, "reference does not match the grammar").with_help(GRAMMAR_HELP)
}

fn convert_parse_error(error: Error<Rule>, input: &Input) -> TextbitesError {
    let text = input.text;
    let span = match error.location {
        pest::error::InputLocation::Pos(pos) => {
            let pos = pos + input.start;
            let width = text[pos..].chars().next().map_or(0, char::len_utf8);
            Span::new(pos, pos + width)
        }
        pest::error::InputLocation::Span((start, end)) => {
            Span::new(start, end).offset(input.start)
        }
    };

    let found = text[span.start..span.end].to_string();
    let message = if found.is_empty() {
        format!("'{}' ends too early", text.trim())
    } else {
        format!("unexpected '{}' in '{}'", found, text.trim())
    };

    invalid_reference(text, span, message).with_help(GRAMMAR_HELP)
}
