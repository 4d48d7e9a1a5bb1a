//! Textbites error handling
//!
//! Every failure the library surfaces is a [`TextbitesError`]. Each variant carries a
//! stable diagnostic code (`textbites::<area>::<kind>`) so that reports rendered through
//! `miette` stay consistent between the library, the CLI, and the tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::syntax::Span;

// Type aliases for clarity and brevity
pub type SourceArc = Arc<NamedSource<String>>;
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Crate-wide result alias.
pub type Result<T, E = TextbitesError> = std::result::Result<T, E>;

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

/// Plain classification of a [`TextbitesError`], convenient for matching in callers
/// and test assertions without destructuring the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidReference,
    NotSupported,
    InvalidPattern,
    InvalidDocument,
    Load,
    Io,
    UnknownResource,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidReference => "InvalidReference",
            ErrorKind::NotSupported => "NotSupported",
            ErrorKind::InvalidPattern => "InvalidPattern",
            ErrorKind::InvalidDocument => "InvalidDocument",
            ErrorKind::Load => "Load",
            ErrorKind::Io => "Io",
            ErrorKind::UnknownResource => "UnknownResource",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Unified error type for all textbites failure modes.
#[derive(Error, Diagnostic, Debug)]
pub enum TextbitesError {
    /// Malformed reference text, or well-formed text whose numbers fall outside
    /// the document. Never clamped or corrected.
    #[error("invalid reference: {message}")]
    #[diagnostic(code(textbites::reference::invalid))]
    InvalidReference {
        message: String,
        #[source_code]
        src: SourceArc,
        #[label("invalid reference")]
        span: SourceSpan,
        #[help]
        help: Option<String>,
    },

    #[error("{operation}() is not supported on '{reference}'")]
    #[diagnostic(
        code(textbites::reference::not_supported),
        help("select a chapter, a chapter range, or lines before extracting text")
    )]
    NotSupported {
        operation: &'static str,
        reference: String,
    },

    #[error("invalid search pattern '{pattern}'")]
    #[diagnostic(
        code(textbites::search::invalid_pattern),
        help("patterns are regular expressions; escape literal characters such as '.'")
    )]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid document: {message}")]
    #[diagnostic(code(textbites::document::invalid))]
    InvalidDocument { message: String },

    #[error("failed to load document from {origin}")]
    #[diagnostic(code(textbites::document::load))]
    Load {
        origin: String,
        #[source]
        source: BoxedError,
    },

    #[error("I/O error on '{}'", path.display())]
    #[diagnostic(code(textbites::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no resource named '{name}' in the library")]
    #[diagnostic(code(textbites::library::unknown_resource))]
    UnknownResource { name: String },
}

impl TextbitesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TextbitesError::InvalidReference { .. } => ErrorKind::InvalidReference,
            TextbitesError::NotSupported { .. } => ErrorKind::NotSupported,
            TextbitesError::InvalidPattern { .. } => ErrorKind::InvalidPattern,
            TextbitesError::InvalidDocument { .. } => ErrorKind::InvalidDocument,
            TextbitesError::Load { .. } => ErrorKind::Load,
            TextbitesError::Io { .. } => ErrorKind::Io,
            TextbitesError::UnknownResource { .. } => ErrorKind::UnknownResource,
        }
    }

    /// Attaches (or replaces) the help line of an `InvalidReference` error.
    /// Other variants are returned untouched.
    pub fn with_help(mut self, text: impl Into<String>) -> Self {
        if let TextbitesError::InvalidReference { help, .. } = &mut self {
            *help = Some(text.into());
        }
        self
    }
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// Builds an `InvalidReference` error pointing at `span` inside `input`.
pub fn invalid_reference(input: &str, span: Span, message: impl Into<String>) -> TextbitesError {
    TextbitesError::InvalidReference {
        message: message.into(),
        src: Arc::new(NamedSource::new("reference", input.to_string())),
        span: span.into(),
        help: None,
    }
}

pub fn not_supported(operation: &'static str, reference: impl Into<String>) -> TextbitesError {
    TextbitesError::NotSupported {
        operation,
        reference: reference.into(),
    }
}

pub fn invalid_document(message: impl Into<String>) -> TextbitesError {
    TextbitesError::InvalidDocument {
        message: message.into(),
    }
}

pub fn load_error(
    origin: impl Into<String>,
    source: impl std::error::Error + Send + Sync + 'static,
) -> TextbitesError {
    TextbitesError::Load {
        origin: origin.into(),
        source: Box::new(source),
    }
}

pub fn io_error(path: &Path, source: std::io::Error) -> TextbitesError {
    TextbitesError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints a [`TextbitesError`] with full miette diagnostics on stderr.
pub fn print_error(error: TextbitesError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_reference_points_at_span() {
        let err = invalid_reference("chapter 9", Span { start: 8, end: 9 }, "chapter 9 is out of range");
        assert_eq!(err.kind(), ErrorKind::InvalidReference);
        let labels: Vec<_> = err.labels().expect("labels").collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 8);
        assert_eq!(labels[0].len(), 1);
        assert_eq!(
            err.code().map(|c| c.to_string()).as_deref(),
            Some("textbites::reference::invalid")
        );
    }

    #[test]
    fn with_help_only_touches_invalid_reference() {
        let err = invalid_reference("x", Span { start: 0, end: 1 }, "bad").with_help("try '2:1'");
        assert_eq!(err.help().map(|h| h.to_string()).as_deref(), Some("try '2:1'"));

        let err = not_supported("text", "BOOK").with_help("ignored");
        assert_eq!(err.to_string(), "text() is not supported on 'BOOK'");
    }
}
