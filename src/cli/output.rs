//! Handles all user-facing output for the CLI.
//!
//! Every printer writes to a `WriteColor`, so commands render to a colour-aware stdout
//! and tests render into a `termcolor::Buffer`.

use std::io;

use regex::Regex;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::reference::Reference;
use crate::resource::Resource;

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

/// Prints a reference label followed by its text.
pub fn write_reference<W: WriteColor>(out: &mut W, reference: &Reference<'_>, text: &str) -> io::Result<()> {
    write_label(out, &reference.pretty())?;
    writeln!(out)?;
    writeln!(out, "{text}")
}

/// Prints the labels of a reference's children, or a leaf marker for a single line.
pub fn write_children<W: WriteColor>(out: &mut W, reference: &Reference<'_>) -> io::Result<()> {
    match reference.children() {
        Some(children) => {
            for child in children {
                writeln!(out, "{}", child.pretty())?;
            }
            Ok(())
        }
        None => writeln!(out, "{} is a single line", reference.pretty()),
    }
}

/// Prints one `label<TAB>text` row per hit, highlighting what `pattern` matched.
pub fn write_hits<W: WriteColor>(out: &mut W, hits: &[Reference<'_>], pattern: &Regex) -> io::Result<()> {
    for hit in hits {
        write_label(out, &hit.pretty())?;
        write!(out, "\t")?;
        let text = hit.text().unwrap_or_default();
        write_highlighted(out, &text, pattern)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Prints each chapter with its line count and optional title.
pub fn write_chapters<W: WriteColor>(out: &mut W, resource: &Resource) -> io::Result<()> {
    for chapter in resource.document().chapters() {
        write_label(out, &format!("{} {}", resource.title(), chapter.number()))?;
        write!(out, "\t{} lines", chapter.len())?;
        if let Some(title) = chapter.title() {
            write!(out, "\t{title}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn write_label<W: WriteColor>(out: &mut W, label: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
    write!(out, "{label}")?;
    out.reset()
}

fn write_highlighted<W: WriteColor>(out: &mut W, text: &str, pattern: &Regex) -> io::Result<()> {
    let mut last = 0;
    for found in pattern.find_iter(text) {
        write!(out, "{}", &text[last..found.start()])?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(out, "{}", found.as_str())?;
        out.reset()?;
        last = found.end();
    }
    write!(out, "{}", &text[last..])
}
