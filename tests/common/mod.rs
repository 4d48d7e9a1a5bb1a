//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use textbites::{Reference, Resource};

pub const BOOK_NAME: &str = "PRIDE AND PREJUDICE";

/// Directory holding the sample documents.
pub fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

pub fn sample_path() -> PathBuf {
    data_dir().join("pp-sample.json")
}

/// The three-chapter Pride and Prejudice excerpt.
pub fn sample() -> Resource {
    Resource::from_path(sample_path()).expect("sample document should load")
}

/// Labels of `refs`, for compact assertions.
pub fn labels(refs: &[Reference<'_>]) -> Vec<String> {
    refs.iter().map(Reference::pretty).collect()
}

/// `"PRIDE AND PREJUDICE <suffix>"`.
pub fn label(suffix: &str) -> String {
    format!("{BOOK_NAME} {suffix}")
}
