//! # Library: named resources
//!
//! A [`Library`] maps names to [`Resource`]s. It is an ordinary value: build one at
//! startup, pass it (or a reference to it) to whatever needs lookups, and drop it when
//! done. There is no process-wide registry.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::document::DocumentFormat;
use crate::errors::{invalid_document, Result, TextbitesError};
use crate::resource::Resource;

#[derive(Debug, Default, Clone)]
pub struct Library {
    resources: BTreeMap<String, Resource>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `resource` under `name`, returning the resource it replaced.
    pub fn add(&mut self, name: impl Into<String>, resource: Resource) -> Option<Resource> {
        let name = name.into();
        let previous = self.resources.insert(name.clone(), resource);
        if previous.is_some() {
            warn!("library entry '{name}' replaced");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.resources.get(name)
    }

    /// Like [`Library::get`], but a missing name is an error.
    pub fn require(&self, name: &str) -> Result<&Resource> {
        self.get(name).ok_or_else(|| TextbitesError::UnknownResource {
            name: name.to_string(),
        })
    }

    pub fn remove(&mut self, name: &str) -> Option<Resource> {
        self.resources.remove(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resource)> {
        self.resources.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Recursively loads every `.json`, `.yaml` and `.yml` document under `root`, each
    /// registered under its file stem. The first unreadable or invalid file aborts the
    /// load.
    pub fn load_dir(root: impl AsRef<Path>) -> Result<Self> {
        let mut library = Self::new();
        for path in discover_documents(root.as_ref())? {
            let name = resource_name(&path)?;
            let resource = Resource::from_path(&path)?;
            debug!("library: '{}' from {}", name, path.display());
            library.add(name, resource);
        }
        Ok(library)
    }
}

/// The library name for a document file: its stem, which must be valid UTF-8.
fn resource_name(path: &Path) -> Result<&str> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| {
            invalid_document(format!(
                "cannot name a resource after '{}' (file name is not valid UTF-8)",
                path.display()
            ))
        })
}

/// Document files under `root`, sorted for a deterministic load order.
fn discover_documents(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            TextbitesError::Io { path, source }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if DocumentFormat::from_path(entry.path()).is_none() {
            continue;
        }
        files.push(entry.path().to_path_buf());
    }
    files.sort();
    Ok(files)
}
