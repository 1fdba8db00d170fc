//! Rendered site enumeration.
//!
//! Page identifiers are the `/`-separated paths of the `.html` files
//! relative to the site directory, e.g. `guide/install.html`.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Extension of rendered pages.
const PAGE_EXTENSION: &str = "html";

/// A rendered page on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePage {
    pub id: String,
    pub path: PathBuf,
}

impl SitePage {
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read page `{}`", self.path.display()))
    }
}

/// Collect every rendered page under `dir`, sorted by identifier.
pub fn collect_pages(dir: &Path) -> Vec<SitePage> {
    let mut pages: Vec<SitePage> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == PAGE_EXTENSION))
        .filter_map(|e| {
            let id = page_id(dir, e.path())?;
            Some(SitePage {
                id,
                path: e.into_path(),
            })
        })
        .collect();
    pages.sort_by(|a, b| a.id.cmp(&b.id));
    pages
}

/// Identifier of the page at `path` inside `dir`.
pub fn page_id(dir: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(dir).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    (!parts.is_empty()).then(|| parts.join("/"))
}
