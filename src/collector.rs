//! Page collection for manual pages.
//!
//! Each configured manual page (a *target*) keeps its list of input page
//! identifiers and the HTML recorded for them while the host renders pages.
//!
//! ```text
//! expand()      page ids known      "guide/*" -> "guide/a", "guide/b"
//! record()      once per page       html stored for every target listing it
//! finalize()    once per target     html in input order, or MissingPage
//! ```

use crate::{
    config::PageConfig,
    debug,
    error::ManpageError,
    log,
    utils::pattern::{Pattern, is_ambiguous, is_pattern},
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Expand wildcard entries of `inputs` against the known page identifiers.
///
/// Pattern entries are replaced in place by every matching identifier, in
/// the order of `page_ids`. Other entries pass through unchanged, even when
/// no such page exists, so that a typo surfaces as a missing page later.
///
/// An entry equal to a known identifier is always taken literally, and so
/// is an entry without `*` that matches nothing (`api/[id].html`).
pub fn expand_inputs<S: AsRef<str>>(inputs: &[String], page_ids: &[S]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(inputs.len());
    for input in inputs {
        let known = page_ids.iter().any(|id| id.as_ref() == input);
        if known || !is_pattern(input) {
            expanded.push(input.clone());
            continue;
        }
        match Pattern::new(input) {
            Ok(pattern) => {
                let before = expanded.len();
                expanded.extend(
                    page_ids
                        .iter()
                        .map(|id| id.as_ref())
                        .filter(|id| pattern.matches(id))
                        .map(str::to_owned),
                );
                if expanded.len() == before {
                    if is_ambiguous(input) {
                        expanded.push(input.clone());
                    } else {
                        log!("warn"; "pattern `{}` matches no page", pattern.as_str());
                    }
                }
            }
            Err(err) => {
                log!("warn"; "invalid pattern `{input}`, matching it literally: {err}");
                expanded.push(input.clone());
            }
        }
    }
    expanded
}

/// Collected pages of one manual page.
#[derive(Debug, Clone)]
struct Target {
    output: PathBuf,
    inputs: Vec<String>,
    pages: HashMap<String, String>,
}

/// Store of rendered page HTML, per manual page.
#[derive(Debug, Clone, Default)]
pub struct PageCollector {
    targets: Vec<Target>,
    expanded: bool,
}

impl PageCollector {
    /// Create a collector for the configured manual pages, in order.
    pub fn new(pages: &[PageConfig]) -> Self {
        let targets = pages
            .iter()
            .map(|page| Target {
                output: page.output.clone(),
                inputs: page.inputs.clone(),
                pages: HashMap::new(),
            })
            .collect();
        Self {
            targets,
            expanded: false,
        }
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Expand the wildcard inputs of every target.
    ///
    /// Must run once all page identifiers are known and before any page is
    /// recorded; afterwards lookups are exact. Only the first call expands.
    pub fn expand<S: AsRef<str>>(&mut self, page_ids: &[S]) {
        if self.expanded {
            debug!("manpage"; "inputs already expanded, ignoring new page list");
            return;
        }
        for target in &mut self.targets {
            target.inputs = expand_inputs(&target.inputs, page_ids);
        }
        self.expanded = true;
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Input page identifiers of `target`.
    pub fn inputs(&self, target: usize) -> &[String] {
        self.targets.get(target).map(|t| t.inputs.as_slice()).unwrap_or(&[])
    }

    /// Output path of `target`.
    pub fn output(&self, target: usize) -> Option<&Path> {
        self.targets.get(target).map(|t| t.output.as_path())
    }

    /// Store `html` for every target listing `page_id`.
    ///
    /// Returns how many targets took the page.
    pub fn record(&mut self, page_id: &str, html: &str) -> usize {
        let mut count = 0;
        for target in &mut self.targets {
            if target.inputs.iter().any(|input| input == page_id) {
                debug!("manpage"; "adding page {page_id} to {}", target.output.display());
                target.pages.insert(page_id.to_owned(), html.to_owned());
                count += 1;
            }
        }
        count
    }

    /// HTML of every input of `target`, in input order.
    ///
    /// # Errors
    /// - [`ManpageError::NoInputs`] when the inputs expanded to nothing.
    /// - [`ManpageError::MissingPage`] naming the first input that was never
    ///   recorded.
    pub fn finalize(&self, target: usize) -> Result<Vec<&str>, ManpageError> {
        let Some(target) = self.targets.get(target) else {
            return Ok(Vec::new());
        };
        if target.inputs.is_empty() {
            return Err(ManpageError::NoInputs {
                output: target.output.clone(),
            });
        }

        target
            .inputs
            .iter()
            .map(|page| {
                target
                    .pages
                    .get(page)
                    .map(String::as_str)
                    .ok_or_else(|| ManpageError::MissingPage {
                        page: page.clone(),
                        output: target.output.clone(),
                    })
            })
            .collect()
    }
}
