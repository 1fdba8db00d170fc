//! Manual page emission.
//!
//! Turns the collected HTML of one target into a man page:
//!
//! ```text
//! fragments ──join──► Document ──filter──► preprocess? ──► temp .html
//!                                                            │
//!                         output  ◄──── pandoc --to man ◄────┘
//! ```

pub mod pandoc;
pub mod section;

pub use pandoc::{Converter, FOOTER, ManpageMeta};
pub use section::Section;

use crate::{
    config::PageConfig,
    error::ManpageError,
    html::{self, Document},
    log,
    preprocess::Preprocess,
};
use std::{fs, io::Write, path::PathBuf};

/// Separator placed between the HTML of consecutive pages.
pub const PAGE_SEPARATOR: &str = "\n\n";

/// Writes manual pages for the targets of one build.
#[derive(Clone)]
pub struct Emitter<'a> {
    converter: &'a Converter,
    preprocessor: Option<&'a dyn Preprocess>,
    site_title: &'a str,
    date: String,
}

impl<'a> Emitter<'a> {
    pub fn new(converter: &'a Converter, site_title: &'a str, date: String) -> Self {
        Self {
            converter,
            preprocessor: None,
            site_title,
            date,
        }
    }

    /// Run `preprocessor` on every document after the element filter.
    pub fn with_preprocessor(mut self, preprocessor: Option<&'a dyn Preprocess>) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    /// Metadata for `page`.
    pub fn meta(&self, page: &PageConfig) -> ManpageMeta {
        let section = Section::from_path(&page.output);
        ManpageMeta {
            title: page.title.clone().unwrap_or_else(|| self.site_title.to_owned()),
            section,
            date: self.date.clone(),
            footer: FOOTER.to_owned(),
            header: section.header_or(page.header.as_deref()).to_owned(),
        }
    }

    /// Filtered (and preprocessed) HTML of `page`.
    pub fn render(&self, page: &PageConfig, fragments: &[&str]) -> Result<String, ManpageError> {
        let mut document = Document::parse(&fragments.join(PAGE_SEPARATOR));
        html::filter(&mut document);

        if let Some(preprocessor) = self.preprocessor {
            preprocessor
                .preprocess(&mut document, &page.output)
                .map_err(|source| ManpageError::Preprocess {
                    output: page.output.clone(),
                    source,
                })?;
        }

        document
            .to_html()
            .map_err(|err| ManpageError::io(&page.output, err))
    }

    /// Produce the manual page of `page` from its collected fragments.
    ///
    /// Returns the written path.
    pub fn emit(&self, page: &PageConfig, fragments: &[&str]) -> Result<PathBuf, ManpageError> {
        let html = self.render(page, fragments)?;
        let meta = self.meta(page);
        let output = &page.output;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| ManpageError::io(parent, err))?;
        }

        // Removed on drop, whatever the converter does.
        let input = write_temp_html(&html)?;
        self.converter
            .convert(&meta, input.path(), output)
            .map_err(|err| ManpageError::Convert {
                output: output.clone(),
                message: format!("{err:#}"),
            })?;

        log!("manpage"; "generated {}", output.display());
        Ok(output.clone())
    }
}

fn write_temp_html(html: &str) -> Result<tempfile::NamedTempFile, ManpageError> {
    let temp_dir = std::env::temp_dir();
    let mut file = tempfile::Builder::new()
        .prefix("manpage_")
        .suffix(".html")
        .tempfile()
        .map_err(|err| ManpageError::io(&temp_dir, err))?;
    let path = file.path().to_path_buf();
    file.write_all(html.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|err| ManpageError::io(&path, err))?;
    Ok(file)
}
