//! Manual page plugin lifecycle.
//!
//! A host drives the plugin through four phases, once per build:
//!
//! ```text
//! on_config(site)        store the site title
//! on_files(page ids)     expand wildcard inputs, once; ids handed back
//! on_page_content(..)    collect rendered HTML (returned unchanged)
//! on_post_build()        emit every manual page
//! ```
//!
//! All state lives in the plugin instance and is dropped with it.

use crate::{
    collector::PageCollector,
    config::{ConfigError, PluginConfig, SiteConfig},
    debug,
    error::{BuildError, ManpageError},
    manpage::{Converter, Emitter},
    preprocess::{Preprocess, ScriptPreprocessor},
    utils::date::{build_date, format_date},
};
use std::path::PathBuf;

/// Manual page generation for one build.
#[derive(Debug)]
pub struct ManpagePlugin {
    config: PluginConfig,
    site_title: String,
    collector: PageCollector,
    preprocessor: Option<Box<dyn Preprocess>>,
}

impl ManpagePlugin {
    /// Create the plugin from its validated configuration.
    pub fn new(config: PluginConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let collector = PageCollector::new(&config.pages);
        Ok(Self {
            config,
            site_title: String::new(),
            collector,
            preprocessor: None,
        })
    }

    /// Use `preprocessor` instead of the configured script.
    pub fn with_preprocessor(mut self, preprocessor: impl Preprocess + 'static) -> Self {
        self.preprocessor = Some(Box::new(preprocessor));
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn collector(&self) -> &PageCollector {
        &self.collector
    }

    /// Build start: remember the site-wide settings.
    pub fn on_config(&mut self, site: &SiteConfig) {
        self.site_title = site.title.clone();
    }

    /// All page identifiers are known: expand wildcard inputs.
    ///
    /// The identifiers are handed back unchanged. Only the first call
    /// expands.
    pub fn on_files<S: AsRef<str>>(&mut self, page_ids: Vec<S>) -> Vec<S> {
        if self.is_enabled() {
            self.collector.expand(&page_ids);
        }
        page_ids
    }

    /// A page was rendered. The HTML is handed back untouched.
    pub fn on_page_content(&mut self, page_id: &str, html: String) -> String {
        if self.is_enabled() {
            self.collector.record(page_id, &html);
        }
        html
    }

    /// Build end: write every manual page, in configured order.
    ///
    /// A failing target does not stop the others; all failures are
    /// reported together.
    ///
    /// Returns the written paths.
    pub fn on_post_build(&self) -> Result<Vec<PathBuf>, BuildError> {
        if !self.is_enabled() {
            debug!("manpage"; "disabled, skipping");
            return Ok(Vec::new());
        }

        let converter = Converter::discover(&self.config.command);
        let emitter = Emitter::new(&converter, &self.site_title, format_date(build_date()));

        let mut written = Vec::with_capacity(self.config.pages.len());
        let mut failures = Vec::new();
        for (index, page) in self.config.pages.iter().enumerate() {
            match self.emit_target(&emitter, index) {
                Ok(path) => written.push(path),
                Err(err) => {
                    debug!("error"; "{} failed: {err}", page.output.display());
                    failures.push(err);
                }
            }
        }

        if failures.is_empty() {
            Ok(written)
        } else {
            Err(BuildError { failures })
        }
    }

    fn emit_target(&self, emitter: &Emitter<'_>, index: usize) -> Result<PathBuf, ManpageError> {
        let page = &self.config.pages[index];
        let fragments = self.collector.finalize(index)?;

        let script = match (&self.preprocessor, &self.config.preprocess) {
            (None, Some(path)) => {
                Some(
                    ScriptPreprocessor::load(path).map_err(|source| ManpageError::Preprocess {
                        output: page.output.clone(),
                        source,
                    })?,
                )
            }
            _ => None,
        };
        let preprocessor: Option<&dyn Preprocess> = match (&self.preprocessor, &script) {
            (Some(injected), _) => Some(injected.as_ref()),
            (None, Some(script)) => Some(script),
            (None, None) => None,
        };

        emitter
            .clone()
            .with_preprocessor(preprocessor)
            .emit(page, &fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::PageConfig, html::Document, preprocess::FnPreprocessor};
    use std::path::Path;

    fn page(output: &Path, inputs: &[&str]) -> PageConfig {
        PageConfig {
            output: output.to_path_buf(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            title: None,
            header: None,
        }
    }

    fn config(pages: Vec<PageConfig>) -> PluginConfig {
        PluginConfig {
            command: vec!["definitely-not-pandoc-4242".into()],
            pages,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = config(vec![page(Path::new("tool.1"), &[])]);
        assert!(matches!(
            ManpagePlugin::new(config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_page_content_is_returned_unchanged() {
        let mut plugin = ManpagePlugin::new(config(vec![page(Path::new("tool.1"), &["a"])])).unwrap();
        plugin.on_files(vec!["a"]);

        let html = "<p>A <img src=\"x\"></p>".to_string();
        assert_eq!(plugin.on_page_content("a", html.clone()), html);
        assert_eq!(plugin.collector().finalize(0).unwrap(), vec![html.as_str()]);
    }

    #[test]
    fn test_on_files_returns_ids_and_expands_once() {
        let mut plugin =
            ManpagePlugin::new(config(vec![page(Path::new("tool.1"), &["guide/*"])])).unwrap();

        let ids = plugin.on_files(vec!["guide/a", "other"]);
        assert_eq!(ids, vec!["guide/a", "other"]);

        let ids = plugin.on_files(vec!["guide/b".to_string()]);
        assert_eq!(ids, vec!["guide/b".to_string()]);
        assert_eq!(plugin.collector().inputs(0), ["guide/a"]);
    }

    #[test]
    fn test_disabled_collects_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("man/tool.1");
        let mut config = config(vec![page(&output, &["a"])]);
        config.enabled = false;

        let mut plugin = ManpagePlugin::new(config).unwrap();
        plugin.on_config(&SiteConfig::default());
        plugin.on_files(vec!["a"]);
        plugin.on_page_content("a", "<p>A</p>".into());

        assert!(matches!(
            plugin.collector().finalize(0),
            Err(ManpageError::MissingPage { .. })
        ));
        // The converter does not exist, so reaching it would fail.
        assert!(plugin.on_post_build().unwrap().is_empty());
        assert!(!output.exists());
        assert!(!dir.path().join("man").exists());
    }

    #[test]
    fn test_missing_page_fails_naming_it() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin =
            ManpagePlugin::new(config(vec![page(&dir.path().join("tool.1"), &["a", "b"])])).unwrap();
        plugin.on_files(vec!["a"]);
        plugin.on_page_content("a", "<p>A</p>".into());

        let err = plugin.on_post_build().unwrap_err();
        assert_eq!(err.failures.len(), 1);
        assert!(matches!(&err.failures[0], ManpageError::MissingPage { page, .. } if page == "b"));
        assert!(err.to_string().contains("`b`"));
    }

    #[test]
    fn test_targets_fail_independently() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = ManpagePlugin::new(config(vec![
            page(&dir.path().join("one.1"), &["missing"]),
            page(&dir.path().join("two.8"), &["a"]),
        ]))
        .unwrap();
        plugin.on_files(vec!["a"]);
        plugin.on_page_content("a", "<p>A</p>".into());

        let err = plugin.on_post_build().unwrap_err();
        assert_eq!(err.failures.len(), 2);
        assert!(matches!(err.failures[0], ManpageError::MissingPage { .. }));
        assert!(matches!(err.failures[1], ManpageError::Convert { .. }));
    }

    #[test]
    fn test_injected_preprocessor_error_fails_target() {
        let dir = tempfile::tempdir().unwrap();
        let mut plugin = ManpagePlugin::new(config(vec![page(&dir.path().join("tool.1"), &["a"])]))
            .unwrap()
            .with_preprocessor(FnPreprocessor::new("broken", |_: &mut Document, _: &Path| {
                Err("boom".into())
            }));
        plugin.on_files(vec!["a"]);
        plugin.on_page_content("a", "<p>A</p>".into());

        let err = plugin.on_post_build().unwrap_err();
        assert!(matches!(err.failures[0], ManpageError::Preprocess { .. }));
        assert!(err.to_string().contains("boom"));
    }
}
