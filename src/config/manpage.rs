//! `[manpage]` section configuration.
//!
//! Contains the plugin switch, the optional preprocessing script, the
//! converter command and one `[[manpage.pages]]` entry per manual page.

use super::{defaults, error::ConfigError};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[manpage]` section in manpage.toml - plugin settings.
///
/// # Example
/// ```toml
/// [manpage]
/// enabled = true
/// preprocess = "scripts/preprocess.sh"
///
/// [[manpage.pages]]
/// output = "share/man/man1/project.1"
/// inputs = ["index.html", "usage/*"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    /// Turn manual page generation on or off.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enabled: bool,

    /// Executable run on every manual page document before conversion.
    #[serde(default = "defaults::manpage::preprocess")]
    #[educe(Default = defaults::manpage::preprocess())]
    pub preprocess: Option<PathBuf>,

    /// Converter command and leading arguments.
    #[serde(default = "defaults::manpage::command")]
    #[educe(Default = defaults::manpage::command())]
    pub command: Vec<String>,

    /// Manual pages to produce, in order.
    #[serde(default)]
    pub pages: Vec<PageConfig>,
}

/// One `[[manpage.pages]]` entry: a single manual page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// Where the manual page is written. The extension selects the section.
    pub output: PathBuf,

    /// Page identifiers to concatenate, `*`/`?`/`[...]` patterns allowed.
    pub inputs: Vec<String>,

    /// Title shown in the manual page heading (defaults to the site title).
    #[serde(default)]
    pub title: Option<String>,

    /// Section header text (defaults to the conventional one for the section).
    #[serde(default)]
    pub header: Option<String>,
}

impl PluginConfig {
    /// Check the shape of the section.
    ///
    /// Paths are expected to be resolved already.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command.is_empty() {
            return Err(ConfigError::Validation(
                "[manpage.command] must have at least one element".into(),
            ));
        }

        if let Some(path) = &self.preprocess {
            if !path.exists() {
                return Err(ConfigError::Validation(format!(
                    "[manpage.preprocess] `{}` not found",
                    path.display()
                )));
            }
            if !path.is_file() {
                return Err(ConfigError::Validation(format!(
                    "[manpage.preprocess] `{}` is not a file",
                    path.display()
                )));
            }
        }

        for (index, page) in self.pages.iter().enumerate() {
            if page.output.file_name().is_none() || page.output.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "[manpage.pages.{index}.output] must name a file"
                )));
            }
            if page.inputs.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "[manpage.pages.{index}.inputs] must list at least one page"
                )));
            }
            if let Some(input) = page.inputs.iter().find(|input| input.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "[manpage.pages.{index}.inputs] contains an empty entry: {input:?}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::ProjectConfig;
    use super::*;

    fn parse(content: &str) -> PluginConfig {
        let config: ProjectConfig = toml::from_str(content).unwrap();
        config.manpage
    }

    #[test]
    fn test_manpage_defaults() {
        let config = parse("");

        assert!(config.enabled);
        assert_eq!(config.preprocess, None);
        assert_eq!(config.command, vec!["pandoc".to_string()]);
        assert!(config.pages.is_empty());
    }

    #[test]
    fn test_manpage_pages() {
        let config = parse(
            r#"
            [manpage]
            enabled = false

            [[manpage.pages]]
            output = "share/man/man1/tool.1"
            inputs = ["index.html", "usage/*"]
            title = "tool"

            [[manpage.pages]]
            output = "share/man/man8/toold.8"
            inputs = ["admin.html"]
            header = "Daemons"
        "#,
        );

        assert!(!config.enabled);
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[0].output, PathBuf::from("share/man/man1/tool.1"));
        assert_eq!(config.pages[0].inputs, vec!["index.html", "usage/*"]);
        assert_eq!(config.pages[0].title.as_deref(), Some("tool"));
        assert_eq!(config.pages[0].header, None);
        assert_eq!(config.pages[1].header.as_deref(), Some("Daemons"));
    }

    #[test]
    fn test_page_requires_output_and_inputs() {
        let missing_inputs = r#"
            [[manpage.pages]]
            output = "tool.1"
        "#;
        assert!(toml::from_str::<ProjectConfig>(missing_inputs).is_err());

        let missing_output = r#"
            [[manpage.pages]]
            inputs = ["index.html"]
        "#;
        assert!(toml::from_str::<ProjectConfig>(missing_output).is_err());
    }

    #[test]
    fn test_page_rejects_unknown_fields() {
        let config = r#"
            [[manpage.pages]]
            output = "tool.1"
            inputs = ["index.html"]
            section = 1
        "#;
        assert!(toml::from_str::<ProjectConfig>(config).is_err());
    }

    #[test]
    fn test_validate_ok() {
        let config = parse(
            r#"
            [[manpage.pages]]
            output = "tool.1"
            inputs = ["index.html"]
        "#,
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_inputs() {
        let config = parse(
            r#"
            [[manpage.pages]]
            output = "tool.1"
            inputs = []
        "#,
        );
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[manpage.pages.0.inputs]"));
    }

    #[test]
    fn test_validate_empty_command() {
        let config = parse(
            r#"
            [manpage]
            command = []
        "#,
        );
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[manpage.command]"));
    }

    #[test]
    fn test_validate_missing_preprocess() {
        let config = PluginConfig {
            preprocess: Some(PathBuf::from("/definitely/not/here.sh")),
            ..Default::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("not found"));
    }

    #[test]
    fn test_validate_preprocess_is_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = PluginConfig {
            preprocess: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("is not a file"));
    }
}
