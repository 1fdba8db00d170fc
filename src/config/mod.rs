//! Project configuration management for `manpage.toml`.
//!
//! # Sections
//!
//! | Section               | Purpose                                     |
//! |-----------------------|---------------------------------------------|
//! | `[site]`              | Site title and rendered HTML directory      |
//! | `[manpage]`           | Plugin switch, preprocess script, converter |
//! | `[[manpage.pages]]`   | One entry per manual page to produce        |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Project"
//! dir = "site"
//!
//! [manpage]
//! preprocess = "scripts/preprocess.sh"
//!
//! [[manpage.pages]]
//! output = "share/man/man1/project.1"
//! inputs = ["index.html", "usage/*"]
//! ```

pub mod defaults;
mod error;
mod manpage;
mod site;

pub use error::ConfigError;
pub use manpage::{PageConfig, PluginConfig};
pub use site::SiteConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing manpage.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Rendered site information
    #[serde(default)]
    pub site: SiteConfig,

    /// Manual page generation settings
    #[serde(default)]
    pub manpage: PluginConfig,
}

impl ProjectConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: ProjectConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config = Self::from_str(&content)?;
        config.config_path = normalize_path(path);
        Ok(config)
    }

    /// Directory every relative path in the file is resolved against
    pub fn get_root(&self) -> &Path {
        self.config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("./"))
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let (Commands::Build { build_args } | Commands::Check { build_args }) = &cli.command;

        update_option(&mut self.site.dir, build_args.site.as_ref());
        update_option(&mut self.site.title, build_args.title.as_ref());
        update_option(&mut self.manpage.enabled, build_args.enabled.as_ref());
    }

    /// Resolve every path relative to the config file directory.
    pub fn resolve_paths(&mut self) {
        let root = self.get_root().to_path_buf();

        self.site.dir = resolve_path(&root, &self.site.dir);
        if let Some(preprocess) = &self.manpage.preprocess {
            self.manpage.preprocess = Some(resolve_path(&root, preprocess));
        }
        for page in &mut self.manpage.pages {
            page.output = resolve_path(&root, &page.output);
        }
    }

    /// Validate configuration before any page is processed
    pub fn validate(&self) -> Result<()> {
        self.manpage.validate()?;

        if !self.site.dir.exists() {
            bail!(ConfigError::Validation(format!(
                "[site.dir] `{}` not found",
                self.site.dir.display()
            )));
        }
        if !self.site.dir.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[site.dir] `{}` is not a directory",
                self.site.dir.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Update config option if CLI value is provided
fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
    if let Some(option) = cli_option {
        *config_option = option.clone();
    }
}

/// Expand `~` and join relative paths onto `root`.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    let path = match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    };
    if path.is_relative() {
        normalize_path(&root.join(path))
    } else {
        normalize_path(&path)
    }
}

/// Normalize a path to absolute, using canonicalize if the path exists
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        // For non-existent paths, manually make them absolute
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_str() {
        let config = ProjectConfig::from_str(
            r#"
            [site]
            title = "My Project"

            [[manpage.pages]]
            output = "tool.1"
            inputs = ["index.html"]
        "#,
        )
        .unwrap();

        assert_eq!(config.site.title, "My Project");
        assert_eq!(config.manpage.pages.len(), 1);
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = ProjectConfig::from_str("[site\ntitle = 1");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_from_path_missing() {
        let result = ProjectConfig::from_path(Path::new("/no/such/manpage.toml"));
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }

    #[test]
    fn test_unknown_top_level_field_rejection() {
        let result = ProjectConfig::from_str("[build]\noutput = \"public\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let path = root.join("manpage.toml");
        fs::write(
            &path,
            r#"
            [site]
            dir = "public"

            [[manpage.pages]]
            output = "share/man/man1/tool.1"
            inputs = ["index.html"]
        "#,
        )
        .unwrap();

        let mut config = ProjectConfig::from_path(&path).unwrap();
        config.resolve_paths();

        assert_eq!(config.get_root(), root.as_path());
        assert_eq!(config.site.dir, root.join("public"));
        assert_eq!(
            config.manpage.pages[0].output,
            root.join("share/man/man1/tool.1")
        );
    }

    #[test]
    fn test_resolve_path_absolute_kept() {
        let resolved = resolve_path(Path::new("/root/project"), Path::new("/tmp/tool.1"));
        assert_eq!(resolved, PathBuf::from("/tmp/tool.1"));
    }

    #[test]
    fn test_update_with_cli() {
        let cli = Cli::parse_from([
            "tola-manpage",
            "build",
            "--site",
            "public",
            "--title",
            "Overridden",
            "--enabled=false",
        ]);
        let mut config = ProjectConfig::default();
        config.update_with_cli(&cli);

        assert_eq!(config.site.dir, PathBuf::from("public"));
        assert_eq!(config.site.title, "Overridden");
        assert!(!config.manpage.enabled);
    }

    #[test]
    fn test_validate_missing_site_dir() {
        let config = ProjectConfig {
            site: SiteConfig {
                dir: PathBuf::from("/no/such/site"),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("[site.dir]"));
    }

    #[test]
    fn test_project_config_default() {
        let config = ProjectConfig::default();

        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.get_root(), Path::new("./"));
        assert!(config.manpage.enabled);
        assert_eq!(config.site.dir, PathBuf::from("site"));
    }
}
