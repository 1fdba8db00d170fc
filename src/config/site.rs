//! `[site]` section configuration.
//!
//! Describes the rendered site the manual pages are built from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[site]` section in manpage.toml - the rendered site.
///
/// # Example
/// ```toml
/// [site]
/// title = "My Project"
/// dir = "public"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Site-wide title, used when a page does not set its own title.
    #[serde(default)]
    pub title: String,

    /// Directory holding the rendered HTML pages.
    #[serde(default = "defaults::site::dir")]
    #[educe(Default = defaults::site::dir())]
    pub dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::ProjectConfig;
    use std::path::PathBuf;

    #[test]
    fn test_site_config_full() {
        let config = r#"
            [site]
            title = "My Project"
            dir = "public"
        "#;
        let config: ProjectConfig = toml::from_str(config).unwrap();

        assert_eq!(config.site.title, "My Project");
        assert_eq!(config.site.dir, PathBuf::from("public"));
    }

    #[test]
    fn test_site_config_defaults() {
        let config: ProjectConfig = toml::from_str("[site]").unwrap();

        assert_eq!(config.site.title, "");
        assert_eq!(config.site.dir, PathBuf::from("site"));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [site]
            title = "Test"
            url = "https://example.com"
        "#;
        let result: Result<ProjectConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }
}
