//! Tola Manpage - turn the rendered pages of a static site into Unix manual pages.
//!
//! The crate is driven through [`ManpagePlugin`]: a host announces the known
//! page identifiers, feeds every rendered page, and asks for the manual pages
//! once the site is built. The `tola-manpage` binary is such a host for a
//! directory of already rendered HTML.

pub mod logger;

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod html;
pub mod manpage;
pub mod plugin;
pub mod preprocess;
pub mod site;
pub mod utils;

pub use collector::{PageCollector, expand_inputs};
pub use config::{PageConfig, PluginConfig, ProjectConfig, SiteConfig};
pub use error::{BuildError, ManpageError};
pub use html::Document;
pub use manpage::Section;
pub use plugin::ManpagePlugin;
pub use preprocess::{FnPreprocessor, Preprocess, PreprocessError, ScriptPreprocessor};
