//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build Unix manual pages from the rendered pages of a static site
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: manpage.toml)
    #[arg(short = 'C', long, default_value = "manpage.toml")]
    pub config: PathBuf,

    /// Print debug output, including the converter's own output
    #[arg(short, long)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared arguments for Build and Check commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Directory holding the rendered site (relative to project root)
    #[arg(short, long)]
    pub site: Option<PathBuf>,

    /// Override the site title used as the default man page title
    #[arg(short, long)]
    pub title: Option<String>,

    /// enable or disable manual page generation
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub enabled: Option<bool>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Collect the configured pages and convert them to manual pages
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Validate the config and show which pages each manual page uses
    Check {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build() {
        let cli = Cli::parse_from(["tola-manpage", "-v", "build", "--site", "public"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("manpage.toml"));

        let Commands::Build { build_args } = cli.command else {
            panic!("expected build command");
        };
        assert_eq!(build_args.site, Some(PathBuf::from("public")));
        assert_eq!(build_args.enabled, None);
    }

    #[test]
    fn test_parse_enabled_flag() {
        let cli = Cli::parse_from(["tola-manpage", "check", "--enabled"]);
        let Commands::Check { build_args } = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(build_args.enabled, Some(true));
    }
}
