//! Tola Manpage - build Unix manual pages from a rendered static site.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tola_manpage::{
    ManpagePlugin, ProjectConfig,
    cli::{Cli, Commands},
    debug, log, logger,
    site::{SitePage, collect_pages},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    let config = load_config(&cli)?;
    let pages = collect_pages(&config.site.dir);

    let mut plugin = ManpagePlugin::new(config.manpage.clone())?;
    plugin.on_config(&config.site);
    let ids = plugin.on_files(pages.iter().map(|page| page.id.as_str()).collect::<Vec<_>>());
    debug!("manpage"; "{} rendered page(s) in {}", ids.len(), config.site.dir.display());

    match &cli.command {
        Commands::Build { .. } => build(&mut plugin, &pages),
        Commands::Check { .. } => {
            check(&plugin);
            Ok(())
        }
    }
}

/// Load, override and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<ProjectConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = ProjectConfig::from_path(&config_path)
        .with_context(|| format!("Failed to load `{}`", config_path.display()))?;
    config.update_with_cli(cli);
    config.resolve_paths();
    config.validate()?;

    Ok(config)
}

/// Feed every rendered page to the plugin, then write the manual pages.
fn build(plugin: &mut ManpagePlugin, pages: &[SitePage]) -> Result<()> {
    if !plugin.is_enabled() {
        log!("manpage"; "disabled");
        return Ok(());
    }

    for page in pages {
        let html = page.read()?;
        plugin.on_page_content(&page.id, html);
    }

    let written = plugin.on_post_build()?;
    log!("manpage"; "{} manual page(s) written", written.len());
    Ok(())
}

/// Print each manual page with the pages it is made of.
fn check(plugin: &ManpagePlugin) {
    let collector = plugin.collector();
    for index in 0..collector.len() {
        let Some(output) = collector.output(index) else {
            continue;
        };
        log!("manpage"; "{}", output.display());
        let inputs = collector.inputs(index);
        if inputs.is_empty() {
            log!("warn"; "  no pages match");
        }
        for input in inputs {
            log!("manpage"; "  {input}");
        }
    }
}
