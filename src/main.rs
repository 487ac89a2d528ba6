//! Folio - A static site generator for Markdown blogs.

mod assets;
mod build;
mod cli;
mod config;
mod content;
mod listing;
mod logger;
mod render;
mod seo;
mod serve;
mod theme;
mod utils;

use anyhow::{Context, Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands, ThemeCommand};
use config::SiteConfig;
use content::load_posts;
use seo::build_sitemap;
use serve::serve_site;
use std::path::Path;
use theme::{FileThemeStore, ThemeAction};

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Build { .. } => build_all(config),
        Commands::Serve { .. } => {
            build_all(config)?;
            serve_site(config)
        }
        Commands::Post { slug } => print_post(config, slug),
        Commands::Theme { action } => run_theme(config, *action),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);

    if cli.is_build() || cli.is_serve() {
        config.validate()?;
    }

    Ok(config)
}

/// Build the site, then the sitemap from the loaded posts.
fn build_all(config: &'static SiteConfig) -> Result<()> {
    let posts = build_site(config)?;
    build_sitemap(config, &posts)
}

/// Print a post's metadata as JSON, or exit non-zero when no post matches.
fn print_post(config: &SiteConfig, slug: &str) -> Result<()> {
    let posts = load_posts(config)?;
    let Some(post) = posts.find_by_slug(slug) else {
        log!("error"; "no post with slug `{}`", slug);
        std::process::exit(1);
    };

    let json = serde_json::to_string_pretty(post).context("Failed to serialize post")?;
    println!("{json}");
    Ok(())
}

fn run_theme(config: &SiteConfig, command: ThemeCommand) -> Result<()> {
    let mut store = FileThemeStore::new(config.theme_state_path());
    let state = theme::load_state(&store, config.base.theme)?;

    let state = match command {
        ThemeCommand::Show => state,
        ThemeCommand::Toggle => theme::dispatch(&mut store, state, ThemeAction::Toggle)?,
    };

    log!("theme"; "{} ({})", state.theme.html_class(), store.path().display());
    Ok(())
}
