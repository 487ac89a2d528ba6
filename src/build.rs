//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── load_posts() / load_pages()  ──► Posts, Vec<Page>
//!     │
//!     ├── ListingRoutes::collect()     ──► listing states to render
//!     │
//!     ├── render jobs (rayon)          ──► <output>/**/index.html, 404.html
//!     │
//!     └── copy_assets() + stylesheet
//! ```

use crate::{
    assets::copy_assets,
    config::SiteConfig,
    content::{Page, Post, Posts, load_pages, load_posts},
    listing::{ListingRoutes, ListingState},
    log,
    render::{self, Renderer},
    theme::{self, FileThemeStore},
    utils::{
        css,
        minify::{OutputKind, minify},
    },
};
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Route of the not-found page, served for unknown paths.
pub const NOT_FOUND_ROUTE: &str = "/404.html";

/// One page to render.
#[derive(Debug)]
enum Job<'a> {
    Home,
    Post(&'a Post),
    Page(&'a Page),
    Listing { state: ListingState, route: String },
    NotFound,
}

impl Job<'_> {
    fn route(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Post(post) => post.url_path(),
            Self::Page(page) => page.url_path(),
            Self::Listing { route, .. } => route.clone(),
            Self::NotFound => NOT_FOUND_ROUTE.to_owned(),
        }
    }

    fn render(&self, renderer: &Renderer<'_>, posts: &Posts, routes: &ListingRoutes) -> String {
        match self {
            Self::Home => render::home_page(renderer, posts.as_slice()),
            Self::Post(post) => render::post_page(renderer, post),
            Self::Page(page) => render::standalone_page(renderer, page),
            Self::Listing { state, .. } => render::listing_page(renderer, posts.as_slice(), state, routes),
            Self::NotFound => render::not_found_page(renderer),
        }
    }
}

/// Build the entire site.
///
/// Returns the loaded posts for sitemap generation.
/// If `config.build.clean` is true, clears the entire output directory first.
pub fn build_site(config: &SiteConfig) -> Result<Posts> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let store = FileThemeStore::new(config.theme_state_path());
    let state = theme::load_state(&store, config.base.theme)?;
    log!("theme"; "{}", state.theme.html_class());

    let posts = load_posts(config)?;
    let pages = load_pages(config)?;

    let renderer = Renderer::new(config, state, &pages);
    let routes = ListingRoutes::collect(posts.as_slice(), config.build.listing.tag_pages);
    let jobs = collect_jobs(&posts, &pages, &routes)?;
    log!("build"; "rendering {} pages", jobs.len());

    let (rendered, copied) = rayon::join(
        || {
            jobs.par_iter().try_for_each(|job| {
                let html = job.render(&renderer, &posts, &routes);
                write_page(output, &job.route(), &html, config.build.minify)
            })
        },
        || copy_assets(config),
    );
    rendered?;
    copied?;

    if css::write_stylesheet(output)? {
        log!("build"; "wrote default {}", css::STYLESHEET);
    }

    log_build_result(output)?;
    Ok(posts)
}

/// Every page of the site.
///
/// Two jobs writing the same output file is an error.
fn collect_jobs<'a>(
    posts: &'a Posts,
    pages: &'a [Page],
    routes: &ListingRoutes,
) -> Result<Vec<Job<'a>>> {
    let mut jobs = vec![Job::Home, Job::NotFound];
    jobs.extend(posts.iter().map(Job::Post));
    jobs.extend(pages.iter().map(Job::Page));
    jobs.extend(routes.states(posts.as_slice()).into_iter().map(|state| {
        let route = routes.path(&state);
        Job::Listing { state, route }
    }));

    let mut seen: HashMap<PathBuf, String> = HashMap::with_capacity(jobs.len());
    for job in &jobs {
        let route = job.route();
        let file = output_file(Path::new(""), &route);
        if let Some(first) = seen.insert(file, route.clone()) {
            bail!("routes `{first}` and `{route}` write the same page");
        }
    }
    Ok(jobs)
}

/// Output file for a route: `/blog/x/` → `<output>/blog/x/index.html`.
pub fn output_file(output: &Path, route: &str) -> PathBuf {
    let relative = route.trim_matches('/');
    if relative.is_empty() {
        output.join("index.html")
    } else if relative.ends_with(".html") {
        output.join(relative)
    } else {
        output.join(relative).join("index.html")
    }
}

fn write_page(output: &Path, route: &str, html: &str, minify_enabled: bool) -> Result<()> {
    let path = output_file(output, route);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = minify(html.as_bytes(), OutputKind::Html, minify_enabled);
    fs::write(&path, &*content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Create the output directory, clearing it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Log build result based on output directory contents
fn log_build_result(output: &Path) -> Result<()> {
    let file_count = fs::read_dir(output)?.filter_map(Result::ok).count();

    if file_count == 0 {
        log!("warn"; "output is empty, check the content directory");
    } else {
        log!("build"; "done");
    }

    Ok(())
}
