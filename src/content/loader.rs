//! Reading posts and pages from the content directory.

use super::{
    collection::Posts,
    post::{Page, Post, slug_from_path},
};
use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

const MARKDOWN_EXT: &str = "md";

/// Page names that would collide with generated routes.
const RESERVED_PAGES: &[&str] = &["blog", "index", "404"];

/// Load every post under `<content>/blog`, in path order.
pub fn load_posts(config: &SiteConfig) -> Result<Posts> {
    let dir = config.posts_dir();
    if !dir.is_dir() {
        log!("content"; "no posts directory at {}", dir.display());
        return Ok(Posts::default());
    }

    let files = markdown_files(&dir, usize::MAX)?;
    let items = files
        .par_iter()
        .map(|path| -> Result<Post> {
            let text = read(path)?;
            let relative = path.strip_prefix(&dir).unwrap_or(path);
            Ok(Post::parse(path, slug_from_path(relative), &text, &config.base.author)?)
        })
        .collect::<Result<Vec<_>>>()?;

    let posts = Posts::new(items)?;
    log!("content"; "loaded {} posts ({} published)", posts.len(), posts.published().count());
    Ok(posts)
}

/// Load standalone pages directly under `<content>`.
pub fn load_pages(config: &SiteConfig) -> Result<Vec<Page>> {
    let dir = &config.build.content;
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let files = markdown_files(dir, 1)?;
    files
        .par_iter()
        .filter_map(|path| {
            let name = path.file_stem()?.to_string_lossy().into_owned();
            if RESERVED_PAGES.contains(&name.as_str()) {
                log!("content"; "skipping reserved page name `{}`", name);
                return None;
            }
            Some(read(path).and_then(|text| Ok(Page::parse(path, name, &text)?)))
        })
        .collect()
}

/// Markdown files under `dir`, sorted by path.
fn markdown_files(dir: &Path, max_depth: usize) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).max_depth(max_depth).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == MARKDOWN_EXT)
        {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
