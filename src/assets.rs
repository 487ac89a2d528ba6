//! Static file copying.
//!
//! ```text
//! <assets>/**            ──► <output>/**
//! <content>/** (non-.md) ──► <output>/**   (images next to posts)
//! ```

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files from a directory recursively.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Check if destination is at least as new as the source.
pub fn is_up_to_date(src: &Path, dst: &Path) -> bool {
    let (Ok(src_meta), Ok(dst_meta)) = (src.metadata(), dst.metadata()) else {
        return false;
    };
    match (src_meta.modified(), dst_meta.modified()) {
        (Ok(src_time), Ok(dst_time)) => src_time <= dst_time,
        _ => false,
    }
}

/// Copy `<assets>` and non-Markdown content files into the output directory.
///
/// Returns the number of files copied.
pub fn copy_assets(config: &SiteConfig) -> Result<usize> {
    let assets = collect_all_files(&config.build.assets);
    let content_files: Vec<PathBuf> = collect_all_files(&config.build.content)
        .into_iter()
        .filter(|p| p.extension().is_none_or(|ext| ext != "md"))
        .collect();

    let copy_all = |files: &[PathBuf], root: &Path| -> Result<usize> {
        files
            .par_iter()
            .map(|path| copy_file(path, root, config))
            .try_fold(|| 0, |count, copied| copied.map(|c| count + usize::from(c)))
            .try_reduce(|| 0, |a, b| Ok(a + b))
    };

    let (assets, content) = rayon::join(
        || copy_all(&assets, &config.build.assets),
        || copy_all(&content_files, &config.build.content),
    );
    let copied = assets? + content?;

    if copied > 0 {
        log!("assets"; "copied {} files", copied);
    }
    Ok(copied)
}

/// Copy one file, keeping its path relative to `root`. Skips up-to-date files.
fn copy_file(path: &Path, root: &Path, config: &SiteConfig) -> Result<bool> {
    let relative = path
        .strip_prefix(root)
        .with_context(|| format!("{} is not under {}", path.display(), root.display()))?;
    let dest = config.build.output.join(relative);

    if !config.build.clean && is_up_to_date(path, &dest) {
        return Ok(false);
    }

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(path, &dest)
        .with_context(|| format!("Failed to copy {} to {}", path.display(), dest.display()))?;
    Ok(true)
}
