//! TOML front matter between `+++` fences.
//!
//! ```text
//! +++
//! title = "Hello"
//! date = "2024-01-15"
//! tags = ["rust"]
//! +++
//! Body in Markdown.
//! ```

use crate::config::defaults;
use serde::Deserialize;

const FENCE: &str = "+++";

/// Metadata block at the top of a content file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontMatter {
    pub title: String,
    /// ISO-8601 date; required for posts, optional for pages.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Defaults to `[base.author]`.
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Cover image, absolute URL or site-relative path.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "defaults::r#true")]
    pub published: bool,
    /// Override for the path-derived slug.
    #[serde(default)]
    pub slug: Option<String>,
}

/// Split a source file into `(front matter, body)`.
///
/// Returns `None` when the file does not open with a `+++` fence or the
/// closing fence is missing.
pub fn split(source: &str) -> Option<(&str, &str)> {
    let source = source.trim_start_matches('\u{feff}');
    let rest = source.strip_prefix(FENCE)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
