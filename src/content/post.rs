//! Posts and standalone pages.

use super::{
    ContentError,
    frontmatter::{self, FrontMatter},
    heading::HeadingNode,
    markdown::{self, Compiled},
};
use crate::utils::date::PostDate;
use serde::Serialize;
use std::{
    collections::BTreeSet,
    path::{Component, Path, PathBuf},
};

/// A blog article.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Unique identifier, e.g. `2024/hello-world`.
    pub slug: String,
    pub title: String,
    pub description: String,
    pub date: PostDate,
    pub author: String,
    pub tags: BTreeSet<String>,
    /// Cover and social image, absolute or site-relative.
    pub image: Option<String>,
    /// Only published posts are listed; unpublished ones keep their page.
    pub published: bool,
    pub toc: Vec<HeadingNode>,
    /// Compiled HTML body.
    #[serde(skip)]
    pub body: String,
    #[serde(skip)]
    pub has_diagram: bool,
    #[serde(skip)]
    pub source: PathBuf,
}

impl Post {
    /// Parse a post from its source text.
    ///
    /// `slug` is the path-derived slug; front matter `slug` overrides it.
    pub fn parse(
        source: &Path,
        slug: String,
        text: &str,
        default_author: &str,
    ) -> Result<Self, ContentError> {
        let (meta, compiled) = parse_document(source, text)?;

        let raw_date = meta
            .date
            .ok_or_else(|| ContentError::MissingDate(source.to_path_buf()))?;
        let date = PostDate::parse(&raw_date).ok_or_else(|| ContentError::InvalidDate {
            path: source.to_path_buf(),
            date: raw_date.clone(),
        })?;

        let slug = meta.slug.unwrap_or(slug);
        if let Err(reason) = check_slug(&slug) {
            return Err(ContentError::InvalidSlug {
                path: source.to_path_buf(),
                slug,
                reason,
            });
        }

        Ok(Self {
            slug,
            title: meta.title,
            description: meta.description,
            date,
            author: meta.author.unwrap_or_else(|| default_author.to_owned()),
            tags: meta
                .tags
                .into_iter()
                .map(|tag| tag.trim().to_owned())
                .filter(|tag| !tag.is_empty())
                .collect(),
            image: meta.image,
            published: meta.published,
            toc: compiled.toc,
            body: compiled.html,
            has_diagram: compiled.has_diagram,
            source: source.to_path_buf(),
        })
    }

    /// Site-relative URL, e.g. `/blog/2024/hello-world`.
    pub fn url_path(&self) -> String {
        format!("/blog/{}", self.slug)
    }

    /// True when the post carries every tag in `selected`.
    pub fn has_all_tags(&self, selected: &BTreeSet<String>) -> bool {
        selected.is_subset(&self.tags)
    }
}

/// A standalone page such as `about.md`.
#[derive(Debug, Clone)]
pub struct Page {
    /// File stem, used as the URL segment.
    pub name: String,
    pub title: String,
    pub description: String,
    pub date: Option<PostDate>,
    pub toc: Vec<HeadingNode>,
    pub body: String,
    pub has_diagram: bool,
    pub source: PathBuf,
}

impl Page {
    pub fn parse(source: &Path, name: String, text: &str) -> Result<Self, ContentError> {
        let (meta, compiled) = parse_document(source, text)?;

        let date = match meta.date {
            Some(raw) => Some(PostDate::parse(&raw).ok_or_else(|| ContentError::InvalidDate {
                path: source.to_path_buf(),
                date: raw.clone(),
            })?),
            None => None,
        };

        Ok(Self {
            name,
            title: meta.title,
            description: meta.description,
            date,
            toc: compiled.toc,
            body: compiled.html,
            has_diagram: compiled.has_diagram,
            source: source.to_path_buf(),
        })
    }

    pub fn url_path(&self) -> String {
        format!("/{}/", self.name)
    }
}

fn parse_document(source: &Path, text: &str) -> Result<(FrontMatter, Compiled), ContentError> {
    let (raw_meta, body) = frontmatter::split(text)
        .ok_or_else(|| ContentError::MissingFrontMatter(source.to_path_buf()))?;
    let meta: FrontMatter = toml::from_str(raw_meta)
        .map_err(|err| ContentError::FrontMatter(source.to_path_buf(), err))?;
    Ok((meta, markdown::compile(body)))
}

/// First path segments taken by listing routes under `/blog/`.
const RESERVED_SEGMENTS: [&str; 2] = ["page", "tags"];

/// A slug is one or more `/`-separated path segments that stay inside
/// `/blog/` and do not shadow a listing route.
fn check_slug(slug: &str) -> Result<(), &'static str> {
    if slug.is_empty() {
        return Err("slug is empty");
    }
    if slug.contains(['\\', '?', '#']) {
        return Err("slug contains `\\`, `?` or `#`");
    }
    let mut segments = slug.split('/');
    if segments.clone().any(|segment| matches!(segment, "" | "." | "..")) {
        return Err("slug must be relative, without `.` or `..` segments");
    }
    if segments.next().is_some_and(|first| RESERVED_SEGMENTS.contains(&first)) {
        return Err("slug starts with a reserved listing segment");
    }
    Ok(())
}

/// Slug for a path relative to the posts directory: `2024/hello.md` → `2024/hello`.
pub fn slug_from_path(relative: &Path) -> String {
    let stemmed = relative.with_extension("");
    stemmed
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
pub(crate) fn sample(slug: &str, date: &str, tags: &[&str], published: bool) -> Post {
    Post {
        slug: slug.to_owned(),
        title: format!("Post {slug}"),
        description: String::new(),
        date: PostDate::parse(date).unwrap(),
        author: "Alice".to_owned(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        image: None,
        published,
        toc: Vec::new(),
        body: String::new(),
        has_diagram: false,
        source: PathBuf::from(format!("{slug}.md")),
    }
}
