//! Document head metadata: title, description, canonical URL, Open Graph
//! and Twitter cards.

use super::structured;
use crate::{
    config::SiteConfig,
    content::Post,
    utils::html::escape_html,
};
use serde_json::Value;
use std::fmt::Write;

/// Social preview image size advertised in Open Graph tags.
const OG_IMAGE_WIDTH: u32 = 1200;
const OG_IMAGE_HEIGHT: u32 = 630;

/// Open Graph object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OgKind {
    Website,
    Article {
        published: String,
        author: String,
        tags: Vec<String>,
    },
}

/// Everything rendered into `<head>` besides the stylesheet and scripts.
#[derive(Debug, Clone)]
pub struct HeadMeta {
    /// Full `<title>` text.
    pub title: String,
    /// Title for social cards (without the site suffix).
    pub social_title: String,
    pub description: String,
    pub canonical: Option<String>,
    pub image: String,
    pub kind: OgKind,
    pub site_name: String,
    pub language: String,
    pub twitter_creator: Option<String>,
    pub json_ld: Vec<Value>,
}

impl HeadMeta {
    /// Site-level metadata for listing, home and standalone pages.
    ///
    /// `title` is `None` for the home page, which uses the full site title.
    pub fn page(config: &SiteConfig, title: Option<&str>, description: &str, path: &str) -> Self {
        let site = config.base.site_url();
        let full_title = match title {
            Some(title) => format!("{title} | {}", config.base.title),
            None => config.base.full_title(),
        };
        let description = if description.is_empty() {
            config.base.description.clone()
        } else {
            description.to_owned()
        };

        Self {
            social_title: full_title.clone(),
            title: full_title,
            description,
            canonical: (!site.is_empty()).then(|| format!("{site}{path}")),
            image: resolve_image(config, None),
            kind: OgKind::Website,
            site_name: config.base.title.clone(),
            language: config.base.language.clone(),
            twitter_creator: config.base.twitter.clone(),
            json_ld: vec![structured::site_graph(config)],
        }
    }

    /// Article metadata for a post page.
    pub fn post(config: &SiteConfig, post: &Post) -> Self {
        let site = config.base.site_url();
        let image = resolve_image(config, post.image.as_deref());

        Self {
            title: format!("{} | {}", post.title, config.base.title),
            social_title: post.title.clone(),
            description: post.description.clone(),
            canonical: (!site.is_empty()).then(|| format!("{site}{}", post.url_path())),
            json_ld: vec![
                structured::site_graph(config),
                structured::blog_posting(config, post, &image),
            ],
            image,
            kind: OgKind::Article {
                published: post.date.rfc3339(),
                author: post.author.clone(),
                tags: post.tags.iter().cloned().collect(),
            },
            site_name: config.base.title.clone(),
            language: config.base.language.clone(),
            twitter_creator: config.base.twitter.clone(),
        }
    }

    /// Render as `<head>` children.
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(2048);
        let title = escape_html(&self.title);
        let social_title = escape_html(&self.social_title);
        let description = escape_html(&self.description);
        let image = escape_html(&self.image);

        let _ = writeln!(html, "<title>{title}</title>");
        meta_name(&mut html, "description", &description);
        if let Some(canonical) = &self.canonical {
            let _ = writeln!(html, r#"<link rel="canonical" href="{}">"#, escape_html(canonical));
            meta_property(&mut html, "og:url", &escape_html(canonical));
        }

        meta_property(&mut html, "og:title", &social_title);
        meta_property(&mut html, "og:description", &description);
        meta_property(&mut html, "og:site_name", &escape_html(&self.site_name));
        meta_property(&mut html, "og:locale", &self.language.replace('-', "_"));
        meta_property(&mut html, "og:image", &image);
        meta_property(&mut html, "og:image:width", &OG_IMAGE_WIDTH.to_string());
        meta_property(&mut html, "og:image:height", &OG_IMAGE_HEIGHT.to_string());
        meta_property(&mut html, "og:image:alt", &social_title);

        match &self.kind {
            OgKind::Website => meta_property(&mut html, "og:type", "website"),
            OgKind::Article {
                published,
                author,
                tags,
            } => {
                meta_property(&mut html, "og:type", "article");
                meta_property(&mut html, "article:published_time", published);
                meta_property(&mut html, "article:author", &escape_html(author));
                for tag in tags {
                    meta_property(&mut html, "article:tag", &escape_html(tag));
                }
            }
        }

        meta_name(&mut html, "twitter:card", "summary_large_image");
        meta_name(&mut html, "twitter:title", &social_title);
        meta_name(&mut html, "twitter:description", &description);
        meta_name(&mut html, "twitter:image", &image);
        if let Some(creator) = &self.twitter_creator {
            meta_name(&mut html, "twitter:creator", &escape_html(creator));
        }

        for value in &self.json_ld {
            html.push_str(&structured::script_tag(value));
            html.push('\n');
        }
        html
    }
}

fn meta_name(html: &mut String, name: &str, content: &str) {
    let _ = writeln!(html, r#"<meta name="{name}" content="{content}">"#);
}

fn meta_property(html: &mut String, property: &str, content: &str) {
    let _ = writeln!(html, r#"<meta property="{property}" content="{content}">"#);
}

/// Absolute social image URL.
///
/// Absolute URLs are kept, root-relative paths get the site URL prefixed,
/// anything else falls back to `[base.og_image]`.
pub fn resolve_image(config: &SiteConfig, image: Option<&str>) -> String {
    let site = config.base.site_url();
    let absolute = |path: &str| {
        if is_absolute_url(path) {
            path.to_owned()
        } else {
            format!("{site}{path}")
        }
    };

    match image {
        Some(image) if is_absolute_url(image) || image.starts_with('/') => absolute(image),
        _ => absolute(&config.base.og_image),
    }
}

fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
