//! Sitemap generation.
//!
//! Static routes come first, then one entry per published post.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/blog/hello</loc>
//!     <lastmod>2024-01-15</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>0.8</priority>
//!   </url>
//! </urlset>
//! ```

use crate::{
    config::SiteConfig,
    content::Posts,
    log,
    utils::{
        date::today_ymd,
        html::escape_xml,
        minify::{OutputKind, minify},
    },
};
use anyhow::{Context, Result};
use std::fs;

// ============================================================================
// Constants
// ============================================================================

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const POST_PRIORITY: f32 = 0.8;
const HOME_PRIORITY: f32 = 1.0;
const ROUTE_PRIORITY: f32 = 0.9;

// ============================================================================
// Public API
// ============================================================================

/// Build sitemap if enabled in config.
pub fn build_sitemap(config: &SiteConfig, posts: &Posts) -> Result<()> {
    if config.build.sitemap.enable {
        let sitemap = Sitemap::new(config, posts, &today_ymd());
        sitemap.write(config)?;
    }
    Ok(())
}

// ============================================================================
// Sitemap Implementation
// ============================================================================

/// How often a URL is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// Single URL entry in the sitemap
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    /// Full URL location
    pub loc: String,
    /// `YYYY-MM-DD`
    pub lastmod: String,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

/// Sitemap data structure
#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    pub urls: Vec<UrlEntry>,
}

impl Sitemap {
    /// Collect entries; `built` is the lastmod of static routes.
    pub fn new(config: &SiteConfig, posts: &Posts, built: &str) -> Self {
        let site = config.base.site_url();

        let routes = config.build.sitemap.routes.iter().map(|route| UrlEntry {
            loc: format!("{site}{route}"),
            lastmod: built.to_owned(),
            changefreq: ChangeFrequency::Weekly,
            priority: if route.is_empty() {
                HOME_PRIORITY
            } else {
                ROUTE_PRIORITY
            },
        });

        let posts = posts.published().map(|post| UrlEntry {
            loc: format!("{site}{}", post.url_path()),
            lastmod: post.date.ymd(),
            changefreq: ChangeFrequency::Monthly,
            priority: POST_PRIORITY,
        });

        Self {
            urls: routes.chain(posts).collect(),
        }
    }

    /// Generate sitemap XML string.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in &self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.lastmod));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.changefreq.as_str()
            ));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write sitemap to output file.
    fn write(&self, config: &SiteConfig) -> Result<()> {
        let sitemap_path = config.sitemap_path();
        let xml = self.to_xml();
        let xml = minify(xml.as_bytes(), OutputKind::Xml, config.build.minify);

        if let Some(parent) = sitemap_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&sitemap_path, &*xml)
            .with_context(|| format!("Failed to write sitemap to {}", sitemap_path.display()))?;

        log!("sitemap"; "{} urls -> {}", self.urls.len(), sitemap_path.display());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
