//! `[base]` section configuration.
//!
//! Contains basic site information like title, author, description, etc.

use super::defaults;
use crate::theme::Theme;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in folio.toml - basic site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "Alice"
/// tagline = "Software Engineer"
/// description = "Notes on software engineering"
/// author = "Alice"
/// url = "https://alice.dev"
/// twitter = "@alice"
/// github = "https://github.com/alice"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site name, used as the `<title>` suffix and in structured data.
    pub title: String,

    /// Short subtitle shown after the name on the home page title.
    #[serde(default)]
    pub tagline: Option<String>,

    /// Site description for SEO meta tags.
    pub description: String,

    /// Site owner, used as the default post author and JSON-LD publisher.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Base URL for absolute links in sitemap, canonical and Open Graph tags.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code (e.g., "en-US").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Twitter handle for `twitter:creator`.
    #[serde(default)]
    pub twitter: Option<String>,

    /// Profile URL listed as `sameAs` of the site owner.
    #[serde(default)]
    pub github: Option<String>,

    /// Social preview image used when a post has none.
    #[serde(default = "defaults::base::og_image")]
    #[educe(Default = defaults::base::og_image())]
    pub og_image: String,

    /// Initial color theme when no saved preference exists.
    #[serde(default = "defaults::base::theme")]
    #[educe(Default = defaults::base::theme())]
    pub theme: Theme,
}

impl BaseConfig {
    /// Site URL without a trailing slash, or empty when unset.
    pub fn site_url(&self) -> &str {
        self.url.as_deref().map_or("", |url| url.trim_end_matches('/'))
    }

    /// Title used for the home page, e.g. "Alice - Software Engineer".
    pub fn full_title(&self) -> String {
        match &self.tagline {
            Some(tagline) => format!("{} - {}", self.title, tagline),
            None => self.title.clone(),
        }
    }
}
