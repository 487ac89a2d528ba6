//! JSON-LD structured data.

use crate::{config::SiteConfig, content::Post, utils::html::escape_script_json};
use serde_json::{Value, json};

/// `WebSite` + `Person` graph included on every page.
pub fn site_graph(config: &SiteConfig) -> Value {
    let site = config.base.site_url();
    let same_as: Vec<&str> = config.base.github.iter().map(String::as_str).collect();

    json!({
        "@context": "https://schema.org",
        "@graph": [
            {
                "@type": "WebSite",
                "@id": format!("{site}/#website"),
                "url": site,
                "name": config.base.title,
                "description": config.base.description,
                "publisher": { "@id": format!("{site}/#person") },
                "inLanguage": config.base.language,
            },
            {
                "@type": "Person",
                "@id": format!("{site}/#person"),
                "name": config.base.author,
                "url": site,
                "sameAs": same_as,
                "description": config.base.description,
            }
        ]
    })
}

/// `BlogPosting` for one post. `image` is the resolved social image.
pub fn blog_posting(config: &SiteConfig, post: &Post, image: &str) -> Value {
    let site = config.base.site_url();
    let url = format!("{site}{}", post.url_path());
    let date = post.date.rfc3339();
    let keywords = post.tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ");

    json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": post.title,
        "description": post.description,
        "image": image,
        "datePublished": date,
        "dateModified": date,
        "author": {
            "@type": "Person",
            "name": post.author,
            "url": site,
        },
        "publisher": {
            "@type": "Person",
            "name": config.base.author,
            "url": site,
        },
        "url": url,
        "keywords": keywords,
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": url,
        },
    })
}

/// Embed a JSON-LD value in a `<script>` element.
pub fn script_tag(value: &Value) -> String {
    format!(
        r#"<script type="application/ld+json">{}</script>"#,
        escape_script_json(&value.to_string())
    )
}
