//! Home page, standalone pages and the not-found page.

use super::{
    layout::{Renderer, Scripts},
    listing::post_card,
    toc,
};
use crate::{content::{Page, Post}, listing::visible_posts, seo::HeadMeta, utils::html::escape_html};
use std::fmt::Write;

/// Site description and the most recent published posts.
pub fn home_page(renderer: &Renderer<'_>, posts: &[Post]) -> String {
    let base = &renderer.config.base;
    let recent: Vec<&Post> = visible_posts(posts)
        .into_iter()
        .take(renderer.config.build.recent_posts)
        .collect();

    let mut main = format!(
        r#"<div class="container narrow"><section class="hero"><h1>{}</h1><p>{}</p></section>"#,
        escape_html(&base.full_title()),
        escape_html(&base.description)
    );
    if !recent.is_empty() {
        main.push_str(r#"<section class="recent"><h2>Recent Posts</h2><div class="post-grid">"#);
        for post in recent {
            main.push_str(&post_card(post));
        }
        main.push_str(r#"</div><p><a href="/blog/">See all Blogs</a></p></section>"#);
    }
    main.push_str("</div>");

    let head = HeadMeta::page(renderer.config, None, &base.description, "/");
    renderer.document(&head, &main, Scripts::default())
}

pub fn standalone_page(renderer: &Renderer<'_>, page: &Page) -> String {
    let mut main = format!(
        r#"<article class="container narrow"><h1>{}</h1>"#,
        escape_html(&page.title)
    );
    if let Some(date) = page.date {
        let _ = write!(
            main,
            r#"<time class="article-date" datetime="{}">{}</time>"#,
            date.rfc3339(),
            date.long()
        );
    }
    if let Some(inline) = toc::inline(&page.toc) {
        main.push_str(&inline);
    }
    let _ = write!(main, r#"<div class="prose">{}</div></article>"#, page.body);

    let head = HeadMeta::page(
        renderer.config,
        Some(page.title.as_str()),
        &page.description,
        &page.url_path(),
    );
    let scripts = Scripts {
        diagrams: page.has_diagram,
        toc_sidebar: false,
    };
    renderer.document(&head, &main, scripts)
}

/// Served for unknown paths, including post slugs that do not exist.
pub fn not_found_page(renderer: &Renderer<'_>) -> String {
    let main = concat!(
        r#"<div class="container not-found"><h1>404</h1>"#,
        r#"<p>This page could not be found.</p>"#,
        r#"<p><a href="/blog/">See all Blogs</a></p></div>"#,
    );
    let mut head = HeadMeta::page(renderer.config, Some("Not Found"), "", "/404.html");
    head.canonical = None;
    renderer.document(&head, main, Scripts::default())
}
