//! Article pages.

use super::{
    layout::{Renderer, Scripts},
    toc::{self, TocPanel},
};
use crate::{content::Post, seo::HeadMeta, utils::html::escape_html};
use std::fmt::Write;

/// Render a post page.
pub fn post_page(renderer: &Renderer<'_>, post: &Post) -> String {
    let sidebar = TocPanel::default().sidebar(&post.toc);
    let title = escape_html(&post.title);

    let mut main = String::from(r#"<article class="container"><div class="article-layout">"#);
    if let Some(sidebar) = &sidebar {
        main.push_str(sidebar);
    }

    main.push_str(r#"<div class="article-main">"#);
    let _ = write!(
        main,
        r#"<time class="article-date" datetime="{}">Published on {}</time><h1>{title}</h1>"#,
        post.date.rfc3339(),
        post.date.long()
    );
    main.push_str(&author(&post.author));
    if let Some(image) = &post.image {
        let _ = write!(
            main,
            r#"<img class="cover" src="{}" alt="{title}" width="720" height="405">"#,
            escape_html(image)
        );
    }
    if let Some(inline) = toc::inline(&post.toc) {
        main.push_str(&inline);
    }
    let _ = write!(main, r#"<div class="prose">{}</div>"#, post.body);
    main.push_str(r#"<hr><div class="back-link"><a href="/blog/">‹ See all Blogs</a></div>"#);
    main.push_str("</div></div></article>");

    let head = HeadMeta::post(renderer.config, post);
    let scripts = Scripts {
        diagrams: post.has_diagram,
        toc_sidebar: sidebar.is_some(),
    };
    renderer.document(&head, &main, scripts)
}

/// Initial badge, name and handle. Empty authors render nothing.
fn author(name: &str) -> String {
    let Some(initial) = name.chars().next() else {
        return String::new();
    };
    let name = escape_html(name);
    format!(
        concat!(
            r#"<div class="author"><div class="author-badge">{initial}</div>"#,
            r#"<div><p class="author-name">{name}</p><p class="author-handle">@{name}</p></div></div>"#,
        ),
        initial = escape_html(&initial.to_uppercase().to_string()),
        name = name,
    )
}
