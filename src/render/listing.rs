//! Blog listing pages.

use super::layout::{Renderer, Scripts};
use crate::{
    content::Post,
    listing::{ListingRoutes, ListingState, ListingView, Pagination, YearGroup, compute_view},
    seo::HeadMeta,
    utils::html::escape_html,
};
use std::fmt::Write;

const LISTING_TITLE: &str = "Blog";
const NO_RESULTS: &str = "No blogs found matching the selected filters";

/// Render the listing page for `state`.
pub fn listing_page(
    renderer: &Renderer<'_>,
    posts: &[Post],
    state: &ListingState,
    routes: &ListingRoutes,
) -> String {
    let view = compute_view(posts, state);
    let description = &renderer.config.base.description;

    let mut main = format!(
        r#"<div class="container narrow"><div class="page-header"><h1>{LISTING_TITLE}</h1><p>{}</p></div><hr><div class="listing">"#,
        escape_html(description)
    );
    if routes.tag_pages() && !view.available_tags.is_empty() {
        main.push_str(&tag_filter(&view, state, routes));
    }
    main.push_str(r#"<div class="listing-main">"#);
    main.push_str(&results(&view, state, routes));
    main.push_str("</div></div></div>");

    let head = HeadMeta::page(
        renderer.config,
        Some(LISTING_TITLE),
        description,
        &routes.path(state),
    );
    renderer.document(&head, &main, Scripts::default())
}

/// Tag buttons link to the state after toggling that tag.
///
/// Targets without a rendered page are shown disabled; those only occur
/// once the selection already matches nothing.
fn tag_filter(view: &ListingView<'_>, state: &ListingState, routes: &ListingRoutes) -> String {
    let mut html = String::from(
        r#"<aside class="tag-filter"><div class="tag-filter-inner"><h3>Filter by Tags</h3><div class="tags">"#,
    );

    for &tag in &view.available_tags {
        let selected = state.selected_tags.contains(tag);
        let class = if selected { "tag is-selected" } else { "tag" };
        let target = state.toggle_tag(tag);

        if routes.contains(&target.selected_tags) {
            let _ = write!(
                html,
                r#"<a class="{class}" href="{}" aria-pressed="{selected}">{}</a>"#,
                escape_html(&routes.path(&target)),
                escape_html(tag)
            );
        } else {
            let _ = write!(
                html,
                r#"<span class="{class}" aria-disabled="true" title="No posts match this combination">{}</span>"#,
                escape_html(tag)
            );
        }
    }
    html.push_str("</div>");

    if state.is_filtered() {
        let _ = write!(
            html,
            r#"<a class="clear-filters" href="{}">Clear all filters</a>"#,
            routes.path(&state.clear_tags())
        );
    }
    html.push_str("</div></aside>");
    html
}

fn results(view: &ListingView<'_>, state: &ListingState, routes: &ListingRoutes) -> String {
    let Some((first, last)) = view.range() else {
        return format!(r#"<p class="no-results">{NO_RESULTS}</p>"#);
    };

    let mut html = String::new();
    for group in &view.groups {
        html.push_str(&year_group(group));
    }
    if view.pagination.is_visible() {
        html.push_str(&pagination(view.pagination, state, routes));
    }
    let _ = write!(
        html,
        r#"<p class="results">Showing {first} - {last} of {} posts</p>"#,
        view.filtered_count
    );
    html
}

/// One year as a `<details>` element; collapsed years render closed.
fn year_group(group: &YearGroup<'_>) -> String {
    let open = if group.collapsed { "" } else { " open" };
    let mut html = format!(
        r#"<details class="year-group" data-year="{year}"{open}><summary>{year}</summary><div class="post-grid">"#,
        year = group.year
    );
    for post in &group.posts {
        html.push_str(&post_card(post));
    }
    html.push_str("</div></details>");
    html
}

pub(super) fn post_card(post: &Post) -> String {
    let title = escape_html(&post.title);
    let mut html = String::from(r#"<article class="post-card">"#);

    if let Some(image) = &post.image {
        let _ = write!(
            html,
            r#"<img src="{}" alt="{title}" width="804" height="452" loading="lazy">"#,
            escape_html(image)
        );
    }
    let _ = write!(html, "<h3>{title}</h3>");
    if !post.description.is_empty() {
        let _ = write!(html, "<p>{}</p>", escape_html(&post.description));
    }
    if !post.tags.is_empty() {
        html.push_str(r#"<div class="tags">"#);
        for tag in &post.tags {
            let _ = write!(html, r#"<span class="tag tag-small">{}</span>"#, escape_html(tag));
        }
        html.push_str("</div>");
    }
    let _ = write!(
        html,
        r#"<time class="post-date" datetime="{}">{}</time><a class="card-link" href="{}"><span class="sr-only">View Article</span></a></article>"#,
        post.date.rfc3339(),
        post.date.long(),
        escape_html(&post.url_path())
    );
    html
}

fn pagination(pagination: Pagination, state: &ListingState, routes: &ListingRoutes) -> String {
    let link = |page: usize| escape_html(&routes.path(&state.go_to_page(page, pagination.total())));

    let mut html = String::from(r#"<nav class="pagination" aria-label="Pagination">"#);

    if pagination.has_previous() {
        let _ = write!(html, r#"<a href="{}" rel="prev">Previous</a>"#, link(pagination.previous().current()));
    } else {
        html.push_str(r#"<span class="is-disabled" aria-disabled="true">Previous</span>"#);
    }

    for page in pagination.pages() {
        if page == pagination.current() {
            let _ = write!(html, r#"<span class="is-current" aria-current="page">{page}</span>"#);
        } else {
            let _ = write!(html, r#"<a href="{}">{page}</a>"#, link(page));
        }
    }

    if pagination.has_next() {
        let _ = write!(html, r#"<a href="{}" rel="next">Next</a>"#, link(pagination.next().current()));
    } else {
        html.push_str(r#"<span class="is-disabled" aria-disabled="true">Next</span>"#);
    }

    html.push_str("</nav>");
    html
}
