//! Listing states rendered to static pages.
//!
//! A tag selection is rendered when at least one published post carries
//! all of its tags, or when it is one added tag away from such a selection
//! (those pages show the empty-result message). Each selection is rendered
//! for every one of its pages.

use super::{
    state::{ListingState, TagSlugs},
    view::{filter_by_tags, total_pages, visible_posts},
};
use crate::content::Post;
use std::collections::BTreeSet;

type Selection = BTreeSet<String>;

/// The set of pre-rendered tag selections and their URL segments.
#[derive(Debug, Clone)]
pub struct ListingRoutes {
    selections: BTreeSet<Selection>,
    slugs: TagSlugs,
    tag_pages: bool,
}

impl ListingRoutes {
    /// Collect selections from the published posts.
    ///
    /// With `tag_pages` off only the unfiltered listing is rendered.
    pub fn collect(posts: &[Post], tag_pages: bool) -> Self {
        let mut selections = BTreeSet::from([Selection::new()]);
        if !tag_pages {
            return Self {
                selections,
                slugs: TagSlugs::default(),
                tag_pages,
            };
        }

        let published: Vec<&Post> = posts.iter().filter(|post| post.published).collect();
        for post in &published {
            let tags: Vec<&String> = post.tags.iter().collect();
            subsets(&tags, &mut selections);
        }

        let all_tags: BTreeSet<&String> = published.iter().flat_map(|post| &post.tags).collect();
        let dead_ends: Vec<Selection> = selections
            .iter()
            .flat_map(|selection| {
                all_tags
                    .iter()
                    .filter(|tag| !selection.contains(tag.as_str()))
                    .map(move |tag| {
                        let mut next = selection.clone();
                        next.insert((*tag).clone());
                        next
                    })
            })
            .collect();
        selections.extend(dead_ends);

        Self {
            selections,
            slugs: TagSlugs::new(all_tags),
            tag_pages,
        }
    }

    pub const fn tag_pages(&self) -> bool {
        self.tag_pages
    }

    /// Whether a page exists for this tag selection.
    pub fn contains(&self, selection: &BTreeSet<String>) -> bool {
        self.selections.contains(selection)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Output route of `state`; distinct selections never share a route.
    pub fn path(&self, state: &ListingState) -> String {
        state.route_path(&self.slugs)
    }

    /// Every listing state to render: each selection on each of its pages.
    pub fn states(&self, posts: &[Post]) -> Vec<ListingState> {
        let visible = visible_posts(posts);
        self.selections
            .iter()
            .flat_map(|selection| {
                let count = filter_by_tags(visible.clone(), selection).len();
                let pages = total_pages(count).max(1);
                (1..=pages).map(move |page| ListingState {
                    selected_tags: selection.clone(),
                    current_page: page,
                    ..ListingState::default()
                })
            })
            .collect()
    }
}

/// Insert every subset of `tags`.
fn subsets(tags: &[&String], out: &mut BTreeSet<Selection>) {
    fn walk(tags: &[&String], current: &mut Selection, out: &mut BTreeSet<Selection>) {
        out.insert(current.clone());
        for (i, tag) in tags.iter().enumerate() {
            current.insert((*tag).clone());
            walk(&tags[i + 1..], current, out);
            current.remove(tag.as_str());
        }
    }
    walk(tags, &mut Selection::new(), out);
}
