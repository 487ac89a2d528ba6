//! Post listing pipeline.
//!
//! ```text
//! posts ──► published ──► sort by date desc ──► tag filter (AND)
//!                                                     │
//!                              paginate (10 per page) ◄┘
//!                                     │
//!                                     ▼
//!                           group by year (desc)
//! ```
//!
//! All functions here are pure and total.

use super::state::{ListingState, Pagination};
use crate::content::Post;
use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet},
};

/// Posts shown per listing page.
pub const POSTS_PER_PAGE: usize = 10;

/// Posts of one year within the current page.
#[derive(Debug, Clone)]
pub struct YearGroup<'a> {
    pub year: i32,
    pub posts: Vec<&'a Post>,
    pub collapsed: bool,
}

/// Everything a listing page shows for one [`ListingState`].
#[derive(Debug, Clone)]
pub struct ListingView<'a> {
    /// Tags of all published posts, independent of the selection.
    pub available_tags: Vec<&'a str>,
    /// Number of posts matching the selection, across all pages.
    pub filtered_count: usize,
    pub pagination: Pagination,
    pub groups: Vec<YearGroup<'a>>,
}

impl ListingView<'_> {
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }

    /// 1-based inclusive range of posts on the current page.
    pub fn range(&self) -> Option<(usize, usize)> {
        let shown: usize = self.groups.iter().map(|g| g.posts.len()).sum();
        if shown == 0 {
            return None;
        }
        let start = (self.pagination.current() - 1) * POSTS_PER_PAGE + 1;
        Some((start, start + shown - 1))
    }
}

/// Sorted union of tags over published posts.
pub fn available_tags(posts: &[Post]) -> Vec<&str> {
    posts
        .iter()
        .filter(|post| post.published)
        .flat_map(|post| post.tags.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Published posts, newest first. Posts with equal dates keep input order.
pub fn visible_posts(posts: &[Post]) -> Vec<&Post> {
    let mut visible: Vec<&Post> = posts.iter().filter(|post| post.published).collect();
    visible.sort_by_key(|post| Reverse(post.date));
    visible
}

/// Keep posts carrying every selected tag. An empty selection keeps all.
pub fn filter_by_tags<'a>(posts: Vec<&'a Post>, selected: &BTreeSet<String>) -> Vec<&'a Post> {
    if selected.is_empty() {
        return posts;
    }
    posts
        .into_iter()
        .filter(|post| post.has_all_tags(selected))
        .collect()
}

pub fn total_pages(count: usize) -> usize {
    count.div_ceil(POSTS_PER_PAGE)
}

/// Posts of 1-based `page`; empty when out of range.
pub fn paginate<'p, 'a>(posts: &'p [&'a Post], page: usize) -> &'p [&'a Post] {
    let start = page.saturating_sub(1).saturating_mul(POSTS_PER_PAGE);
    if start >= posts.len() {
        return &[];
    }
    let end = (start + POSTS_PER_PAGE).min(posts.len());
    &posts[start..end]
}

/// Group posts by year, newest year first, keeping order within a year.
pub fn group_by_year<'a>(posts: &[&'a Post], collapsed: &BTreeSet<i32>) -> Vec<YearGroup<'a>> {
    let mut years: BTreeMap<Reverse<i32>, Vec<&'a Post>> = BTreeMap::new();
    for &post in posts {
        years.entry(Reverse(post.date.year())).or_default().push(post);
    }
    years
        .into_iter()
        .map(|(Reverse(year), posts)| YearGroup {
            year,
            posts,
            collapsed: collapsed.contains(&year),
        })
        .collect()
}

/// Run the whole pipeline for one state.
pub fn compute_view<'a>(posts: &'a [Post], state: &ListingState) -> ListingView<'a> {
    let filtered = filter_by_tags(visible_posts(posts), &state.selected_tags);
    let pagination = Pagination::new(state.current_page, total_pages(filtered.len()));
    let groups = group_by_year(
        paginate(&filtered, pagination.current()),
        &state.collapsed_years,
    );

    ListingView {
        available_tags: available_tags(posts),
        filtered_count: filtered.len(),
        pagination,
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample;
    use proptest::prelude::*;

    fn slugs<'a>(posts: &[&'a Post]) -> Vec<&'a str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    fn numbered(count: usize) -> Vec<Post> {
        (0..count)
            .map(|i| sample(&format!("p{i}"), &format!("2024-01-{:02}", i % 28 + 1), &[], true))
            .collect()
    }

    #[test]
    fn test_unpublished_never_listed() {
        let posts = vec![
            sample("draft", "2024-05-01", &["secret"], false),
            sample("live", "2024-01-01", &["rust"], true),
        ];
        let view = compute_view(&posts, &ListingState::default());

        assert_eq!(view.filtered_count, 1);
        assert_eq!(slugs(&view.groups[0].posts), ["live"]);
        assert_eq!(view.available_tags, ["rust"]);
    }

    #[test]
    fn test_sort_desc_ties_keep_input_order() {
        let posts = vec![
            sample("old", "2023-01-01", &[], true),
            sample("first", "2024-01-01", &[], true),
            sample("second", "2024-01-01", &[], true),
        ];
        assert_eq!(slugs(&visible_posts(&posts)), ["first", "second", "old"]);
    }

    #[test]
    fn test_tag_filter_is_and() {
        let posts = vec![
            sample("both", "2024-03-01", &["rust", "web"], true),
            sample("rust", "2024-02-01", &["rust"], true),
            sample("web", "2024-01-01", &["web"], true),
        ];

        let rust = compute_view(&posts, &ListingState::with_tags(["rust"]));
        assert_eq!(rust.filtered_count, 2);

        let both = compute_view(&posts, &ListingState::with_tags(["rust", "web"]));
        assert_eq!(both.filtered_count, 1);
        assert_eq!(slugs(&both.groups[0].posts), ["both"]);

        let none = compute_view(&posts, &ListingState::with_tags(["go"]));
        assert!(none.is_empty());
        assert!(none.groups.is_empty());
        assert_eq!(none.range(), None);
        assert_eq!(none.available_tags, ["rust", "web"]);
    }

    #[test]
    fn test_twenty_three_posts_make_three_pages() {
        let posts = numbered(23);
        let state = ListingState::default();

        let sizes: Vec<usize> = (1..=3)
            .map(|page| {
                let view = compute_view(&posts, &state.go_to_page(page, 3));
                assert_eq!(view.pagination.total(), 3);
                view.groups.iter().map(|g| g.posts.len()).sum()
            })
            .collect();

        assert_eq!(sizes, [10, 10, 3]);
        assert_eq!(
            compute_view(&posts, &state.go_to_page(3, 3)).range(),
            Some((21, 23))
        );
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let posts = numbered(3);
        let state = ListingState {
            current_page: 7,
            ..ListingState::default()
        };
        let view = compute_view(&posts, &state);

        assert_eq!(view.pagination.current(), 1);
        assert_eq!(view.range(), Some((1, 3)));
    }

    #[test]
    fn test_paginate_out_of_range() {
        let posts = numbered(5);
        let refs: Vec<&Post> = posts.iter().collect();
        assert!(paginate(&refs, 2).is_empty());
        assert_eq!(paginate(&refs, 1).len(), 5);
        assert_eq!(paginate(&refs, 0).len(), 5);
    }

    #[test]
    fn test_group_by_year() {
        let posts = vec![
            sample("a", "2024-06-01", &[], true),
            sample("b", "2024-02-01", &[], true),
            sample("c", "2023-12-01", &[], true),
            sample("d", "2022-01-01", &[], true),
        ];
        let view = compute_view(&posts, &ListingState::default());

        let years: Vec<i32> = view.groups.iter().map(|g| g.year).collect();
        assert_eq!(years, [2024, 2023, 2022]);
        assert_eq!(slugs(&view.groups[0].posts), ["a", "b"]);
    }

    #[test]
    fn test_collapse_only_flags_group() {
        let posts = vec![
            sample("a", "2024-06-01", &[], true),
            sample("b", "2023-02-01", &[], true),
        ];
        let state = ListingState::default();
        let open = compute_view(&posts, &state);
        let folded = compute_view(&posts, &state.toggle_year(2024));

        assert!(folded.groups[0].collapsed);
        assert!(!folded.groups[1].collapsed);
        for (a, b) in open.groups.iter().zip(&folded.groups) {
            assert_eq!(a.year, b.year);
            assert_eq!(slugs(&a.posts), slugs(&b.posts));
        }
        assert_eq!(open.pagination, folded.pagination);

        let restored = compute_view(&posts, &state.toggle_year(2024).toggle_year(2024));
        assert!(restored.groups.iter().all(|g| !g.collapsed));
    }

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------

    const TAGS: [&str; 4] = ["rust", "web", "cli", "db"];

    fn arb_posts() -> impl Strategy<Value = Vec<Post>> {
        prop::collection::vec(
            (
                2019i32..2026,
                1u32..13,
                1u32..29,
                prop::sample::subsequence(TAGS.to_vec(), 0..=TAGS.len()),
                any::<bool>(),
            ),
            0..40,
        )
        .prop_map(|entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (year, month, day, tags, published))| {
                    sample(
                        &format!("p{i}"),
                        &format!("{year}-{month:02}-{day:02}"),
                        &tags,
                        published,
                    )
                })
                .collect()
        })
    }

    fn arb_selection() -> impl Strategy<Value = Vec<&'static str>> {
        prop::sample::subsequence(TAGS.to_vec(), 0..=2)
    }

    proptest! {
        #[test]
        fn prop_only_published_posts_listed(posts in arb_posts(), page in 0usize..6) {
            let view = compute_view(&posts, &ListingState::default().go_to_page(page, 5));
            for group in &view.groups {
                prop_assert!(group.posts.iter().all(|p| p.published));
            }
        }

        #[test]
        fn prop_filtered_posts_carry_selected_tags(posts in arb_posts(), selection in arb_selection()) {
            let state = ListingState::with_tags(selection.iter().copied());
            for page in 1..=total_pages(posts.len()).max(1) {
                let view = compute_view(&posts, &state.go_to_page(page, usize::MAX));
                for post in view.groups.iter().flat_map(|g| &g.posts) {
                    prop_assert!(state.selected_tags.is_subset(&post.tags));
                }
            }
        }

        #[test]
        fn prop_pages_partition_filtered_posts(posts in arb_posts(), selection in arb_selection()) {
            let state = ListingState::with_tags(selection.iter().copied());
            let first = compute_view(&posts, &state);
            let total = first.pagination.total();
            prop_assert_eq!(total, first.filtered_count.div_ceil(POSTS_PER_PAGE));

            let shown: usize = (1..=total)
                .map(|page| {
                    let view = compute_view(&posts, &state.go_to_page(page, total));
                    view.groups.iter().map(|g| g.posts.len()).sum::<usize>()
                })
                .sum();
            prop_assert_eq!(shown, first.filtered_count);
        }

        #[test]
        fn prop_groups_descend_and_keep_order(posts in arb_posts(), page in 1usize..4) {
            let view = compute_view(&posts, &ListingState::default().go_to_page(page, 4));

            let years: Vec<i32> = view.groups.iter().map(|g| g.year).collect();
            prop_assert!(years.windows(2).all(|w| w[0] > w[1]));

            for group in &view.groups {
                prop_assert!(group.posts.iter().all(|p| p.date.year() == group.year));
                prop_assert!(group.posts.windows(2).all(|w| w[0].date >= w[1].date));
            }
        }

        #[test]
        fn prop_toggle_tag_twice_restores_selection(selection in arb_selection(), tag in prop::sample::select(TAGS.to_vec()), page in 1usize..5) {
            let state = ListingState::with_tags(selection.iter().copied()).go_to_page(page, 4);
            let back = state.toggle_tag(tag).toggle_tag(tag);

            prop_assert_eq!(&back.selected_tags, &state.selected_tags);
            prop_assert_eq!(back.current_page, 1);
        }

        #[test]
        fn prop_available_tags_ignore_selection(posts in arb_posts(), selection in arb_selection()) {
            let all = compute_view(&posts, &ListingState::default());
            let filtered = compute_view(&posts, &ListingState::with_tags(selection.iter().copied()));
            prop_assert_eq!(all.available_tags, filtered.available_tags);
        }
    }
}
