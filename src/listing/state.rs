//! Listing view state and its transitions.
//!
//! Every transition returns a new state; views are recomputed from the raw
//! post list and the new state.

use crate::utils::slug::{AnchorSlugger, slugify};
use std::{
    collections::{BTreeMap, BTreeSet},
    ops::RangeInclusive,
};

/// Filter, page cursor and collapsed years of one listing view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingState {
    pub selected_tags: BTreeSet<String>,
    /// 1-based.
    pub current_page: usize,
    pub collapsed_years: BTreeSet<i32>,
}

impl Default for ListingState {
    fn default() -> Self {
        Self {
            selected_tags: BTreeSet::new(),
            current_page: 1,
            collapsed_years: BTreeSet::new(),
        }
    }
}

impl ListingState {
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected_tags: tags.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add or remove `tag` from the selection and go back to page 1.
    #[must_use]
    pub fn toggle_tag(&self, tag: &str) -> Self {
        let mut selected_tags = self.selected_tags.clone();
        if !selected_tags.remove(tag) {
            selected_tags.insert(tag.to_owned());
        }
        Self {
            selected_tags,
            current_page: 1,
            collapsed_years: self.collapsed_years.clone(),
        }
    }

    /// Drop every selected tag and go back to page 1.
    #[must_use]
    pub fn clear_tags(&self) -> Self {
        Self {
            selected_tags: BTreeSet::new(),
            current_page: 1,
            collapsed_years: self.collapsed_years.clone(),
        }
    }

    /// Collapse or expand one year group.
    #[must_use]
    pub fn toggle_year(&self, year: i32) -> Self {
        let mut collapsed_years = self.collapsed_years.clone();
        if !collapsed_years.remove(&year) {
            collapsed_years.insert(year);
        }
        Self {
            collapsed_years,
            ..self.clone()
        }
    }

    /// Move to `page`, clamped to the available pages.
    #[must_use]
    pub fn go_to_page(&self, page: usize, total_pages: usize) -> Self {
        Self {
            current_page: Pagination::new(page, total_pages).current(),
            ..self.clone()
        }
    }

    pub fn is_filtered(&self) -> bool {
        !self.selected_tags.is_empty()
    }

    /// Output route of this state, with tags written through `slugs`.
    ///
    /// ```text
    /// /blog/                      page 1, no tags
    /// /blog/page/2/
    /// /blog/tags/rust+web/
    /// /blog/tags/rust+web/page/2/
    /// ```
    pub fn route_path(&self, slugs: &TagSlugs) -> String {
        let mut path = String::from("/blog/");
        if self.is_filtered() {
            path.push_str("tags/");
            let segment: Vec<String> = self.selected_tags.iter().map(|tag| slugs.get(tag)).collect();
            path.push_str(&segment.join("+"));
            path.push('/');
        }
        if self.current_page > 1 {
            path.push_str(&format!("page/{}/", self.current_page));
        }
        path
    }
}

// ============================================================================
// Tag slugs
// ============================================================================

/// Fallback for tags without any slug-able character.
const EMPTY_TAG_SLUG: &str = "tag";

/// URL segment of every known tag, distinct per tag.
///
/// Tags that slugify alike get a numeric suffix in tag order:
/// `C` → `c`, `C++` → `c-1`. Slugs only hold `[a-z0-9-]`, so joining
/// them with `+` keeps selections apart too.
#[derive(Debug, Clone, Default)]
pub struct TagSlugs {
    slugs: BTreeMap<String, String>,
}

impl TagSlugs {
    pub fn new<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let unique: BTreeSet<&String> = tags.into_iter().collect();
        let mut slugger = AnchorSlugger::new();
        let slugs = unique
            .into_iter()
            .map(|tag| (tag.clone(), slugger.claim(base_slug(tag))))
            .collect();
        Self { slugs }
    }

    /// Slug of `tag`; unknown tags fall back to the plain slug.
    pub fn get(&self, tag: &str) -> String {
        self.slugs
            .get(tag)
            .cloned()
            .unwrap_or_else(|| base_slug(tag))
    }
}

fn base_slug(tag: &str) -> String {
    let slug = slugify(tag);
    if slug.is_empty() { EMPTY_TAG_SLUG.to_owned() } else { slug }
}

// ============================================================================
// Pagination
// ============================================================================

/// Page cursor clamped to `[1, total]`.
///
/// An empty result has `total == 0` but is still shown as one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: usize,
    total: usize,
}

impl Pagination {
    pub fn new(current: usize, total: usize) -> Self {
        Self {
            current: current.clamp(1, total.max(1)),
            total,
        }
    }

    pub const fn current(&self) -> usize {
        self.current
    }

    pub const fn total(&self) -> usize {
        self.total
    }

    fn last(&self) -> usize {
        self.total.max(1)
    }

    pub const fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.last()
    }

    #[must_use]
    pub fn previous(&self) -> Self {
        self.go_to(self.current.saturating_sub(1))
    }

    #[must_use]
    pub fn next(&self) -> Self {
        self.go_to(self.current + 1)
    }

    #[must_use]
    pub fn go_to(&self, page: usize) -> Self {
        Self::new(page, self.total)
    }

    /// Pages offered for direct selection.
    pub fn pages(&self) -> RangeInclusive<usize> {
        1..=self.total
    }

    /// Controls are only shown when there is more than one page.
    pub const fn is_visible(&self) -> bool {
        self.total > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = ListingState::default();
        assert_eq!(state.current_page, 1);
        assert!(!state.is_filtered());
        assert_eq!(state.route_path(&TagSlugs::default()), "/blog/");
    }

    #[test]
    fn test_toggle_tag_round_trip_resets_page() {
        let state = ListingState::default().go_to_page(3, 5);
        assert_eq!(state.current_page, 3);

        let on = state.toggle_tag("rust");
        assert!(on.selected_tags.contains("rust"));
        assert_eq!(on.current_page, 1);

        let off = on.go_to_page(2, 4).toggle_tag("rust");
        assert!(off.selected_tags.is_empty());
        assert_eq!(off.current_page, 1);
    }

    #[test]
    fn test_clear_tags() {
        let state = ListingState::with_tags(["rust", "web"]).go_to_page(2, 2);
        let cleared = state.clear_tags();

        assert!(cleared.selected_tags.is_empty());
        assert_eq!(cleared.current_page, 1);
    }

    #[test]
    fn test_toggle_year_keeps_page_and_tags() {
        let state = ListingState::with_tags(["rust"]).go_to_page(2, 3);
        let collapsed = state.toggle_year(2024).toggle_year(2023);

        assert_eq!(collapsed.collapsed_years, BTreeSet::from([2023, 2024]));
        assert_eq!(collapsed.current_page, 2);
        assert_eq!(collapsed.selected_tags, state.selected_tags);

        let expanded = collapsed.toggle_year(2024);
        assert_eq!(expanded.collapsed_years, BTreeSet::from([2023]));
    }

    #[test]
    fn test_go_to_page_clamps() {
        let state = ListingState::default();
        assert_eq!(state.go_to_page(0, 3).current_page, 1);
        assert_eq!(state.go_to_page(9, 3).current_page, 3);
        assert_eq!(state.go_to_page(4, 0).current_page, 1);
    }

    #[test]
    fn test_route_paths() {
        let tags = ["web".to_owned(), "Rust".to_owned()];
        let slugs = TagSlugs::new(&tags);

        assert_eq!(ListingState::default().go_to_page(2, 3).route_path(&slugs), "/blog/page/2/");
        assert_eq!(
            ListingState::with_tags(["web", "Rust"]).route_path(&slugs),
            "/blog/tags/rust+web/"
        );
        assert_eq!(
            ListingState::with_tags(["Rust"]).go_to_page(2, 2).route_path(&slugs),
            "/blog/tags/rust/page/2/"
        );
    }

    #[test]
    fn test_tag_slugs_are_distinct() {
        let tags: Vec<String> = ["C", "C++", "c-1", "Rust", "rust", "?!"]
            .into_iter()
            .map(String::from)
            .collect();
        let slugs = TagSlugs::new(&tags);

        assert_eq!(slugs.get("?!"), "tag");
        assert_eq!(slugs.get("C"), "c");
        assert_eq!(slugs.get("C++"), "c-1");
        assert_eq!(slugs.get("c-1"), "c-1-1");
        assert_eq!(slugs.get("Rust"), "rust");
        assert_eq!(slugs.get("rust"), "rust-1");

        let unique: BTreeSet<String> = tags.iter().map(|tag| slugs.get(tag)).collect();
        assert_eq!(unique.len(), tags.len());
    }

    #[test]
    fn test_colliding_tags_get_distinct_routes() {
        let tags = ["C".to_owned(), "C++".to_owned()];
        let slugs = TagSlugs::new(&tags);

        let c = ListingState::with_tags(["C"]).route_path(&slugs);
        let cpp = ListingState::with_tags(["C++"]).route_path(&slugs);
        let both = ListingState::with_tags(["C", "C++"]).route_path(&slugs);

        assert_eq!(c, "/blog/tags/c/");
        assert_eq!(cpp, "/blog/tags/c-1/");
        assert_eq!(both, "/blog/tags/c+c-1/");
    }

    #[test]
    fn test_pagination_navigation() {
        let first = Pagination::new(1, 3);
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert_eq!(first.previous(), first);

        let last = first.next().next();
        assert_eq!(last.current(), 3);
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.next(), last);

        assert_eq!(first.go_to(2).current(), 2);
        assert_eq!(first.go_to(99).current(), 3);
        assert_eq!(first.pages().collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn test_pagination_empty_result() {
        let empty = Pagination::new(5, 0);
        assert_eq!(empty.current(), 1);
        assert!(!empty.has_previous());
        assert!(!empty.has_next());
        assert!(!empty.is_visible());
        assert_eq!(empty.pages().count(), 0);
    }

    #[test]
    fn test_pagination_single_page_hidden() {
        assert!(!Pagination::new(1, 1).is_visible());
        assert!(Pagination::new(1, 2).is_visible());
    }
}
