//! The loaded set of posts.

use super::{ContentError, post::Post};
use std::collections::HashMap;

/// All posts, in source path order.
#[derive(Debug, Clone, Default)]
pub struct Posts {
    items: Vec<Post>,
}

impl Posts {
    /// Wrap loaded posts, rejecting duplicate slugs.
    pub fn new(items: Vec<Post>) -> Result<Self, ContentError> {
        let mut seen = HashMap::with_capacity(items.len());
        for post in &items {
            if let Some(first) = seen.insert(post.slug.as_str(), &post.source) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug.clone(),
                    first: first.clone(),
                    second: post.source.clone(),
                });
            }
        }
        Ok(Self { items })
    }

    /// Look up a post by slug, published or not.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        self.items.iter().find(|post| post.slug == slug)
    }

    /// Published posts, in source order.
    pub fn published(&self) -> impl Iterator<Item = &Post> {
        self.items.iter().filter(|post| post.published)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Post] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
