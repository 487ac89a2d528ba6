//! Content pipeline: source files to posts and pages.
//!
//! ```text
//! <content>/blog/**.md ──► frontmatter::split ──► FrontMatter (toml)
//!                                │
//!                                ▼
//!                       markdown::compile ──► body HTML + heading tree
//!                                │
//!                                ▼
//!                        Posts { items: Vec<Post> }
//! ```

mod collection;
mod error;
mod frontmatter;
pub mod heading;
mod loader;
mod markdown;
mod post;

pub use collection::Posts;
pub use error::ContentError;
pub use heading::HeadingNode;
pub use loader::{load_pages, load_posts};
pub use post::{Page, Post};

#[cfg(test)]
pub(crate) use post::sample;
