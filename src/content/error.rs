//! Content loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning source files into posts and pages.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("missing `+++` front matter in `{0}`")]
    MissingFrontMatter(PathBuf),

    #[error("invalid front matter in `{0}`")]
    FrontMatter(PathBuf, #[source] toml::de::Error),

    #[error("missing `date` in `{0}`")]
    MissingDate(PathBuf),

    #[error("invalid date `{date}` in `{path}`")]
    InvalidDate { path: PathBuf, date: String },

    #[error("invalid slug `{slug}` in `{path}`: {reason}")]
    InvalidSlug {
        path: PathBuf,
        slug: String,
        reason: &'static str,
    },

    #[error("duplicate slug `{slug}` in `{first}` and `{second}`")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}
