//! Color theme state.
//!
//! The theme is plain application state: [`reduce`] is the only way it
//! changes, and [`ThemeStore`] is the only place it touches storage. Pages
//! reflect it through a single root class attribute ([`Theme::html_class`]).
//!
//! ```text
//! ThemeStore::load ──► AppState { theme } ──► render (<html class="dark">)
//!                            │
//!                     reduce(theme, Toggle)
//!                            │
//!                            ▼
//!                     ThemeStore::save
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Color theme of the generated site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Class set on the root `<html>` element.
    pub const fn html_class(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Actions that change the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Toggle,
    Set(Theme),
}

/// Apply an action to a theme.
pub const fn reduce(theme: Theme, action: ThemeAction) -> Theme {
    match action {
        ThemeAction::Toggle => match theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        },
        ThemeAction::Set(theme) => theme,
    }
}

// ============================================================================
// Application State
// ============================================================================

/// State shared by every page render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppState {
    pub theme: Theme,
}

impl AppState {
    pub const fn new(theme: Theme) -> Self {
        Self { theme }
    }

    /// Return the state after applying `action`.
    #[must_use]
    pub const fn apply(self, action: ThemeAction) -> Self {
        Self {
            theme: reduce(self.theme, action),
        }
    }
}

// ============================================================================
// Persistence Boundary
// ============================================================================

/// Load-at-start / save-on-change storage for the theme preference.
pub trait ThemeStore {
    /// Saved theme, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<Theme>>;
    fn save(&mut self, theme: Theme) -> Result<()>;
}

/// On-disk format of the saved preference.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SavedTheme {
    is_dark_mode: bool,
}

/// JSON file store, `{"isDarkMode": true}`.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let saved: SavedTheme = serde_json::from_str(&content)
            .with_context(|| format!("Invalid theme file {}", self.path.display()))?;
        Ok(Some(if saved.is_dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }))
    }

    fn save(&mut self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string(&SavedTheme {
            is_dark_mode: theme.is_dark(),
        })?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

/// Resolve the starting state: saved preference first, then the configured default.
pub fn load_state(store: &impl ThemeStore, fallback: Theme) -> Result<AppState> {
    Ok(AppState::new(store.load()?.unwrap_or(fallback)))
}

/// Apply `action`, persisting the result only when it differs.
pub fn dispatch(store: &mut impl ThemeStore, state: AppState, action: ThemeAction) -> Result<AppState> {
    let next = state.apply(action);
    if next != state {
        store.save(next.theme)?;
    }
    Ok(next)
}
