//! Default site stylesheet.

use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Stylesheet shipped with the binary.
/// Loaded from `src/embed/css/style.css` at compile time.
const STYLE_CSS: &str = include_str!("../embed/css/style.css");

/// Output file name, linked from every page as `/style.css`.
pub const STYLESHEET: &str = "style.css";

/// Write the stylesheet unless the site's assets already provide one.
pub fn write_stylesheet(output_dir: &Path) -> Result<bool> {
    let path = output_dir.join(STYLESHEET);
    if path.exists() {
        return Ok(false);
    }
    fs::write(&path, STYLE_CSS).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
