//! Local preview server.
//!
//! A lightweight HTTP server over the build output, built on `tiny_http`:
//!
//! - Static file serving from the output directory
//! - Automatic `index.html` resolution for directories
//! - Generated `404.html` for everything else
//! - Graceful shutdown on Ctrl+C
//!
//! ```text
//! GET /blog/hello ──► public/blog/hello/index.html
//! GET /missing    ──► public/404.html (status 404)
//! ```

use crate::{build::NOT_FOUND_ROUTE, config::SiteConfig, log};
use anyhow::{Context, Result, anyhow, bail};
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::{Component, Path, PathBuf},
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Serve the output directory until Ctrl+C is received.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("Invalid interface `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &config.build.output) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    let last_port = base_port.saturating_add(max_retries.saturating_sub(1));
    match last_error {
        Some(e) => Err(anyhow!(
            "Failed to bind after {} attempts (ports {}-{}): {}",
            max_retries,
            base_port,
            last_port,
            e
        )),
        None => bail!("No ports to try"),
    }
}

// ============================================================================
// Request Handling
// ============================================================================

/// Where a request path leads.
#[derive(Debug, PartialEq, Eq)]
enum Resolved {
    File(PathBuf),
    /// Nothing matched; the path is the not-found page if it exists.
    NotFound(Option<PathBuf>),
}

/// Resolve a raw request URL against the output directory.
///
/// Resolution order:
/// 1. Exact file match
/// 2. Directory with `index.html`
/// 3. `404.html`
fn resolve(serve_root: &Path, url: &str) -> Resolved {
    // Decode URL-encoded characters (e.g., %20 → space)
    let url_path = urlencoding::decode(url)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    // Strip query string and fragment before resolving path
    let path = url_path.split(['?', '#']).next().unwrap_or_default();
    let request_path = Path::new(path.trim_matches('/'));

    let not_found = || {
        let page = serve_root.join(NOT_FOUND_ROUTE.trim_start_matches('/'));
        Resolved::NotFound(page.is_file().then_some(page))
    };

    if request_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return not_found();
    }

    let local_path = serve_root.join(request_path);
    if local_path.is_file() {
        return Resolved::File(local_path);
    }

    let index_path = local_path.join("index.html");
    if index_path.is_file() {
        return Resolved::File(index_path);
    }

    not_found()
}

/// Handle a single HTTP request.
fn handle_request(request: Request, serve_root: &Path) -> Result<()> {
    match resolve(serve_root, request.url()) {
        Resolved::File(path) => serve_file(request, &path, StatusCode(200)),
        Resolved::NotFound(Some(page)) => serve_file(request, &page, StatusCode(404)),
        Resolved::NotFound(None) => serve_plain_not_found(request),
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

fn content_type_header(value: &str) -> Result<Header> {
    Header::from_bytes("Content-Type", value).map_err(|()| anyhow!("Invalid header value `{value}`"))
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path, status: StatusCode) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response = Response::from_data(content)
        .with_status_code(status)
        .with_header(content_type_header(guess_content_type(path))?);

    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response when the site has no 404 page.
fn serve_plain_not_found(request: Request) -> Result<()> {
    let body = "404 Not Found";
    let response = Response::new(
        StatusCode(404),
        vec![content_type_header("text/plain")?],
        Cursor::new(body),
        Some(body.len()),
        None,
    );
    request.respond(response)?;
    Ok(())
}

// ============================================================================
// Content Type Detection
// ============================================================================

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        Some("txt") => "text/plain; charset=utf-8",

        // Default binary
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("blog/hello")).unwrap();
        fs::write(root.join("index.html"), "home").unwrap();
        fs::write(root.join("blog/hello/index.html"), "hello").unwrap();
        fs::write(root.join("style.css"), "body{}").unwrap();
        fs::write(root.join("404.html"), "missing").unwrap();
        dir
    }

    #[test]
    fn test_resolve_files_and_indexes() {
        let dir = site();
        let root = dir.path();

        assert_eq!(resolve(root, "/"), Resolved::File(root.join("index.html")));
        assert_eq!(resolve(root, "/style.css"), Resolved::File(root.join("style.css")));
        assert_eq!(
            resolve(root, "/blog/hello"),
            Resolved::File(root.join("blog/hello/index.html"))
        );
        assert_eq!(
            resolve(root, "/blog/hello/?ref=home"),
            Resolved::File(root.join("blog/hello/index.html"))
        );
    }

    #[test]
    fn test_resolve_decodes_percent_encoding() {
        let dir = site();
        let root = dir.path();
        fs::create_dir_all(root.join("blog/tags/c++")).unwrap();
        fs::write(root.join("blog/tags/c++/index.html"), "tag").unwrap();

        assert_eq!(
            resolve(root, "/blog/tags/c%2B%2B/"),
            Resolved::File(root.join("blog/tags/c++/index.html"))
        );
    }

    #[test]
    fn test_resolve_not_found_page() {
        let dir = site();
        let root = dir.path();

        assert_eq!(
            resolve(root, "/blog/missing"),
            Resolved::NotFound(Some(root.join("404.html")))
        );
    }

    #[test]
    fn test_resolve_without_not_found_page() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve(dir.path(), "/anything"), Resolved::NotFound(None));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = site();
        let root = dir.path();

        assert!(matches!(resolve(root, "/../etc/passwd"), Resolved::NotFound(_)));
        assert!(matches!(resolve(root, "/blog/%2E%2E/%2E%2E/secret"), Resolved::NotFound(_)));
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("a.html")), "text/html; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("a.xml")), "application/xml; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("a.woff2")), "font/woff2");
        assert_eq!(guess_content_type(Path::new("a.bin")), "application/octet-stream");
    }

    #[test]
    fn test_try_bind_port_binds() {
        let localhost: IpAddr = "127.0.0.1".parse().unwrap();
        let (_first, addr) = try_bind_port(localhost, 0, 1).unwrap();
        assert_eq!(addr.ip(), localhost);
    }
}
