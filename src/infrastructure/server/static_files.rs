//! Static file resolution for the dev server

use std::path::{Component, Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Script path served by the dev server itself
pub const CLIENT_PATH: &str = "/__assetline/client.js";

/// Long-poll endpoint
pub const POLL_PATH: &str = "/__assetline/poll";

/// Outcome of mapping a request path onto the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    File(PathBuf),
    Forbidden,
    NotFound,
}

/// Map a URL path (query already stripped) to a file below `root`.
pub fn resolve(root: &Path, url_path: &str) -> Resolved {
    let decoded = percent_decode_str(url_path).decode_utf8_lossy();
    let relative = decoded.trim_start_matches('/');
    if relative.contains('\0') || !stays_below_root(Path::new(relative)) {
        return Resolved::Forbidden;
    }

    let mut path = root.join(relative);
    if relative.is_empty() || relative.ends_with('/') || path.is_dir() {
        path = path.join("index.html");
    }

    if path.is_file() {
        Resolved::File(path)
    } else {
        Resolved::NotFound
    }
}

/// Only plain names and `.`; no `..`, root or drive prefix.
fn stays_below_root(relative: &Path) -> bool {
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// `Content-Type` by file extension
pub fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Insert the reload client before the last `</body>`, or append it.
pub fn inject_client(html: &str) -> String {
    let tag = format!("<script src=\"{CLIENT_PATH}\"></script>");
    match html.to_ascii_lowercase().rfind("</body>") {
        Some(pos) => format!("{}{}{}", &html[..pos], tag, &html[pos..]),
        None => format!("{html}{tag}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn site() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::create_dir_all(dir.path().join("css")).unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("blog/index.html"), "<p>blog</p>").unwrap();
        fs::write(dir.path().join("css/style.min.css"), "a{}").unwrap();
        fs::write(dir.path().join("my page.html"), "x").unwrap();
        dir
    }

    #[test]
    fn root_and_directories_resolve_to_index() {
        let dir = site();
        assert_eq!(resolve(dir.path(), "/"), Resolved::File(dir.path().join("index.html")));
        assert_eq!(
            resolve(dir.path(), "/blog"),
            Resolved::File(dir.path().join("blog").join("index.html"))
        );
        assert_eq!(
            resolve(dir.path(), "/blog/"),
            Resolved::File(dir.path().join("blog/").join("index.html"))
        );
    }

    #[test]
    fn files_and_missing_files() {
        let dir = site();
        assert_eq!(
            resolve(dir.path(), "/css/style.min.css"),
            Resolved::File(dir.path().join("css/style.min.css"))
        );
        assert_eq!(resolve(dir.path(), "/nope.js"), Resolved::NotFound);
    }

    #[test]
    fn traversal_is_forbidden() {
        let dir = site();
        assert_eq!(resolve(dir.path(), "/../secret"), Resolved::Forbidden);
        assert_eq!(resolve(dir.path(), "/css/%2e%2e/%2e%2e/etc"), Resolved::Forbidden);
        assert_eq!(resolve(dir.path(), "/blog/.."), Resolved::Forbidden);
        assert_eq!(resolve(dir.path(), "/a%00.html"), Resolved::Forbidden);
    }

    #[test]
    fn double_dots_inside_a_name_are_allowed() {
        let dir = site();
        fs::write(dir.path().join("a..b.html"), "x").unwrap();
        assert_eq!(
            resolve(dir.path(), "/a..b.html"),
            Resolved::File(dir.path().join("a..b.html"))
        );
        assert_eq!(resolve(dir.path(), "/..c.html"), Resolved::NotFound);
    }

    #[test]
    fn percent_encoded_names_resolve() {
        let dir = site();
        assert_eq!(
            resolve(dir.path(), "/my%20page.html"),
            Resolved::File(dir.path().join("my page.html"))
        );
    }

    #[test]
    fn injects_before_closing_body() {
        let html = inject_client("<html><BODY><p>x</p></BODY></html>");
        assert_eq!(
            html,
            "<html><BODY><p>x</p><script src=\"/__assetline/client.js\"></script></BODY></html>"
        );
        assert!(inject_client("<p>frag</p>").ends_with("client.js\"></script>"));
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type(Path::new("a.css")), "text/css; charset=utf-8");
        assert_eq!(content_type(Path::new("a.PNG")), "image/png");
        assert_eq!(content_type(Path::new("a.bin")), "application/octet-stream");
    }
}
