use crate::http_api::bytes_response;
use axum::{http::StatusCode, response::Response};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const INDEX_FILE: &str = "index.html";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("html", "text/html; charset=utf-8"),
    ("htm", "text/html; charset=utf-8"),
    ("ract", "text/html; charset=utf-8"),
    ("js", "application/javascript; charset=utf-8"),
    ("mjs", "application/javascript; charset=utf-8"),
    ("css", "text/css; charset=utf-8"),
    ("json", "application/json"),
    ("map", "application/json"),
    ("txt", "text/plain; charset=utf-8"),
    ("xml", "text/xml; charset=utf-8"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("ico", "image/x-icon"),
    ("webp", "image/webp"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("wasm", "application/wasm"),
];

pub(crate) fn content_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return FALLBACK_CONTENT_TYPE;
    };
    let ext = ext.to_ascii_lowercase();
    CONTENT_TYPES
        .iter()
        .find(|(candidate, _)| *candidate == ext)
        .map(|(_, content_type)| *content_type)
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}

/// Maps a raw (percent-encoded) URL path onto a file under `root`.
///
/// Returns `None` for anything that could leave `root`: `..` segments, backslashes, NUL, or
/// malformed escapes.
pub(crate) fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode(request_path)?;
    let mut resolved = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            s if s.contains(&['\\', '\0'][..]) => return None,
            s => resolved.push(s),
        }
    }
    Some(resolved)
}

fn percent_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            let hex = std::str::from_utf8(hex).ok()?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// Serves the file a request path names under `root`, verbatim. Directories serve their
/// `index.html`; there is no directory listing.
pub(crate) async fn serve(root: &Path, request_path: &str) -> Result<Response, StatusCode> {
    let Some(path) = resolve(root, request_path) else {
        log::debug!("Rejected static path {request_path:?}");
        return Err(StatusCode::NOT_FOUND);
    };
    serve_file(&path).await
}

pub(crate) async fn serve_file(path: &Path) -> Result<Response, StatusCode> {
    let mut path = path.to_path_buf();
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_dir() => path.push(INDEX_FILE),
        Ok(_) => {}
        Err(err) => return Err(io_status(&path, &err)),
    }

    match tokio::fs::read(&path).await {
        Ok(bytes) => bytes_response(StatusCode::OK, content_type_for(&path), bytes),
        Err(err) => Err(io_status(&path, &err)),
    }
}

fn io_status(path: &Path, err: &std::io::Error) -> StatusCode {
    match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::PermissionDenied => StatusCode::FORBIDDEN,
        _ => {
            log::error!("error: serving static file: {}, err: {err}", path.display());
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
