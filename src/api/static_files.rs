//! Static file serving
//!
//! Everything that is not an API or fragment route lands here:
//! - `/uploads/*` comes from the upload directory
//! - `/admin/dashboard.html` needs a live session
//! - anything else comes from the site root, with `index.html` standing in
//!   for directories

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

use crate::api::middleware::{current_user, ApiError, AppState};

/// Page that is only served to a logged-in admin, relative to the site root
const DASHBOARD_PATH: &str = "admin/dashboard.html";

/// Serve static files based on path
pub async fn serve_static(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let path = uri.path();
    // URL decode the path to handle encoded characters like %20
    let decoded_path = urlencoding::decode(path).unwrap_or_else(|_| path.into());
    let path = decoded_path.as_ref();

    let Some(relative) = safe_relative_path(path) else {
        tracing::debug!("Rejected static path {}", path);
        return not_found();
    };

    if let Ok(rest) = relative.strip_prefix("uploads") {
        if rest.as_os_str().is_empty() {
            return not_found();
        }
        return serve_file(&state.uploads.dir().join(rest), true).await;
    }

    // Compared after normalisation so `//` and `./` spellings are gated too
    if relative == Path::new(DASHBOARD_PATH) {
        match current_user(&state, &headers).await {
            Ok(Some(_)) => {}
            Ok(None) => return ApiError::unauthorized("Unauthorized").into_response(),
            Err(e) => return e.into_response(),
        }
    }

    let mut file_path = state.site_root.join(&relative);
    if path.ends_with('/') || fs::metadata(&file_path).await.map(|m| m.is_dir()).unwrap_or(false) {
        file_path = file_path.join("index.html");
    }

    serve_file(&file_path, false).await
}

/// Map a URL path onto a relative filesystem path.
///
/// Returns `None` when the path tries to climb out of its root.
fn safe_relative_path(path: &str) -> Option<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(relative)
}

async fn serve_file(file_path: &Path, immutable: bool) -> Response {
    match fs::read(file_path).await {
        Ok(contents) => build_response(&file_path.to_string_lossy(), contents, immutable),
        Err(_) => not_found(),
    }
}

/// Build HTTP response with proper headers
fn build_response(path: &str, data: Vec<u8>, immutable: bool) -> Response {
    let content_type = get_content_type(path);
    let cache_control = if immutable {
        "public, max-age=31536000, immutable"
    } else if content_type.starts_with("text/html") {
        "no-cache"
    } else {
        "public, max-age=3600"
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, cache_control),
        ],
        data,
    )
        .into_response()
}

/// 404 response
fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        "<html><body><h1>404 Not Found</h1></body></html>",
    )
        .into_response()
}

/// Get content type from file extension
fn get_content_type(path: &str) -> &'static str {
    match path.rsplit('.').next().unwrap_or("").to_ascii_lowercase().as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "webp" => "image/webp",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
