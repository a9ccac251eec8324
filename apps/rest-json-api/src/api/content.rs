//! Static HTML content
//!
//! Files under the configured directory are served at `/html/`, and `/`
//! redirects there.

use axum::{Router, response::Redirect, routing::get};
use std::path::Path;
use tower_http::services::ServeDir;

pub const CONTENT_PREFIX: &str = "/html";

/// Create the static content router
pub fn router(directory: &Path) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::temporary("/html/") }))
        .nest_service(CONTENT_PREFIX, ServeDir::new(directory))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn temp_content_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("rest-json-api-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>jobs</h1>").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_root_redirects_to_html() {
        let dir = temp_content_dir("redirect");
        let response = router(&dir)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/html/");
    }

    #[tokio::test]
    async fn test_serves_files_from_directory() {
        let dir = temp_content_dir("serve");
        let response = router(&dir)
            .oneshot(Request::get("/html/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<h1>jobs</h1>");
    }
}
