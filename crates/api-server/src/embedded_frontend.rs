//! The dashboard page, compiled into the binary.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use rust_embed::Embed;

use crate::AppState;

#[derive(Embed)]
#[folder = "../../frontend/"]
#[exclude = "*.md"]
pub struct FrontendAssets;

pub fn frontend_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/assets/*path", get(asset))
}

async fn index() -> Response {
    serve_embedded("index.html")
}

async fn asset(Path(path): Path<String>) -> Response {
    serve_embedded(&format!("assets/{path}"))
}

fn serve_embedded(path: &str) -> Response {
    match FrontendAssets::get(path) {
        Some(file) => {
            let mime = file.metadata.mimetype().to_string();
            ([(header::CONTENT_TYPE, mime)], file.data).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_files_are_embedded() {
        assert!(FrontendAssets::get("index.html").is_some());
        assert!(FrontendAssets::get("assets/app.js").is_some());
        assert!(FrontendAssets::get("assets/style.css").is_some());
    }

    #[test]
    fn test_missing_asset_is_404() {
        assert_eq!(serve_embedded("assets/nope.js").status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_content_type_from_extension() {
        let response = serve_embedded("assets/style.css");
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    }
}
