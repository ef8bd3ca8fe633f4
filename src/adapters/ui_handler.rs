use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "static"]
struct Asset;

pub struct UIHandler;

impl UIHandler {
    /// `GET /chat`
    pub async fn chat_page() -> Response {
        Self::asset("index.html")
    }

    /// `GET /static/*path`
    pub async fn serve(Path(path): Path<String>) -> Response {
        Self::asset(path.trim_start_matches('/'))
    }

    fn asset(path: &str) -> Response {
        match Asset::get(path) {
            Some(content) => {
                let mime = mime_guess::from_path(path).first_or_octet_stream();
                ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
            }
            None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
        }
    }
}
