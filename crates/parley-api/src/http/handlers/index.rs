//! Embedded single-page chat UI.

use axum::response::Html;

/// GET / - the chat page. The UI is compiled into the binary so the server
/// is a single artifact with nothing to serve from disk.
pub async fn home() -> Html<&'static str> {
    Html(include_str!("../../../assets/index.html"))
}
