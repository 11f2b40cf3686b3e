use axum::response::Html;

/// Single-page chat client. Talks only to POST /chat.
static CHAT_PAGE: &str = include_str!("../../static/index.html");

/// GET / — the chat page, compiled into the binary.
pub async fn index_handler() -> Html<&'static str> {
    Html(CHAT_PAGE)
}
