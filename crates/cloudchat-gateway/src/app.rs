use axum::{
    routing::{get, post},
    Router,
};
use cloudchat_agent::ResponseSelector;
use cloudchat_core::config::CloudChatConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::info;

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: CloudChatConfig,
    pub selector: ResponseSelector,
}

impl AppState {
    pub fn new(config: CloudChatConfig, selector: ResponseSelector) -> Self {
        Self { config, selector }
    }

    /// Build state with a selector configured from `config.agent`.
    pub fn from_config(config: CloudChatConfig) -> Self {
        let selector = ResponseSelector::from_config(&config.agent);
        Self::new(config, selector)
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(crate::http::ui::index_handler))
        .route("/chat", post(crate::http::chat::chat_handler))
        .route("/status", get(crate::http::status::status_handler))
        .route("/health", get(crate::http::health::health_handler))
        .with_state(state)
        .layer(CatchPanicLayer::custom(crate::http::chat::panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(state: Arc<AppState>) -> cloudchat_core::Result<()> {
    let addr: SocketAddr = state
        .config
        .listen_addr()
        .parse()
        .map_err(|e| cloudchat_core::CloudChatError::Config(format!("bad listen address: {e}")))?;

    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("CloudChat gateway listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("CloudChat gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
