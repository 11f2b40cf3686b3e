use std::sync::Arc;
use tracing::info;

mod app;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudchat_gateway=info,tower_http=debug".into()),
        )
        .init();

    // load config: CLOUDCHAT_CONFIG > ./cloudchat.toml, then env overrides
    let config_path = std::env::var("CLOUDCHAT_CONFIG").ok();
    let config = cloudchat_core::CloudChatConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(code = e.code(), "Config load failed ({}), using defaults", e);
        cloudchat_core::CloudChatConfig::default()
    });

    info!(
        services = config.services.len(),
        transcript_capacity = config.agent.transcript_capacity,
        "starting CloudChat gateway (git {})",
        env!("CLOUDCHAT_GIT_SHA")
    );

    let state = Arc::new(app::AppState::from_config(config));
    app::serve(state).await?;
    Ok(())
}
