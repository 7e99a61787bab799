//! Holonet gateway server entry point
//!
//! Bootstraps logging and configuration, wires the upstream catalog client
//! and chat provider into the router, and serves until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use holonet_api::{create_api_router, ApiError, ApiResult, AppState, GatewayConfig};
use holonet_catalog::SwapiClient;
use holonet_llm::OpenAiChatProvider;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env();
    config
        .validate()
        .map_err(|e| ApiError::internal_error(format!("Invalid configuration: {}", e)))?;

    let catalog = Arc::new(
        SwapiClient::new(&config.upstream_base_url, config.upstream_timeout)
            .map_err(|e| ApiError::internal_error(format!("Failed to build upstream client: {}", e)))?
            .with_page_size(config.upstream_page_size),
    );

    let api_key = match &config.openai_api_key {
        Some(key) => key.clone(),
        None => {
            tracing::warn!("OPENAI_API_KEY not set - chat requests will fail");
            String::new()
        }
    };
    let chat = Arc::new(
        OpenAiChatProvider::with_model(api_key, config.chat_model.clone())
            .map_err(|e| ApiError::internal_error(format!("Failed to build chat provider: {}", e)))?,
    );

    let addr: SocketAddr = format!("{}:{}", config.bind_host, config.port)
        .parse()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address: {}", e)))?;

    let state = AppState::new(catalog, chat, config);
    let app = create_api_router(state);

    tracing::info!(%addr, "Starting Holonet gateway");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
