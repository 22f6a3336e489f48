//! MamaPesa USSD service
//!
//! Answers USSD gateway callbacks by rebuilding the menu position from the
//! dialed path, with a chat branch backed by an AI answering service.

mod ai_bridge;
mod api;
mod llm;
mod ussd;

use ai_bridge::AiQueryBridge;
use api::{create_router, AppState};
use llm::LlmConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ussd::{MenuTree, UssdEngine};

const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Local runs keep credentials in .env
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mamapesa_ussd=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port = listen_port(std::env::var("PORT").ok());

    let tree = MenuTree::mamapesa()?;

    let llm_config = LlmConfig::from_env();
    let llm_service = llm::service_from_config(&llm_config);
    if llm_service.is_some() {
        tracing::info!(model = %llm_config.model, base_url = %llm_config.base_url, "AI answering service configured");
    } else {
        tracing::warn!("No AI answering service configured. Set OPENAI_API_KEY; chat questions will get the fallback reply.");
    }

    let bridge = AiQueryBridge::new(llm_service)
        .with_timeout(AiQueryBridge::timeout_from(std::env::var("AI_TIMEOUT_SECS").ok()));
    let engine = UssdEngine::new(Arc::new(tree), Arc::new(bridge));

    let app = create_router(AppState::new(engine)).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("App is running on port {}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Port from `PORT`, falling back to 3001 when unset or unparsable
fn listen_port(value: Option<String>) -> u16 {
    value
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}
