//! # crewdeploy
//!
//! HTTP service that sends one prompt to every agent of a team roster and
//! collects the replies.
//!
//! A team configuration document lists the participants; each one names a
//! chat-completion model, a system message and a credential. On `/deploy` the
//! prompt is fanned out to every participant, a failing agent is reported as
//! data without affecting the others, and the ordered results are written to a
//! timestamped deploy log.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use crewdeploy::agents::{AgentHandler, AgentRegistry};
//! use crewdeploy::agents::llm::OpenAiChatClient;
//! use crewdeploy::agents::orchestration::FanOutOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = Arc::new(AgentRegistry::load("team-config.json")?);
//!     let orchestrator = FanOutOrchestrator::new(Arc::new(OpenAiChatClient::new()?));
//!     let handler = AgentHandler::new(registry, orchestrator);
//!
//!     let record = handler.deploy("Confirm you are ready.").await;
//!     println!("{} replies", record.results.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Agents**: roster, chat client, fan-out and deploy log
//! - **Adapters**: HTTP handlers
//! - **Config**: settings file, environment and CLI

pub mod adapters;
pub mod agents;
pub mod cli;
pub mod config;

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::health_handler::HealthHandler;
use crate::adapters::ui_handler::UIHandler;
use crate::agents::deploy_log::FileDeployLog;
use crate::agents::llm::OpenAiChatClient;
use crate::agents::orchestration::FanOutOrchestrator;
use crate::agents::{AgentHandler, AgentRegistry};
use crate::config::Settings;
use anyhow::Context;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Load the team roster named by `settings` and assemble the agent handler.
///
/// Fails when the team configuration cannot be loaded; nothing is served without it.
pub fn build_agent_handler(settings: &Settings) -> anyhow::Result<Arc<AgentHandler>> {
    let registry = Arc::new(
        AgentRegistry::load(&settings.team.path)
            .with_context(|| format!("Failed to load team from {}", settings.team.path.display()))?,
    );
    if registry.is_empty() {
        warn!("Team configuration has no participants");
    }

    let client = Arc::new(OpenAiChatClient::from_settings(&settings.llm)?);
    let orchestrator = FanOutOrchestrator::new(client)
        .with_timeout(settings.llm.timeout())
        .with_max_concurrency(settings.llm.max_concurrency);

    let mut handler = AgentHandler::new(registry, orchestrator);
    if settings.deploy_log.enabled {
        let log = FileDeployLog::new(settings.deploy_log.directory.clone());
        info!("Deploy logs are written to {}", log.directory().display());
        handler = handler.with_deploy_log(Arc::new(log));
    }
    Ok(Arc::new(handler))
}

/// Creates the Axum application router with all endpoints configured.
///
/// # Arguments
///
/// * `api_state` - Agent handler and default prompt shared by the API routes
/// * `health_handler` - Health check handler
///
/// # Returns
///
/// Configured Axum Router
pub fn create_app(api_state: ApiState, health_handler: Arc<HealthHandler>) -> Router {
    let health_router = Router::new()
        .route("/health", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.health().await }
            }
        }))
        .route("/health/live", get({
            let handler = health_handler.clone();
            move || {
                let h = handler.clone();
                async move { h.live().await }
            }
        }));

    let api_router = Router::new()
        .route("/", get(api_handler::status))
        .route("/chat", get(UIHandler::chat_page).post(api_handler::chat))
        .route("/deploy", axum::routing::post(api_handler::deploy))
        .route("/static/*path", get(UIHandler::serve))
        .with_state(api_state);

    health_router
        .merge(api_router)
        .layer(TraceLayer::new_for_http())
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
