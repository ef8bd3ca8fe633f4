//! REST handlers for the status, chat and deploy endpoints

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::agents::domain::{summarize, AgentResult};
use crate::agents::AgentHandler;

/// Reply to `/chat` when the roster is empty
pub const NO_AGENTS_MESSAGE: &str = "No agents are configured.";

/// Shared state for the API routes
#[derive(Clone)]
pub struct ApiState {
    pub agents: Arc<AgentHandler>,
    pub default_prompt: Arc<str>,
}

impl ApiState {
    pub fn new(agents: Arc<AgentHandler>, default_prompt: impl Into<String>) -> Self {
        Self {
            agents,
            default_prompt: Arc::from(default_prompt.into()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeployRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeployResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub responses: Vec<AgentResult>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `GET /`
pub async fn status() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "Agent deployment API is running.",
        "usage": "Visit /chat for the interface or POST to /deploy."
    }))
}

/// `POST /deploy`
///
/// An empty body counts as `{}`. The deployment runs on its own task so the
/// deploy log is written even when the client goes away mid-request.
pub async fn deploy(State(state): State<ApiState>, body: Bytes) -> Response {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        DeployRequest::default()
    } else {
        match Json::<DeployRequest>::from_bytes(&body) {
            Ok(Json(request)) => request,
            Err(rejection) => return deploy_rejected(rejection),
        }
    };

    let prompt = request
        .prompt
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| state.default_prompt.to_string());

    info!("Deploying team on prompt ({} chars)", prompt.chars().count());
    let record = match state.agents.spawn_deploy(prompt).await {
        Ok(record) => record,
        Err(e) => {
            error!("Deployment task failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": "Deployment failed."
                })),
            )
                .into_response();
        }
    };

    Json(DeployResponse {
        status: "success",
        timestamp: record.timestamp,
        responses: record.results,
    })
    .into_response()
}

fn deploy_rejected(rejection: JsonRejection) -> Response {
    warn!("Rejected deploy request: {}", rejection.body_text());
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "status": "error",
            "message": rejection.body_text()
        })),
    )
        .into_response()
}

/// `POST /chat`
pub async fn chat(
    State(state): State<ApiState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let message = match payload {
        Ok(Json(request)) => request.message.unwrap_or_default(),
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": rejection.body_text() })),
            )
                .into_response();
        }
    };

    let message = message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No message was received." })),
        )
            .into_response();
    }

    info!("Chat message received ({} chars)", message.chars().count());
    let results = state.agents.chat(message).await;
    let response = summarize(&results).unwrap_or_else(|| NO_AGENTS_MESSAGE.to_string());

    Json(ChatResponse { response }).into_response()
}
