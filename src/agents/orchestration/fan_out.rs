//! Fan-out orchestration pattern

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::{FutureExt, StreamExt};
use tracing::{info, warn};

use crate::agents::domain::{AgentDescriptor, AgentResult};
use crate::agents::error::LlmError;
use crate::agents::llm::{ChatClient, CompletionRequest};

const PREVIEW_CHARS: usize = 100;

/// Fan-out orchestrator: one independent call per agent, failures isolated
pub struct FanOutOrchestrator {
    client: Arc<dyn ChatClient>,
    timeout: Option<Duration>,
    max_concurrency: usize,
}

impl FanOutOrchestrator {
    /// Create an orchestrator with no per-agent timeout that runs agents one at a time
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self {
            client,
            timeout: None,
            max_concurrency: 1,
        }
    }

    /// Bound each agent call; an expired call becomes that agent's failure
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of agent calls allowed in flight at once (minimum 1)
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Send `prompt` to every agent and return one result per agent, in input order.
    ///
    /// Never fails: call errors, timeouts and panics inside the client are
    /// reported as [`AgentOutcome::Failure`](crate::agents::domain::AgentOutcome)
    /// for that agent only.
    pub async fn dispatch(&self, prompt: &str, agents: &[AgentDescriptor]) -> Vec<AgentResult> {
        if agents.is_empty() {
            return Vec::new();
        }

        let start_time = Instant::now();
        info!(
            "Dispatching prompt to {} agents (concurrency {})",
            agents.len(),
            self.max_concurrency
        );

        let calls: Vec<_> = agents
            .iter()
            .enumerate()
            .map(|(idx, agent)| async move { (idx, self.run_agent(agent, prompt).await) })
            .collect();
        let mut indexed: Vec<(usize, AgentResult)> = futures::stream::iter(calls)
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        // Completion order is arbitrary; restore roster order.
        indexed.sort_by_key(|(idx, _)| *idx);
        let results: Vec<AgentResult> = indexed.into_iter().map(|(_, result)| result).collect();

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        info!(
            "Fan-out finished in {}ms: {}/{} agents succeeded",
            start_time.elapsed().as_millis(),
            succeeded,
            results.len()
        );

        results
    }

    async fn run_agent(&self, agent: &AgentDescriptor, prompt: &str) -> AgentResult {
        info!(
            agent = %agent.name,
            model = %agent.model,
            provider = %self.client.name(),
            "Running agent"
        );

        let call = AssertUnwindSafe(self.call_with_timeout(agent, prompt)).catch_unwind();
        let outcome = match call.await {
            Ok(outcome) => outcome.map_err(|e| e.to_string()),
            Err(_) => Err("agent call panicked".to_string()),
        };

        match outcome {
            Ok(text) => {
                info!(agent = %agent.name, "{}", preview(&text));
                AgentResult::success(&agent.name, text)
            }
            Err(reason) => {
                warn!(agent = %agent.name, "Agent failed: {}", reason);
                AgentResult::failure(&agent.name, reason)
            }
        }
    }

    async fn call_with_timeout(
        &self,
        agent: &AgentDescriptor,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let call = self.client.complete(CompletionRequest::for_agent(agent, prompt));
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(LlmError::Timeout(limit))),
            None => call.await,
        }
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
