//! One-shot deployment for the `run` subcommand

use std::io::Write;

use tracing::info;

use crate::agents::{AgentHandler, AgentOutcome, DeploymentRecord};

/// Deploy once on `prompt` and print every agent's outcome to `out`, in roster order
pub async fn run_once<W: Write>(
    handler: &AgentHandler,
    prompt: &str,
    out: &mut W,
) -> std::io::Result<DeploymentRecord> {
    info!("Starting deployment of {} agents", handler.registry().len());
    let record = handler.deploy(prompt).await;

    for result in &record.results {
        match &result.outcome {
            AgentOutcome::Success(text) => writeln!(out, "{}: {}\n", result.agent_name, text)?,
            AgentOutcome::Failure(reason) => {
                writeln!(out, "Error in {}: {}\n", result.agent_name, reason)?
            }
        }
    }
    out.flush()?;

    info!(
        "Deployment {} finished: {}/{} agents replied",
        record.timestamp,
        record.success_count(),
        record.results.len()
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::llm::{ChatClient, CompletionRequest};
    use crate::agents::orchestration::FanOutOrchestrator;
    use crate::agents::{AgentDescriptor, AgentRegistry, LlmError, LlmResult};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct FixedClient;

    #[async_trait]
    impl ChatClient for FixedClient {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(&self, request: CompletionRequest<'_>) -> LlmResult<String> {
            match request.model {
                "offline" => Err(LlmError::Network("connection refused".to_string())),
                model => Ok(format!("{} ready", model)),
            }
        }
    }

    #[tokio::test]
    async fn test_run_once_prints_each_outcome() {
        let registry = Arc::new(AgentRegistry::from_agents(vec![
            AgentDescriptor::new("Engineer", "m1", "s", "k"),
            AgentDescriptor::new("Installer", "offline", "s", "k"),
        ]));
        let handler = AgentHandler::new(registry, FanOutOrchestrator::new(Arc::new(FixedClient)));

        let mut out = Vec::new();
        let record = run_once(&handler, "report", &mut out).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(
            printed,
            "Engineer: m1 ready\n\nError in Installer: Network error: connection refused\n\n"
        );
        assert_eq!(record.success_count(), 1);
    }

    #[tokio::test]
    async fn test_run_once_with_empty_roster_prints_nothing() {
        let handler = AgentHandler::new(
            Arc::new(AgentRegistry::empty()),
            FanOutOrchestrator::new(Arc::new(FixedClient)),
        );
        let mut out = Vec::new();
        let record = run_once(&handler, "report", &mut out).await.unwrap();
        assert!(out.is_empty());
        assert!(record.results.is_empty());
    }
}
