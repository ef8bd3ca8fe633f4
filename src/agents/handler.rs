//! Agent handler: ties the roster, the orchestrator and the deploy log together

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::agents::deploy_log::DeployLog;
use crate::agents::domain::{AgentResult, DeploymentRecord};
use crate::agents::orchestration::FanOutOrchestrator;
use crate::agents::registry::AgentRegistry;

/// Handler for agent operations
pub struct AgentHandler {
    registry: Arc<AgentRegistry>,
    orchestrator: FanOutOrchestrator,
    deploy_log: Option<Arc<dyn DeployLog>>,
}

impl std::fmt::Debug for AgentHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentHandler")
            .field("registry", &self.registry)
            .field("deploy_log", &self.deploy_log.is_some())
            .finish_non_exhaustive()
    }
}

impl AgentHandler {
    /// Create a new agent handler without deploy logging
    pub fn new(registry: Arc<AgentRegistry>, orchestrator: FanOutOrchestrator) -> Self {
        Self {
            registry,
            orchestrator,
            deploy_log: None,
        }
    }

    /// Persist every deployment record to `log`
    pub fn with_deploy_log(mut self, log: Arc<dyn DeployLog>) -> Self {
        self.deploy_log = Some(log);
        self
    }

    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }

    /// Run the full roster on `prompt` and record the outcome.
    ///
    /// A deploy log failure is reported through tracing and otherwise ignored.
    pub async fn deploy(&self, prompt: &str) -> DeploymentRecord {
        let results = self
            .orchestrator
            .dispatch(prompt, self.registry.agents())
            .await;
        let record = DeploymentRecord::new(results);

        if let Some(log) = &self.deploy_log {
            match log.persist(&record).await {
                Ok(location) => info!("Deploy log saved to {}", location),
                Err(e) => error!("Failed to write deploy log for {}: {}", record.timestamp, e),
            }
        }

        record
    }

    /// Run [`deploy`](Self::deploy) on its own task.
    ///
    /// The record is still logged when the returned handle is dropped, e.g. by a
    /// client that disconnects before the fan-out finishes.
    pub fn spawn_deploy(self: &Arc<Self>, prompt: String) -> JoinHandle<DeploymentRecord> {
        let handler = Arc::clone(self);
        tokio::spawn(async move { handler.deploy(&prompt).await })
    }

    /// Run the full roster on a chat message without writing a deploy log
    pub async fn chat(&self, message: &str) -> Vec<AgentResult> {
        self.orchestrator
            .dispatch(message, self.registry.agents())
            .await
    }
}
