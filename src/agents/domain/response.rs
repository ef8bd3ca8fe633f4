//! Per-agent results and the persisted deployment record

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp layout shared by the deploy response and the log file name
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Outcome of one agent call.
///
/// Serializes as a single `"response"` or `"error"` key so that a flattened
/// [`AgentResult`] renders as `{agent, response}` or `{agent, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentOutcome {
    #[serde(rename = "response")]
    Success(String),
    #[serde(rename = "error")]
    Failure(String),
}

/// Result of dispatching the prompt to one agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResult {
    #[serde(rename = "agent")]
    pub agent_name: String,
    #[serde(flatten)]
    pub outcome: AgentOutcome,
}

impl AgentResult {
    pub fn success(agent_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            outcome: AgentOutcome::Success(text.into()),
        }
    }

    pub fn failure(agent_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            outcome: AgentOutcome::Failure(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, AgentOutcome::Success(_))
    }

    /// One line of the textual team summary
    pub fn summary_line(&self) -> String {
        match &self.outcome {
            AgentOutcome::Success(text) => format!("{}: {}", self.agent_name, text),
            AgentOutcome::Failure(reason) => format!("Error in {}: {}", self.agent_name, reason),
        }
    }
}

/// Join results in agent order, separated by blank lines.
///
/// Returns `None` when there is nothing to summarize.
pub fn summarize(results: &[AgentResult]) -> Option<String> {
    if results.is_empty() {
        return None;
    }
    let lines: Vec<String> = results.iter().map(AgentResult::summary_line).collect();
    Some(lines.join("\n\n"))
}

/// Persisted outcome of one `/deploy` fan-out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Creation time formatted with [`TIMESTAMP_FORMAT`]
    pub timestamp: String,
    /// Results in registry order
    #[serde(rename = "responses")]
    pub results: Vec<AgentResult>,
}

impl DeploymentRecord {
    /// Create a record stamped with the current local time
    pub fn new(results: Vec<AgentResult>) -> Self {
        Self::at(Local::now(), results)
    }

    /// Create a record stamped with the given time
    pub fn at(time: DateTime<Local>, results: Vec<AgentResult>) -> Self {
        Self {
            timestamp: time.format(TIMESTAMP_FORMAT).to_string(),
            results,
        }
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }
}
