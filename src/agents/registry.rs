//! Agent registry: the ordered roster loaded from the team configuration
//!
//! The team file has the shape
//!
//! ```json
//! { "config": { "participants": [
//!     { "config": { "name": "...", "system_message": "...",
//!                   "model_client": { "config": { "model": "...", "api_key": "..." } } } }
//! ] } }
//! ```
//!
//! `api_key_env` may replace `api_key` to read the credential from the named
//! environment variable. Any malformed participant fails the whole load.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::domain::{AgentDescriptor, AgentInfo};
use super::error::{ConfigError, ConfigResult};

/// Immutable, ordered sequence of agent descriptors
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: Vec<AgentDescriptor>,
}

#[derive(Debug, Deserialize)]
struct ParticipantEntry {
    config: ParticipantConfig,
}

#[derive(Debug, Deserialize)]
struct ParticipantConfig {
    name: String,
    system_message: String,
    model_client: ModelClientEntry,
}

#[derive(Debug, Deserialize)]
struct ModelClientEntry {
    config: ModelClientConfig,
}

#[derive(Debug, Deserialize)]
struct ModelClientConfig {
    model: String,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    api_key_env: Option<String>,
}

impl AgentRegistry {
    /// Registry with no agents
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from already-constructed descriptors
    pub fn from_agents(agents: Vec<AgentDescriptor>) -> Self {
        Self { agents }
    }

    /// Load the team configuration file at `path`
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let registry = Self::from_json_str(&content)?;
        info!(
            "Loaded {} agents from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Parse a team configuration document, resolving `api_key_env` from the process environment
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let document: Value = serde_json::from_str(content)?;
        Self::from_value_with_env(&document, |name| std::env::var(name).ok())
    }

    /// Parse a team configuration document with a custom environment lookup
    pub fn from_value_with_env<F>(document: &Value, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = document
            .get("config")
            .ok_or_else(|| ConfigError::MissingField("config".to_string()))?;
        let participants = config
            .get("participants")
            .ok_or_else(|| ConfigError::MissingField("config.participants".to_string()))?
            .as_array()
            .ok_or_else(|| {
                ConfigError::MissingField("config.participants (expected a list)".to_string())
            })?;

        let mut agents = Vec::with_capacity(participants.len());
        for (idx, raw) in participants.iter().enumerate() {
            let entry: ParticipantEntry = serde_json::from_value(raw.clone()).map_err(|e| {
                ConfigError::MissingField(format!("config.participants[{}]: {}", idx, e))
            })?;
            let cfg = entry.config;

            if cfg.name.trim().is_empty() {
                return Err(ConfigError::MissingField(format!(
                    "config.participants[{}].config.name",
                    idx
                )));
            }

            let credential = resolve_credential(&cfg.name, &cfg.model_client.config, &env)?;
            let agent = AgentDescriptor::new(
                cfg.name,
                cfg.model_client.config.model,
                cfg.system_message,
                credential,
            );
            if agent.has_credential() {
                debug!(agent = %agent.name, model = %agent.model, "Registered agent");
            } else {
                warn!(agent = %agent.name, "Registered agent with an empty credential; its calls will fail");
            }
            agents.push(agent);
        }

        Ok(Self { agents })
    }

    /// Agents in configuration order
    pub fn agents(&self) -> &[AgentDescriptor] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Credential-free listing of the roster
    pub fn list(&self) -> Vec<AgentInfo> {
        self.agents.iter().map(AgentDescriptor::info).collect()
    }
}

/// Exactly one of `api_key` / `api_key_env` must be present.
fn resolve_credential<F>(
    participant: &str,
    client: &ModelClientConfig,
    env: &F,
) -> ConfigResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    match (&client.api_key, &client.api_key_env) {
        (Some(key), None) => Ok(key.clone()),
        (None, Some(var)) => env(var).ok_or_else(|| ConfigError::Credential {
            participant: participant.to_string(),
            reason: format!("environment variable {} is not set", var),
        }),
        (Some(_), Some(_)) => Err(ConfigError::Credential {
            participant: participant.to_string(),
            reason: "both api_key and api_key_env are set".to_string(),
        }),
        (None, None) => Err(ConfigError::Credential {
            participant: participant.to_string(),
            reason: "one of api_key or api_key_env is required".to_string(),
        }),
    }
}
