//! Agent domain types

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// One roster entry: a named persona bound to a model and a system instruction.
///
/// Descriptors are built once by the registry and only ever borrowed afterwards.
#[derive(Debug)]
pub struct AgentDescriptor {
    /// Unique agent name, used to label results and logs
    pub name: String,
    /// Backend model identifier
    pub model: String,
    /// Persona / role instruction sent as the system message
    pub system_message: String,
    /// API key for the backend. `Debug` prints it redacted.
    pub credential: SecretString,
}

impl AgentDescriptor {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        system_message: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            system_message: system_message.into(),
            credential: SecretString::from(credential.into()),
        }
    }

    /// Whether a non-empty credential is configured
    pub fn has_credential(&self) -> bool {
        !self.credential.expose_secret().is_empty()
    }

    /// Public view of this agent, safe to return over HTTP
    pub fn info(&self) -> AgentInfo {
        AgentInfo {
            name: self.name.clone(),
            model: self.model.clone(),
        }
    }
}

/// Agent information without the credential
#[derive(Debug, Clone, Serialize)]
pub struct AgentInfo {
    pub name: String,
    pub model: String,
}
