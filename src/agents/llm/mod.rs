//! Chat-completion client abstraction
//!
//! A [`ChatClient`] sends one system + user message pair to a named model and
//! returns the first completion's text. Clients are stateless between calls and
//! never retry; callers decide what a failure means.

mod openai;

pub use openai::OpenAiChatClient;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::agents::domain::{AgentDescriptor, Message};
use crate::agents::error::LlmResult;

/// Capability to run a single chat completion
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Send the request and return the completion text
    async fn complete(&self, request: CompletionRequest<'_>) -> LlmResult<String>;
}

/// One chat-completion call, borrowing model and credential from the roster
#[derive(Debug)]
pub struct CompletionRequest<'a> {
    /// Backend model identifier
    pub model: &'a str,
    /// System message followed by the user prompt
    pub messages: Vec<Message>,
    /// API key for this call only
    pub credential: &'a SecretString,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(
        model: &'a str,
        system_message: &str,
        user_prompt: &str,
        credential: &'a SecretString,
    ) -> Self {
        Self {
            model,
            messages: vec![Message::system(system_message), Message::user(user_prompt)],
            credential,
        }
    }

    /// Request addressed to `agent` carrying the shared prompt
    pub fn for_agent(agent: &'a AgentDescriptor, prompt: &str) -> Self {
        Self::new(&agent.model, &agent.system_message, prompt, &agent.credential)
    }
}
