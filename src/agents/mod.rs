//! Agent roster and fan-out
//!
//! - `registry` - ordered roster loaded once from the team configuration
//! - `llm/` - chat-completion client abstraction and the OpenAI implementation
//! - `orchestration/` - fan-out of one prompt to every agent
//! - `deploy_log` - persistence of deployment records
//! - `handler` - glue used by the HTTP surface and the CLI

pub mod deploy_log;
pub mod domain;
pub mod error;
pub mod handler;
pub mod llm;
pub mod orchestration;
pub mod registry;

// Re-export commonly used types
pub use domain::*;
pub use error::*;
pub use handler::AgentHandler;
pub use registry::AgentRegistry;
