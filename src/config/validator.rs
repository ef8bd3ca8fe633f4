use thiserror::Error;

use crate::config::{DeployLogSettings, LlmSettings, ServerSettings, Settings, TeamSettings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        errors.extend(Self::validate_server(&settings.server));
        errors.extend(Self::validate_team(&settings.team));
        errors.extend(Self::validate_llm(&settings.llm));
        errors.extend(Self::validate_deploy_log(&settings.deploy_log));

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &ServerSettings) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        errors
    }

    fn validate_team(team: &TeamSettings) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if team.path.as_os_str().is_empty() {
            errors.push(ValidationError::MissingField("team.path".to_string()));
        }

        if team.default_prompt.trim().is_empty() {
            errors.push(ValidationError::MissingField("team.default_prompt".to_string()));
        }

        errors
    }

    fn validate_llm(llm: &LlmSettings) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if llm.base_url.is_empty() {
            errors.push(ValidationError::MissingField("llm.base_url".to_string()));
        } else if !(llm.base_url.starts_with("http://") || llm.base_url.starts_with("https://")) {
            errors.push(ValidationError::InvalidValue {
                field: "llm.base_url".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if llm.max_concurrency == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "llm.max_concurrency".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        if let Some(temp) = llm.temperature {
            if !(0.0..=2.0).contains(&temp) {
                errors.push(ValidationError::InvalidValue {
                    field: "llm.temperature".to_string(),
                    reason: "Must be between 0.0 and 2.0".to_string(),
                });
            }
        }

        errors
    }

    fn validate_deploy_log(log: &DeployLogSettings) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if log.enabled && log.directory.as_os_str().is_empty() {
            errors.push(ValidationError::MissingField("deploy_log.directory".to_string()));
        }

        errors
    }
}
