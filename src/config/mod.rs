use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

pub mod validator;

use crate::cli::Cli;

/// Prompt used by `/deploy` and `run` when the caller supplies none
pub const DEFAULT_PROMPT: &str =
    "Describe your role within the team and confirm that you are ready to start the deployment.";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub team: TeamSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub deploy_log: DeployLogSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Where the roster comes from and what it is asked by default
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamSettings {
    /// Path to the team configuration JSON document
    #[serde(default = "default_team_path")]
    pub path: PathBuf,
    #[serde(default = "default_prompt")]
    pub default_prompt: String,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            path: default_team_path(),
            default_prompt: default_prompt(),
        }
    }
}

fn default_team_path() -> PathBuf {
    PathBuf::from("team-config.json")
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

/// Chat-completion backend settings shared by every agent
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmSettings {
    /// OpenAI-compatible API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-agent call bound in seconds, 0 disables
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Agent calls in flight at once within one request
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl LlmSettings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            max_concurrency: default_max_concurrency(),
            temperature: None,
            max_tokens: None,
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_max_concurrency() -> usize {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeployLogSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
}

impl Default for DeployLogSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            directory: default_log_directory(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Settings {
    /// Load settings from a TOML file (optional) and `CREWDEPLOY_*` environment variables
    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("CREWDEPLOY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        Ok(settings)
    }

    /// Create settings from CLI arguments (includes settings file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.settings)?;

        // Apply CLI overrides (CLI > env vars > settings file)
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Run [`validator::ConfigValidator`] and fold every violation into one error
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(team) = &cli.team {
            self.team.path = team.clone();
        }
        if let Some(dir) = &cli.log_dir {
            self.deploy_log.directory = dir.clone();
        }
        if let Some(timeout) = cli.agent_timeout {
            self.llm.timeout_seconds = timeout;
        }
        if let Some(max_concurrency) = cli.max_concurrency {
            self.llm.max_concurrency = max_concurrency;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.team.path, PathBuf::from("team-config.json"));
        assert_eq!(settings.team.default_prompt, DEFAULT_PROMPT);
        assert_eq!(settings.llm.timeout(), Some(Duration::from_secs(120)));
        assert!(settings.deploy_log.enabled);
    }

    #[test]
    fn test_file_values_and_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crewdeploy.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 9000

[team]
path = "teams/solar.json"

[llm]
timeout_seconds = 0
max_concurrency = 2
"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "crewdeploy",
            "--settings",
            path.to_str().unwrap(),
            "--port",
            "9100",
            "--log-dir",
            "logs",
        ]);
        let settings = Settings::new_with_cli(&cli).unwrap();

        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.team.path, PathBuf::from("teams/solar.json"));
        assert_eq!(settings.llm.timeout(), None);
        assert_eq!(settings.llm.max_concurrency, 2);
        assert_eq!(settings.deploy_log.directory, PathBuf::from("logs"));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crewdeploy.toml");
        std::fs::write(&path, "[llm]\nmax_concurrency = 0\n").unwrap();

        let cli = Cli::parse_from(["crewdeploy", "--settings", path.to_str().unwrap()]);
        let err = Settings::new_with_cli(&cli).unwrap_err();
        assert!(err.to_string().contains("llm.max_concurrency"));
    }
}
