use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fan a prompt out to a roster of chat-completion agents
#[derive(Parser, Debug, Clone)]
#[command(name = "crewdeploy", version, about, long_about = None)]
pub struct Cli {
    /// Path to the settings file
    #[arg(short, long, global = true, env = "CREWDEPLOY_SETTINGS", default_value = "crewdeploy.toml")]
    pub settings: PathBuf,

    /// Path to the team configuration JSON
    #[arg(short, long, global = true, env = "CREWDEPLOY_TEAM_FILE")]
    pub team: Option<PathBuf>,

    /// Server host address
    #[arg(long, global = true, env = "CREWDEPLOY_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, global = true, env = "CREWDEPLOY_PORT")]
    pub port: Option<u16>,

    /// Directory for deploy log files
    #[arg(long, global = true, env = "CREWDEPLOY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Per-agent timeout in seconds (0 disables)
    #[arg(long, global = true, env = "CREWDEPLOY_AGENT_TIMEOUT")]
    pub agent_timeout: Option<u64>,

    /// Agent calls in flight at once
    #[arg(long, global = true, env = "CREWDEPLOY_MAX_CONCURRENCY")]
    pub max_concurrency: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP service (default)
    Serve,
    /// Run one deployment from the command line and exit
    Run {
        /// Prompt sent to every agent
        #[arg(short, long)]
        prompt: Option<String>,
    },
}

impl Cli {
    /// Subcommand to execute, `serve` when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
