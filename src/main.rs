use clap::Parser;
use crewdeploy::adapters::api_handler::ApiState;
use crewdeploy::adapters::cli_handler;
use crewdeploy::adapters::health_handler::HealthHandler;
use crewdeploy::agents::AgentHandler;
use crewdeploy::cli::{Cli, Command};
use crewdeploy::config::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crewdeploy=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    // The roster is loaded once; without it there is nothing to serve
    let handler = crewdeploy::build_agent_handler(&settings)?;

    match cli.command() {
        Command::Serve => serve(settings, handler).await,
        Command::Run { prompt } => {
            let prompt = prompt.unwrap_or_else(|| settings.team.default_prompt.clone());
            cli_handler::run_once(&handler, &prompt, &mut std::io::stdout().lock()).await?;
            Ok(())
        }
    }
}

async fn serve(settings: Settings, handler: Arc<AgentHandler>) -> anyhow::Result<()> {
    let health_handler = Arc::new(HealthHandler::new(handler.registry().clone()));
    let api_state = ApiState::new(handler, settings.team.default_prompt.clone());
    let app = crewdeploy::create_app(api_state, health_handler);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
