use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use speak_gateway::{AppState, ProxyEvent, ServerConfig, routes};

/// Speak Gateway - text to speech with signed download URLs
#[derive(Parser, Debug)]
#[command(name = "speak-gateway")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subcommand to run (defaults to `serve`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve,

    /// Process a single HTTP-trigger event and print the response event
    Invoke {
        /// Event JSON file, or `-` for stdin
        #[arg(short = 'e', long = "event", value_name = "FILE")]
        event: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    // Initialize crypto provider for TLS connections
    // This must be done before any TLS connections are attempted
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install default crypto provider"))?;

    let cli = Cli::parse();

    // The bucket is a startup precondition; a missing one stops the process here
    let config = if let Some(config_path) = cli.config {
        info!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(&config_path)?
    } else {
        ServerConfig::from_env()?
    };

    let app_state = AppState::new(config)
        .await
        .context("Failed to initialize storage client")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(app_state).await,
        Commands::Invoke { event } => invoke(app_state, &event).await,
    }
}

async fn serve(app_state: std::sync::Arc<AppState>) -> anyhow::Result<()> {
    let address = app_state.config.address();
    let socket_addr: SocketAddr = address
        .parse()
        .map_err(|e| anyhow!("Invalid server address '{}': {}", address, e))?;

    let app = routes::api::create_app(app_state);

    info!("Server listening on http://{}", socket_addr);

    let listener = TcpListener::bind(&socket_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn invoke(app_state: std::sync::Arc<AppState>, path: &Path) -> anyhow::Result<()> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read event from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?
    };

    let event: ProxyEvent = serde_json::from_str(&raw).context("Event is not valid JSON")?;
    let response = app_state.speak.handle_event(&event).await;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
