use clap::{Parser, Subcommand};
use doctalk_chat::{ChatOrchestrator, HttpInferenceClient, InferenceConfig};
use doctalk_extract::PdfTextExtractor;
use doctalk_gateway::GatewayServer;
use doctalk_session::{DocumentCache, MemorySessionStore};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doctalk", about = "doctalk — chat with your documents")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "doctalk.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[derive(Deserialize)]
struct DoctalkConfig {
    inference: InferenceConfig,
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    upload: UploadConfig,
}

#[derive(Deserialize)]
struct ServerConfig {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Deserialize)]
struct UploadConfig {
    #[serde(default = "default_max_upload_bytes")]
    max_upload_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3000
}
fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

/// Applies the `DOCTALK_INFERENCE_URL` override on top of the file config.
fn apply_inference_override(config: &mut DoctalkConfig, env_url: Option<String>) {
    if let Some(url) = env_url {
        config.inference.endpoint_url = url;
    }
}

/// Bind address for `serve`. Explicit flags beat the config file.
fn bind_addr(server: &ServerConfig, host: Option<String>, port: Option<u16>) -> String {
    let host = host.unwrap_or_else(|| server.host.clone());
    let port = port.unwrap_or(server.port);
    format!("{}:{}", host, port)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let cli = Cli::parse();

    // Load config
    let config_str = tokio::fs::read_to_string(&cli.config).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to read config file '{}': {}",
            cli.config.display(),
            e
        )
    })?;
    let mut config: DoctalkConfig = toml::from_str(&config_str)?;

    // The inference endpoint is the one env-overridable setting
    apply_inference_override(&mut config, std::env::var("DOCTALK_INFERENCE_URL").ok());

    match cli.command {
        Commands::Serve { host, port } => {
            let addr = bind_addr(&config.server, host, port);

            info!(
                endpoint = %config.inference.endpoint_url,
                timeout_secs = config.inference.timeout_secs,
                "Using inference endpoint"
            );

            let inference = Arc::new(HttpInferenceClient::new(config.inference)?);
            let extractor = Arc::new(PdfTextExtractor::new());
            let cache = Arc::new(DocumentCache::new());
            let sessions = Arc::new(MemorySessionStore::new());
            let orchestrator = Arc::new(ChatOrchestrator::new(inference, extractor, cache));

            let app = GatewayServer::build(orchestrator, sessions, config.upload.max_upload_bytes);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("doctalk gateway listening on {}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
