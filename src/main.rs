use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use canto_bridge::{
    cache::CacheStore,
    canto::{AssetNormalizer, CantoApi, CantoClient},
    config::Config,
    services::AssetResolver,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "canto-bridge")]
#[command(version)]
#[command(about = "HTTP bridge backing an admin-form asset field against a Canto DAM tenant")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with the specified level
    let log_filter = format!("canto_bridge={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting canto-bridge v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from the specified file
    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    if config.canto.is_configured() {
        info!(
            "Canto tenant: {}.{}",
            config.canto.domain, config.canto.api_host
        );
    } else {
        for error in config.canto.config_errors() {
            warn!("{}", error);
        }
        warn!("Asset endpoints will answer 503 until Canto is configured");
    }

    let ttl = config.cache.ttl_duration()?;
    info!("Resolution cache TTL: {}", humantime::format_duration(ttl));

    let client = Arc::new(CantoClient::new(config.canto.clone())?);
    let api: Arc<dyn CantoApi> = client;
    let normalizer = AssetNormalizer::new(&config.canto, &config.web.base_url);
    let resolver = Arc::new(AssetResolver::new(
        api.clone(),
        normalizer,
        CacheStore::new(ttl),
    ));

    let web_server = WebServer::new(config, api, resolver)?;
    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );

    web_server.serve().await
}
