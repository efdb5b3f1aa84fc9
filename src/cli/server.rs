//! Server mode CLI logic
//!
//! Contains the core logic for running the config endpoint.

use crate::{
    Settings,
    config::{ConfigLoader, Overrides},
    server::app,
    utils::version,
};
use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Arguments for server mode
#[derive(Debug)]
pub struct ServerArgs {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Load settings for server mode and apply the CLI overrides
///
/// Precedence: CLI arguments > environment variables > configuration file
/// (from --config, CWEB_CONFIG or the default location) > defaults. Invalid
/// settings fall back to defaults plus the CLI arguments.
pub fn resolve_settings(args: &ServerArgs) -> Settings {
    let overrides = Overrides {
        host: args.host.clone(),
        port: args.port,
        verbose: args.verbose,
        ..Overrides::default()
    };

    ConfigLoader::new(args.config.as_deref())
        .load(&overrides)
        .unwrap_or_else(|e| {
            // Logging is not initialized yet
            eprintln!(
                "Warning: Failed to load configuration: {}. Using defaults.",
                e
            );
            ConfigLoader::fallback(&overrides)
        })
}

/// Run server mode with the given arguments
pub async fn run_server_mode(args: ServerArgs) -> Result<()> {
    let settings = resolve_settings(&args);

    // --verbose > RUST_LOG > logging.level
    let env_filter = if settings.logging.verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(settings.logging.level_or("info"))
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    tracing::info!("Starting config server v{}", version::get_version());

    if settings.access.is_empty() {
        tracing::warn!("No [[access]] grants configured; every update will be rejected with 401");
    }

    let app = app::create_app(settings.clone());

    let addr = parse_and_bind_address(&settings.server.host, settings.server.port).await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Config server v{} listening on {}",
        version::get_version(),
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Parse host string and attempt to bind to the address
///
/// `::` falls back to `0.0.0.0` when IPv6 is unavailable.
pub async fn parse_and_bind_address(host: &str, port: u16) -> Result<std::net::SocketAddr> {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

    if host != "::"
        && let Ok(ip) = host.parse::<IpAddr>()
    {
        let addr = SocketAddr::new(ip, port);
        tracing::debug!("Parsed address: {}", addr);
        return Ok(addr);
    }

    match host {
        "::" => {
            let addr = SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), port);

            match tokio::net::TcpListener::bind(addr).await {
                Ok(_) => {
                    tracing::debug!("IPv6 available, using {}", addr);
                    Ok(addr)
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not listen on [::]:{} (Caused by {}), falling back to 0.0.0.0",
                        port,
                        e
                    );
                    Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port))
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Invalid host address: {}. Use an IP address, '::' or '0.0.0.0'",
                host
            );
        }
    }
}
