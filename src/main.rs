mod constants;
mod database;
mod http;
mod models;
mod services;
mod store;
mod utils;

use std::net::SocketAddr;

use chrono_tz::Tz;
use tracing::{error, info, warn};

use crate::{
    constants::{DEFAULT_BIND_ADDR, DEFAULT_MAX_CONNECTIONS, DEFAULT_TIMEZONE, LOG_DIRECTIVE},
    database::Database,
    http::{AppState, router},
    store::{ContactStore, MemoryStore},
    utils::timezone::parse_timezone,
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    initialize_logging();

    let config = match load_configuration(|key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match &config.database_url {
        Some(database_url) => {
            let db = match Database::new(database_url, config.max_connections).await {
                Ok(db) => db,
                Err(e) => {
                    error!("Failed to connect to database: {}", e);
                    std::process::exit(1);
                }
            };
            serve(db, &config).await
        }
        None => {
            warn!("DATABASE_URL not set, contacts are kept in memory and lost on exit");
            serve(MemoryStore::new(), &config).await
        }
    };

    if let Err(e) = result {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Configuration loaded from environment variables
#[derive(Debug)]
struct Config {
    database_url: Option<String>,
    bind_addr: SocketAddr,
    max_connections: u32,
    timezone: Tz,
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

/// Load configuration through `lookup` (the process environment in production)
fn load_configuration(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config, Box<dyn std::error::Error>> {
    let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

    let bind_addr = lookup("BIND_ADDR")
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
        .parse::<SocketAddr>()
        .map_err(|e| format!("BIND_ADDR is not a valid socket address: {}", e))?;

    let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
        Some(value) => value
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                format!(
                    "DATABASE_MAX_CONNECTIONS must be a positive integer, got '{}'",
                    value
                )
            })?,
        None => DEFAULT_MAX_CONNECTIONS,
    };

    let timezone = parse_timezone(
        &lookup("TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
    )?;

    Ok(Config {
        database_url,
        bind_addr,
        max_connections,
        timezone,
    })
}

/// Serve the HTTP API on top of `store` until Ctrl+C
async fn serve<S: ContactStore>(
    store: S,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(AppState::new(store, config.timezone));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {} (timezone {})", config.bind_addr, config.timezone);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = load_configuration(lookup_from(&[])).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.timezone, Tz::UTC);
    }

    #[test]
    fn test_explicit_values() {
        let config = load_configuration(lookup_from(&[
            ("DATABASE_URL", "postgres://user:pw@localhost/contacts"),
            ("BIND_ADDR", "0.0.0.0:9000"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("TIMEZONE", "Europe/Kyiv"),
        ]))
        .unwrap();

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://user:pw@localhost/contacts")
        );
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.timezone, chrono_tz::Europe::Kyiv);
    }

    #[test]
    fn test_blank_database_url_means_memory() {
        let config = load_configuration(lookup_from(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(load_configuration(lookup_from(&[("BIND_ADDR", "localhost")])).is_err());
        assert!(load_configuration(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "0")])).is_err());
        assert!(load_configuration(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "many")])).is_err());
        assert!(load_configuration(lookup_from(&[("TIMEZONE", "Mars/Olympus")])).is_err());
    }
}
