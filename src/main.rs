//! Weather cache server entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use weather_cache::adapters::cache::MokaCacheStore;
use weather_cache::adapters::http::{WeatherHttpConfig, WeatherHttpServer};
use weather_cache::adapters::sqlite::{initialize_database, PoolConfig, SqliteCityTemperatureRepository};
use weather_cache::infrastructure::logging::LoggerImpl;
use weather_cache::{CacheSettings, CityTemperatureService, Config, ConfigLoader};

#[derive(Parser, Debug)]
#[command(name = "weather-cache")]
#[command(about = "City temperature service with a read-through cache", version)]
struct Args {
    /// Path to a YAML config file (defaults to weather-cache.yaml in the working directory)
    #[arg(long, short, env = "WEATHER_CACHE_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Path to SQLite database file
    #[arg(long)]
    database: Option<String>,
}

impl Args {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };

        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(database) = &self.database {
            config.database.path.clone_from(database);
        }

        ConfigLoader::validate(&config)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;
    let _logger = LoggerImpl::init(&config.logging)?;

    info!(database = %config.database.path, "opening database");
    let pool_config = PoolConfig::default().with_max_connections(config.database.max_connections);
    let pool = initialize_database(&config.database.url(), Some(pool_config))
        .await
        .context("Failed to initialize database")?;

    let settings = CacheSettings::from(&config.cache);
    info!(
        ttl_secs = settings.ttl.as_secs(),
        list_invalidation = ?settings.list_invalidation,
        "cache configured"
    );

    let service = CityTemperatureService::new(
        Arc::new(SqliteCityTemperatureRepository::new(pool.clone())),
        Arc::new(MokaCacheStore::new()),
        settings,
    );

    let server = WeatherHttpServer::new(service, WeatherHttpConfig::from(&config.server));
    server
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    pool.close().await;
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
