//! Weather HTTP server.
//!
//! Maps the REST surface onto `CityTemperatureService` calls:
//! - `POST /api/weather` upserts a record (201)
//! - `GET /api/weather` lists all records
//! - `GET /api/weather/{city}` returns one record or 404
//! - `PUT /api/weather/{city}` replaces the temperature of an existing city
//! - `DELETE /api/weather/{city}` removes a city (204)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::errors::DomainError;
use crate::domain::models::{CityTemperature, ServerConfig, TemperatureUpdate};
use crate::services::CityTemperatureService;

/// Configuration for the weather HTTP server.
#[derive(Debug, Clone)]
pub struct WeatherHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
}

impl Default for WeatherHttpConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for WeatherHttpConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            enable_cors: config.enable_cors,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Domain error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            DomainError::CityNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            DomainError::ValidationFailed(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            DomainError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            DomainError::CacheError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CACHE_ERROR"),
            DomainError::SerializationError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = ErrorResponse {
            error: self.0.to_string(),
            code: code.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the router over a shared service.
pub fn router(service: CityTemperatureService, enable_cors: bool) -> Router {
    let app = Router::new()
        .route("/api/weather", get(list_temperatures).post(create_or_update_temperature))
        .route(
            "/api/weather/{city}",
            get(get_temperature).put(update_temperature).delete(delete_temperature),
        )
        .route("/health", get(health_check))
        .with_state(service);

    if enable_cors {
        app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}

/// Weather HTTP Server.
pub struct WeatherHttpServer {
    config: WeatherHttpConfig,
    service: CityTemperatureService,
}

impl WeatherHttpServer {
    pub fn new(service: CityTemperatureService, config: WeatherHttpConfig) -> Self {
        Self { config, service }
    }

    fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.config.host, self.config.port).parse()
    }

    /// Start the server.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.serve_with_shutdown(std::future::pending()).await
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = router(self.service, self.config.enable_cors);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Weather HTTP server listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn create_or_update_temperature(
    State(service): State<CityTemperatureService>,
    Json(record): Json<CityTemperature>,
) -> Result<(StatusCode, Json<CityTemperature>), ApiError> {
    let saved = service.save_or_update(record).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_temperature(
    State(service): State<CityTemperatureService>,
    Path(city): Path<String>,
    Json(update): Json<TemperatureUpdate>,
) -> Result<Json<CityTemperature>, ApiError> {
    let saved = service.update_temperature(&city, update.temperature).await?;
    Ok(Json(saved))
}

async fn list_temperatures(
    State(service): State<CityTemperatureService>,
) -> Result<Json<Vec<CityTemperature>>, ApiError> {
    Ok(Json(service.get_all().await?))
}

async fn get_temperature(
    State(service): State<CityTemperatureService>,
    Path(city): Path<String>,
) -> Result<Json<CityTemperature>, ApiError> {
    match service.get_by_city(&city).await? {
        Some(record) => Ok(Json(record)),
        None => Err(DomainError::CityNotFound(city).into()),
    }
}

async fn delete_temperature(
    State(service): State<CityTemperatureService>,
    Path(city): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete(&city).await?;
    Ok(StatusCode::NO_CONTENT)
}
