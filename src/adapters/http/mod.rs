//! HTTP adapter exposing the weather REST API.

pub mod weather_http;

pub use weather_http::{router, ApiError, ErrorResponse, WeatherHttpConfig, WeatherHttpServer};
