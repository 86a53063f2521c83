//! Core library for the `weather-web` app.
//!
//! This crate defines:
//! - Configuration (API key, provider endpoint, server address)
//! - The OpenWeather client behind the `WeatherProvider` trait
//! - Domain models and field extraction with per-field defaults
//!
//! It is used by `weather-web`, but has no dependency on any HTTP server.

pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::FetchError;
pub use extract::{compare, extract_observation};
pub use model::{
    ComparisonResult, LookupRequest, Reading, Units, WeatherObservation, units_letter,
};
pub use provider::{CurrentWeatherPayload, OpenWeatherProvider, WeatherProvider};
