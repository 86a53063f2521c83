use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, trace};

use crate::{
    Config, Units,
    error::{FetchError, GENERIC_FETCH_ERROR},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self { api_key, base_url, http })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_key()?.to_owned(),
            config.base_url.clone(),
            config.request_timeout(),
        )
    }

    #[instrument(skip(self, units), level = "debug", fields(units = %units))]
    async fn fetch_current(
        &self,
        city: &str,
        units: &Units,
    ) -> Result<CurrentWeatherPayload, FetchError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("units", units.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "OpenWeather responded");

        if status != StatusCode::OK {
            return Err(FetchError::Provider {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: CurrentWeatherPayload = serde_json::from_str(&body)
            .map_err(|e| FetchError::Decode(format!("{e}: {}", truncate_body(&body))))?;
        trace!(payload = ?parsed, "decoded current weather");

        Ok(parsed)
    }
}

/// Body of a current-weather response. Every field is optional and a field
/// of the wrong JSON type reads as absent; gaps are filled in by extraction.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrentWeatherPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub weather: Option<Vec<OwCondition>>,
    #[serde(default, deserialize_with = "lenient")]
    pub main: Option<OwMain>,
    #[serde(default, deserialize_with = "lenient")]
    pub wind: Option<OwWind>,
    #[serde(default, deserialize_with = "lenient")]
    pub sys: Option<OwSys>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwCondition {
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwMain {
    #[serde(default, deserialize_with = "lenient_number")]
    pub temp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwWind {
    #[serde(default, deserialize_with = "lenient_number")]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OwSys {
    #[serde(default, deserialize_with = "lenient_epoch")]
    pub sunrise: Option<i64>,
    #[serde(default, deserialize_with = "lenient_epoch")]
    pub sunset: Option<i64>,
}

/// Any value that does not fit `T` becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Numbers, or strings holding a number.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Unix seconds; fractional values are truncated.
fn lenient_epoch<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?
        .filter(|v| v.is_finite() && v.abs() < i64::MAX as f64)
        .map(|v| v.trunc() as i64))
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        city: &str,
        units: &Units,
    ) -> Result<CurrentWeatherPayload, FetchError> {
        self.fetch_current(city, units).await
    }
}

/// `message` from an error body, or the generic fallback.
fn error_message(body: &str) -> String {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
