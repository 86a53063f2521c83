//! Turning a provider payload into display-ready values.
//!
//! Every field is extracted independently: a gap anywhere in the payload only
//! ever affects the field it belongs to.

use chrono::{DateTime, Local};

use crate::model::{ComparisonResult, WeatherObservation};
use crate::provider::CurrentWeatherPayload;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available";

pub fn extract_observation(payload: &CurrentWeatherPayload) -> WeatherObservation {
    let main = payload.main.as_ref();
    let sys = payload.sys.as_ref();

    WeatherObservation {
        name: payload.name.clone().unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        description: payload
            .weather
            .as_ref()
            .and_then(|w| w.first())
            .and_then(|w| w.description.clone())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        temperature: main.and_then(|m| m.temp).into(),
        humidity: main.and_then(|m| m.humidity).into(),
        wind_speed: payload.wind.as_ref().and_then(|w| w.speed).into(),
        sunrise: sys.and_then(|s| s.sunrise),
        sunset: sys.and_then(|s| s.sunset),
    }
}

pub fn compare(first: WeatherObservation, second: WeatherObservation) -> ComparisonResult {
    let temperature_delta = first.temperature.abs_diff(&second.temperature);
    ComparisonResult { first, second, temperature_delta }
}

/// Local time for a Unix timestamp; out-of-range values clamp to the epoch.
pub fn local_time(epoch_secs: i64) -> DateTime<Local> {
    DateTime::from_timestamp(epoch_secs, 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .with_timezone(&Local)
}

/// `2023-11-14 22:13:20`
pub fn format_timestamp(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `Monday, January 02, 2006`
pub fn format_long_date(dt: &DateTime<Local>) -> String {
    dt.format("%A, %B %d, %Y").to_string()
}
