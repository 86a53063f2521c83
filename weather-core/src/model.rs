use std::fmt;

use serde::{Serialize, Serializer};

/// Placeholder shown wherever the provider left a value out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Measurement system requested from the provider.
///
/// Anything other than `metric` or `imperial` is kept verbatim and forwarded
/// as-is; the provider treats unknown tokens as its default (Kelvin).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
    Other(String),
}

impl Units {
    pub fn as_str(&self) -> &str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Other(raw) => raw.as_str(),
        }
    }

    /// Single-letter label shown next to temperatures.
    pub fn letter(&self) -> &'static str {
        match self {
            Units::Imperial => "F",
            Units::Metric => "C",
            Units::Other(_) => "K",
        }
    }
}

impl From<&str> for Units {
    fn from(value: &str) -> Self {
        match value {
            "metric" => Units::Metric,
            "imperial" => Units::Imperial,
            other => Units::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shorthand letter for a raw `units` query value.
pub fn units_letter(units: &str) -> &'static str {
    Units::from(units).letter()
}

/// A validated single-city lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub city: String,
    pub units: Units,
}

impl LookupRequest {
    /// Returns `None` when either part is missing or empty.
    pub fn new(city: Option<String>, units: Option<String>) -> Option<Self> {
        let city = city.filter(|c| !c.is_empty())?;
        let units = units.filter(|u| !u.is_empty())?;

        Some(Self { city, units: Units::from(units.as_str()) })
    }
}

/// A numeric field that may be missing from the provider response.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Reading {
    Value(f64),
    #[default]
    NotAvailable,
}

impl Reading {
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(*v),
            Reading::NotAvailable => None,
        }
    }

    /// Absolute difference, known only when both sides are.
    pub fn abs_diff(&self, other: &Reading) -> Reading {
        match (self.value(), other.value()) {
            (Some(a), Some(b)) => Reading::Value((a - b).abs()),
            _ => Reading::NotAvailable,
        }
    }
}

impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Reading::NotAvailable, Reading::Value)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Value(v) => write!(f, "{v}"),
            Reading::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Value(v) => serializer.serialize_f64(*v),
            Reading::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Current conditions for one city, with defaults already substituted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherObservation {
    pub name: String,
    pub description: String,
    pub temperature: Reading,
    pub humidity: Reading,
    pub wind_speed: Reading,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub first: WeatherObservation,
    pub second: WeatherObservation,
    pub temperature_delta: Reading,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_letter_matches_known_systems() {
        assert_eq!(units_letter("imperial"), "F");
        assert_eq!(units_letter("metric"), "C");
        assert_eq!(units_letter("standard"), "K");
        assert_eq!(units_letter(""), "K");
        assert_eq!(units_letter("Metric"), "K");
    }

    #[test]
    fn unknown_units_pass_through_unchanged() {
        let units = Units::from("kelvinish");
        assert_eq!(units.as_str(), "kelvinish");
        assert_eq!(units.letter(), "K");
    }

    #[test]
    fn lookup_request_requires_city_and_units() {
        assert!(LookupRequest::new(None, Some("metric".into())).is_none());
        assert!(LookupRequest::new(Some("Paris".into()), None).is_none());
        assert!(LookupRequest::new(Some(String::new()), Some("metric".into())).is_none());
        assert!(LookupRequest::new(Some("Paris".into()), Some(String::new())).is_none());

        let req = LookupRequest::new(Some("Paris".into()), Some("metric".into()))
            .expect("both parts present");
        assert_eq!(req.city, "Paris");
        assert_eq!(req.units, Units::Metric);
    }

    #[test]
    fn reading_displays_number_or_placeholder() {
        assert_eq!(Reading::Value(15.0).to_string(), "15");
        assert_eq!(Reading::Value(3.5).to_string(), "3.5");
        assert_eq!(Reading::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn reading_serializes_as_number_or_string() {
        let json = serde_json::to_value([Reading::Value(60.0), Reading::NotAvailable])
            .expect("serializable");
        assert_eq!(json, serde_json::json!([60.0, "N/A"]));
    }

    #[test]
    fn abs_diff_needs_both_values() {
        assert_eq!(Reading::Value(70.0).abs_diff(&Reading::Value(40.0)), Reading::Value(30.0));
        assert_eq!(Reading::Value(40.0).abs_diff(&Reading::Value(70.0)), Reading::Value(30.0));
        assert_eq!(Reading::Value(40.0).abs_diff(&Reading::NotAvailable), Reading::NotAvailable);
        assert_eq!(Reading::NotAvailable.abs_diff(&Reading::Value(1.0)), Reading::NotAvailable);
    }
}
