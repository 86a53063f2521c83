//! View data handed from the handlers to the HTML pages.

use chrono::{DateTime, Duration, Local};
use serde::Serialize;
use weather_core::{
    ComparisonResult, Reading, WeatherObservation,
    extract::{format_long_date, format_timestamp, local_time},
    model::NOT_AVAILABLE,
};

/// Bounds for the historical date picker on the home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub min_date: DateTime<Local>,
    pub max_date: DateTime<Local>,
}

impl HomeView {
    pub const HISTORY_DAYS: i64 = 5;

    pub fn new(now: DateTime<Local>) -> Self {
        Self { min_date: now - Duration::days(Self::HISTORY_DAYS), max_date: now }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub date: DateTime<Local>,
    pub city: String,
    pub description: String,
    pub temp: Reading,
    pub humidity: Reading,
    pub wind_speed: Reading,
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
    pub units_letter: &'static str,
}

impl ResultsView {
    /// Missing sunrise/sunset fall back to the Unix epoch, not "N/A".
    pub fn new(obs: WeatherObservation, units_letter: &'static str, now: DateTime<Local>) -> Self {
        Self {
            date: now,
            sunrise: local_time(obs.sunrise.unwrap_or(0)),
            sunset: local_time(obs.sunset.unwrap_or(0)),
            city: obs.name,
            description: obs.description,
            temp: obs.temperature,
            humidity: obs.humidity,
            wind_speed: obs.wind_speed,
            units_letter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityInfo {
    pub name: String,
    pub temp: Reading,
    pub humidity: Reading,
    pub wind_speed: Reading,
    /// Formatted local time, or "N/A" when the provider omitted it.
    pub sunset: String,
}

impl From<WeatherObservation> for CityInfo {
    fn from(obs: WeatherObservation) -> Self {
        Self {
            sunset: obs
                .sunset
                .map(|ts| format_timestamp(&local_time(ts)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            name: obs.name,
            temp: obs.temperature,
            humidity: obs.humidity,
            wind_speed: obs.wind_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub date: String,
    pub units_letter: &'static str,
    pub city1_info: CityInfo,
    pub city2_info: CityInfo,
    pub temp_diff: Reading,
}

impl ComparisonView {
    pub fn new(result: ComparisonResult, units_letter: &'static str, now: DateTime<Local>) -> Self {
        Self {
            date: format_long_date(&now),
            units_letter,
            city1_info: result.first.into(),
            city2_info: result.second.into(),
            temp_diff: result.temperature_delta,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorView {
    pub error: String,
}

pub fn render_home(view: &HomeView) -> String {
    let min = view.min_date.format("%Y-%m-%d");
    let max = view.max_date.format("%Y-%m-%d");

    let body = format!(
        r#"<h1>Weather</h1>
<section>
  <h2>Current conditions</h2>
  <form action="/results" method="get">
    <label>City <input type="text" name="city" required></label>
    {units}
    <button type="submit">Look up</button>
  </form>
</section>
<section>
  <h2>Compare two cities</h2>
  <form action="/comparison_results" method="get">
    <label>First city <input type="text" name="city1" required></label>
    <label>Second city <input type="text" name="city2" required></label>
    {units}
    <button type="submit">Compare</button>
  </form>
</section>
<section>
  <h2>Historical conditions</h2>
  <form>
    <label>From <input type="date" name="start_date" min="{min}" max="{max}"></label>
    <label>To <input type="date" name="end_date" min="{min}" max="{max}"></label>
    <button type="submit" disabled>Coming soon</button>
  </form>
</section>"#,
        units = UNITS_SELECT,
    );

    page("Weather", &body)
}

const UNITS_SELECT: &str = r#"<label>Units
      <select name="units">
        <option value="metric">Celsius</option>
        <option value="imperial">Fahrenheit</option>
        <option value="standard">Kelvin</option>
      </select>
    </label>"#;

pub fn render_results(view: &ResultsView) -> String {
    let u = view.units_letter;
    let body = format!(
        r#"<h1>Current weather in {city}</h1>
<p class="date">{date}</p>
<p class="description">{description}</p>
<ul>
  <li>Temperature: {temp} &deg;{u}</li>
  <li>Humidity: {humidity}%</li>
  <li>Wind speed: {wind}</li>
  <li>Sunrise: {sunrise}</li>
  <li>Sunset: {sunset}</li>
</ul>
<p><a href="/">Back</a></p>"#,
        city = escape(&view.city),
        date = format_timestamp(&view.date),
        description = escape(&view.description),
        temp = view.temp,
        humidity = view.humidity,
        wind = view.wind_speed,
        sunrise = format_timestamp(&view.sunrise),
        sunset = format_timestamp(&view.sunset),
    );

    page(&format!("Weather in {}", view.city), &body)
}

pub fn render_comparison(view: &ComparisonView) -> String {
    let body = format!(
        r#"<h1>{a} vs. {b}</h1>
<p class="date">{date}</p>
<table>
  <tr><th></th><th>{a}</th><th>{b}</th></tr>
  <tr><td>Temperature</td><td>{t1} &deg;{u}</td><td>{t2} &deg;{u}</td></tr>
  <tr><td>Humidity</td><td>{h1}%</td><td>{h2}%</td></tr>
  <tr><td>Wind speed</td><td>{w1}</td><td>{w2}</td></tr>
  <tr><td>Sunset</td><td>{s1}</td><td>{s2}</td></tr>
</table>
<p class="diff">Temperature difference: {diff} &deg;{u}</p>
<p><a href="/">Back</a></p>"#,
        a = escape(&view.city1_info.name),
        b = escape(&view.city2_info.name),
        date = escape(&view.date),
        u = view.units_letter,
        t1 = view.city1_info.temp,
        t2 = view.city2_info.temp,
        h1 = view.city1_info.humidity,
        h2 = view.city2_info.humidity,
        w1 = view.city1_info.wind_speed,
        w2 = view.city2_info.wind_speed,
        s1 = escape(&view.city1_info.sunset),
        s2 = escape(&view.city2_info.sunset),
        diff = view.temp_diff,
    );

    page("Weather comparison", &body)
}

pub fn render_error(view: &ErrorView) -> String {
    let body = format!(
        r#"<h1>Something went wrong</h1>
<p class="error">{}</p>
<p><a href="/">Back</a></p>"#,
        escape(&view.error)
    );

    page("Error", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).single().expect("valid date")
    }

    fn observation() -> WeatherObservation {
        WeatherObservation {
            name: "Paris".into(),
            description: "clear sky".into(),
            temperature: Reading::Value(15.0),
            humidity: Reading::Value(60.0),
            wind_speed: Reading::Value(3.0),
            sunrise: Some(1700000000),
            sunset: None,
        }
    }

    #[test]
    fn home_range_spans_five_days() {
        let view = HomeView::new(now());
        assert_eq!(view.max_date, now());
        assert_eq!(view.max_date - view.min_date, Duration::days(5));

        let html = render_home(&view);
        assert!(html.contains(r#"min="2005-12-28""#));
        assert!(html.contains(r#"max="2006-01-02""#));
        assert!(html.contains(r#"action="/comparison_results""#));
    }

    #[test]
    fn results_view_falls_back_to_epoch_for_missing_sun_times() {
        let view = ResultsView::new(observation(), "C", now());
        assert_eq!(view.sunrise, local_time(1700000000));
        assert_eq!(view.sunset.timestamp(), 0);
    }

    #[test]
    fn city_info_falls_back_to_placeholder_for_missing_sunset() {
        let info = CityInfo::from(observation());
        assert_eq!(info.sunset, "N/A");

        let mut obs = observation();
        obs.sunset = Some(1700040000);
        let info = CityInfo::from(obs);
        assert_eq!(info.sunset, format_timestamp(&local_time(1700040000)));
    }

    #[test]
    fn rendered_pages_escape_provider_text() {
        let mut obs = observation();
        obs.name = "<script>alert(1)</script>".into();

        let html = render_results(&ResultsView::new(obs, "C", now()));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));

        let html = render_error(&ErrorView { error: "a & b".into() });
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn results_page_shows_values_and_units() {
        let html = render_results(&ResultsView::new(observation(), "C", now()));
        assert!(html.contains("Temperature: 15 &deg;C"));
        assert!(html.contains("Humidity: 60%"));
        assert!(html.contains("clear sky"));
    }

    #[test]
    fn comparison_view_serializes_placeholders_as_text() {
        let mut second = observation();
        second.temperature = Reading::Value(5.0);
        second.sunset = Some(1700040000);
        let result = weather_core::compare(observation(), second);

        let json = serde_json::to_value(ComparisonView::new(result, "C", now()))
            .expect("serializable");

        assert_eq!(json["date"], "Monday, January 02, 2006");
        assert_eq!(json["units_letter"], "C");
        assert_eq!(json["temp_diff"], 10.0);
        assert_eq!(json["city1_info"]["sunset"], "N/A");
        assert_eq!(json["city1_info"]["humidity"], 60.0);
        assert_eq!(json["city2_info"]["temp"], 5.0);
    }

    #[test]
    fn results_and_home_views_serialize() {
        let mut obs = observation();
        obs.humidity = Reading::NotAvailable;
        let json = serde_json::to_value(ResultsView::new(obs, "F", now())).expect("serializable");

        assert_eq!(json["city"], "Paris");
        assert_eq!(json["temp"], 15.0);
        assert_eq!(json["humidity"], "N/A");
        assert_eq!(json["units_letter"], "F");
        assert!(json["sunset"].is_string());

        let json = serde_json::to_value(HomeView::new(now())).expect("serializable");
        assert!(json["min_date"].as_str().is_some_and(|d| d.starts_with("2005-12-28")));
        assert!(json["max_date"].as_str().is_some_and(|d| d.starts_with("2006-01-02")));
    }

    #[test]
    fn error_view_serializes_message() {
        let json = serde_json::to_value(ErrorView { error: "city not found".into() })
            .expect("serializable");
        assert_eq!(json, serde_json::json!({"error": "city not found"}));
    }
}
