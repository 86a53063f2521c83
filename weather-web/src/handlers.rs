//! Route handlers.
//!
//! Each route is a thin axum wrapper around a function that takes the
//! provider and the current time, so the same inputs always produce the
//! same view data.

use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::{DateTime, Local};
use tracing::{debug, instrument};
use weather_core::{
    LookupRequest, Units, WeatherProvider, compare as compare_observations, extract_observation,
};

use crate::{
    error::AppError,
    server::AppState,
    view::{
        ComparisonView, HomeView, ResultsView, render_comparison, render_home, render_results,
    },
};

/// Raw query pairs. Repeated keys are allowed and the first value wins.
pub type QueryPairs = Vec<(String, String)>;

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

#[derive(Debug, Default)]
pub struct ResultsQuery {
    pub city: Option<String>,
    pub units: Option<String>,
}

impl ResultsQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self { city: first_value(pairs, "city"), units: first_value(pairs, "units") }
    }
}

/// Comparison parameters are not validated; missing ones become empty strings.
#[derive(Debug, Default)]
pub struct ComparisonQuery {
    pub city1: String,
    pub city2: String,
    pub units: String,
}

impl ComparisonQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let get = |key: &str| first_value(pairs, key).unwrap_or_default();
        Self { city1: get("city1"), city2: get("city2"), units: get("units") }
    }
}

/// GET / - forms for current and comparison lookups
pub async fn home() -> Html<String> {
    Html(render_home(&HomeView::new(Local::now())))
}

/// GET /results - current conditions for one city
pub async fn results(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Html<String>, AppError> {
    let query = ResultsQuery::from_pairs(&pairs);
    let view = lookup(state.provider.as_ref(), query, Local::now()).await?;
    Ok(Html(render_results(&view)))
}

/// GET /comparison_results - side-by-side conditions for two cities
pub async fn comparison_results(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Html<String>, AppError> {
    let query = ComparisonQuery::from_pairs(&pairs);
    let view = compare(state.provider.as_ref(), query, Local::now()).await?;
    Ok(Html(render_comparison(&view)))
}

#[instrument(skip(provider, now))]
pub async fn lookup(
    provider: &dyn WeatherProvider,
    query: ResultsQuery,
    now: DateTime<Local>,
) -> Result<ResultsView, AppError> {
    let request = LookupRequest::new(query.city, query.units).ok_or(AppError::InputMissing)?;

    let payload = provider.current_weather(&request.city, &request.units).await?;
    let observation = extract_observation(&payload);
    debug!(?observation, "extracted observation");

    Ok(ResultsView::new(observation, request.units.letter(), now))
}

#[instrument(skip(provider, now))]
pub async fn compare(
    provider: &dyn WeatherProvider,
    query: ComparisonQuery,
    now: DateTime<Local>,
) -> Result<ComparisonView, AppError> {
    let units = Units::from(query.units.as_str());

    let (first, second) = tokio::join!(
        provider.current_weather(&query.city1, &units),
        provider.current_weather(&query.city2, &units),
    );

    // city1 wins when both fail.
    let first = first.map_err(|source| AppError::PartialComparisonFailure {
        city: query.city1.clone(),
        source,
    })?;
    let second = second.map_err(|source| AppError::PartialComparisonFailure {
        city: query.city2.clone(),
        source,
    })?;

    let result = compare_observations(extract_observation(&first), extract_observation(&second));
    debug!(delta = %result.temperature_delta, "compared cities");

    Ok(ComparisonView::new(result, units.letter(), now))
}
