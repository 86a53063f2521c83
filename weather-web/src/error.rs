//! Failures a handler turns into the error page.

use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use weather_core::FetchError;

use crate::view::{ErrorView, render_error};

pub const INPUT_MISSING_MESSAGE: &str = "Please provide a valid city and unit.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("city or units missing from request")]
    InputMissing,

    #[error(transparent)]
    ProviderFetchFailed(#[from] FetchError),

    /// One side of a two-city comparison could not be fetched.
    #[error("fetch for '{city}' failed: {source}")]
    PartialComparisonFailure {
        city: String,
        #[source]
        source: FetchError,
    },
}

impl AppError {
    /// Text shown on the error page.
    pub fn user_message(&self) -> String {
        match self {
            Self::InputMissing => INPUT_MISSING_MESSAGE.to_string(),
            Self::ProviderFetchFailed(e) => e.user_message(),
            Self::PartialComparisonFailure { city, source } => {
                format!("Could not get weather for '{city}': {}", source.user_message())
            }
        }
    }

    pub fn view(&self) -> ErrorView {
        ErrorView { error: self.user_message() }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "request failed");
        // Errors render as a normal page, so the status stays 200.
        Html(render_error(&self.view())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_missing_has_fixed_message() {
        assert_eq!(AppError::InputMissing.user_message(), "Please provide a valid city and unit.");
    }

    #[test]
    fn partial_failure_names_city() {
        let err = AppError::PartialComparisonFailure {
            city: "Oslo".into(),
            source: FetchError::Provider { status: 404, message: "city not found".into() },
        };

        let msg = err.user_message();
        assert!(msg.contains("Oslo"));
        assert!(msg.contains("city not found"));
    }

    #[test]
    fn provider_failure_passes_message_through() {
        let err: AppError =
            FetchError::Provider { status: 401, message: "Invalid API key".into() }.into();
        assert_eq!(err.user_message(), "Invalid API key");
    }
}
