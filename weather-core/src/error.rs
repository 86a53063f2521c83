//! Errors raised while talking to the weather provider.

use thiserror::Error;

/// Shown when the provider fails without explaining why.
pub const GENERIC_FETCH_ERROR: &str = "An error occurred while fetching data.";

#[derive(Error, Debug)]
pub enum FetchError {
    /// The provider answered with a non-success status.
    #[error("provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("could not reach weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode provider response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Message suitable for the error page.
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider { message, .. } => message.clone(),
            Self::Transport(e) if e.is_timeout() => {
                "The weather service took too long to respond.".to_string()
            }
            Self::Transport(_) => "Could not reach the weather service.".to_string(),
            Self::Decode(_) => GENERIC_FETCH_ERROR.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_is_shown_verbatim() {
        let err = FetchError::Provider { status: 404, message: "city not found".into() };
        assert_eq!(err.user_message(), "city not found");
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn decode_errors_fall_back_to_generic_message() {
        let err = FetchError::Decode("expected value".into());
        assert_eq!(err.user_message(), GENERIC_FETCH_ERROR);
    }
}
