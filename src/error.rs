//! Error types for the geocoding and routing clients

use thiserror::Error;

/// Main error type for the `geolocate` clients
#[derive(Error, Debug)]
pub enum GeoError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Transport failures: connect, TLS, timeout
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// Body could not be decoded into the expected JSON shape
    #[error("Parse error ({provider}): {message}")]
    Parse { provider: String, message: String },

    /// Body decoded but lacks a field the operation needs
    #[error("Unexpected response ({provider}): {message}")]
    UnexpectedResponse { provider: String, message: String },
}

impl GeoError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new parse error for a provider
    pub fn parse<P: Into<String>, S: Into<String>>(provider: P, message: S) -> Self {
        Self::Parse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a new unexpected-response error for a provider
    pub fn unexpected<P: Into<String>, S: Into<String>>(provider: P, message: S) -> Self {
        Self::UnexpectedResponse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            GeoError::Config { message } => format!(
                "Configuration error: {message}. Please check your config file and API keys."
            ),
            GeoError::Network { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            GeoError::Parse { provider, .. } | GeoError::UnexpectedResponse { provider, .. } => {
                format!("{provider} returned data in an unexpected format.")
            }
        }
    }
}
