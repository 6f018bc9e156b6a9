//! Shared `reqwest` client construction

use crate::config::HttpConfig;
use crate::Result;
use reqwest::Client;
use std::time::Duration;

/// Build the HTTP client every provider client uses.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());

    if let Some(seconds) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds.into()));
    }

    Ok(builder.build()?)
}

/// Join a configured base URL and an endpoint path without doubling slashes.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
