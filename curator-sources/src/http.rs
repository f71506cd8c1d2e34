//! Shared HTTP client for source requests.
//!
//! Every source goes through [`build_client`] so that all outbound
//! requests carry the same identifying User-Agent and timeout.

use std::time::Duration;

use crate::config::SourcesConfig;
use crate::error::SourceError;

/// Build a [`reqwest::Client`] configured for source fetching.
///
/// # Errors
///
/// Returns [`SourceError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SourcesConfig) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.as_str())
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SourceError::Http(format!("failed to build HTTP client: {e}")))
}

/// GET `url` and return the body as text.
///
/// Non-2xx statuses are errors. `source` only labels the error messages.
pub async fn get_text(
    client: &reqwest::Client,
    url: &str,
    source: &str,
) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SourceError::Http(format!("{source} request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SourceError::Http(format!("{source} HTTP error: {e}")))?;

    let body = response
        .text()
        .await
        .map_err(|e| SourceError::Http(format!("{source} response read failed: {e}")))?;

    tracing::trace!(source, bytes = body.len(), "response received");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_client_with_default_config() {
        assert!(build_client(&SourcesConfig::default()).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = SourcesConfig {
            user_agent: "CustomBot/1.0".into(),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_http_error() {
        let config = SourcesConfig {
            timeout_seconds: 2,
            ..Default::default()
        };
        let client = build_client(&config).expect("client");
        let err = get_text(&client, "http://127.0.0.1:9/", "test")
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Http(_)));
        assert!(err.to_string().contains("test request failed"));
    }
}
