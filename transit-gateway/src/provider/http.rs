//! HTTP GET + JSON body helper shared by both provider clients.

use std::time::Duration;

use serde_json::Value;

use super::error::TransportError;
use super::params::QueryParams;

/// How much of an unexpected response body to keep for diagnostics.
const BODY_PREVIEW_CHARS: usize = 500;

/// Build the long-lived HTTP client a provider client reuses for every call.
pub fn build_http(timeout: Duration) -> Result<reqwest::Client, TransportError> {
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("transit-gateway/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(http)
}

/// Issue one GET against `url` and decode the body as JSON.
///
/// `fixed` holds the parameters attached to every call (credential, format);
/// `params` holds the per-call ones. Errors never carry the request URL,
/// since the credential travels in the query string.
pub async fn get_json(
    http: &reqwest::Client,
    url: &str,
    fixed: &[(&str, &str)],
    params: &QueryParams,
) -> Result<Value, TransportError> {
    let response = http
        .get(url)
        .query(fixed)
        .query(params.pairs())
        .send()
        .await
        .map_err(|e| TransportError::Http(e.without_url()))?;

    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::Status {
            status: status.as_u16(),
            body: preview(&body),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Http(e.without_url()))?;

    serde_json::from_str(&body).map_err(|e| TransportError::Json {
        message: e.to_string(),
        body: Some(preview(&body)),
    })
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
