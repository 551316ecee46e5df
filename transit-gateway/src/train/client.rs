//! Train tracker HTTP client.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::provider::{
    ApiKey, ProviderError, QueryParams, TransportError, build_http, get_json, lenient,
};

use super::types::{Arrival, ArrivalTarget, RouteTrains, RunFollow, TrainPosition};

/// Default base URL for the train tracker API.
const DEFAULT_BASE_URL: &str = "http://lapi.transitchicago.com/api/1.0";

/// Default per-call timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Envelope key wrapping every train response.
const ENVELOPE_KEY: &str = "ctatt";

/// Configuration for the train client.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// API key sent as the `key` query parameter
    pub api_key: ApiKey,
    /// Base URL for the API (defaults to the production tracker)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TrainConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Train tracker API client.
#[derive(Debug, Clone)]
pub struct TrainClient {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
}

impl TrainClient {
    /// Create a new train client with the given configuration.
    pub fn new(config: TrainConfig) -> Result<Self, ProviderError> {
        let http = build_http(Duration::from_secs(config.timeout_secs))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Call `path` and return the unwrapped `ctatt` object.
    async fn request(
        &self,
        path: &str,
        params: QueryParams,
    ) -> Result<Map<String, Value>, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(path, params = ?params.pairs(), "train provider request");

        let fixed = [("key", self.api_key.expose()), ("outputType", "JSON")];
        let body = get_json(&self.http, &url, &fixed, &params).await?;

        unwrap_envelope(body)
    }

    /// Get arrival predictions for a station or a single platform.
    ///
    /// # Arguments
    ///
    /// * `target` - Station (`mapid`) or platform (`stpid`)
    /// * `max` - Maximum number of results (all if omitted)
    /// * `rt` - Restrict to a single route
    pub async fn get_arrivals(
        &self,
        target: ArrivalTarget,
        max: Option<u32>,
        rt: Option<&str>,
    ) -> Result<Vec<Arrival>, ProviderError> {
        let params = match target {
            ArrivalTarget::Station(mapid) => QueryParams::new().with("mapid", mapid),
            ArrivalTarget::Stop(stpid) => QueryParams::new().with("stpid", stpid),
        }
        .with_opt("max", max)
        .with_opt("rt", rt);

        let mut ctatt = self.request("/ttarrivals.aspx", params).await?;
        take_list(&mut ctatt, "eta")
    }

    /// Follow a run: its current position and predicted arrivals at
    /// subsequent stations.
    ///
    /// One provider call supplies both parts.
    pub async fn get_follow(&self, runnumber: u32) -> Result<RunFollow, ProviderError> {
        let params = QueryParams::new().with("runnumber", runnumber);

        let mut ctatt = self.request("/ttfollow.aspx", params).await?;
        let arrivals = take_list(&mut ctatt, "eta")?;
        let position = match ctatt.remove("position") {
            None | Some(Value::Null) => None,
            Some(value) => Some(decode::<TrainPosition>(value, "position")?),
        };

        Ok(RunFollow { position, arrivals })
    }

    /// Get the live locations of in-service trains on one or more routes.
    pub async fn get_locations(&self, rt: &str) -> Result<Vec<RouteTrains>, ProviderError> {
        let params = QueryParams::new().with("rt", rt);

        let mut ctatt = self.request("/ttpositions.aspx", params).await?;
        take_list(&mut ctatt, "route")
    }
}

/// Extract the `ctatt` object, failing if `errCd` is anything but "0".
///
/// Errors are reported as "<errCd>: <errNm>".
fn unwrap_envelope(body: Value) -> Result<Map<String, Value>, ProviderError> {
    let Value::Object(mut root) = body else {
        return Err(TransportError::malformed("train response is not a JSON object").into());
    };
    let Some(Value::Object(ctatt)) = root.remove(ENVELOPE_KEY) else {
        return Err(TransportError::malformed(format!("train response has no {ENVELOPE_KEY}")).into());
    };

    let code = ctatt.get("errCd").map(scalar_text).unwrap_or_default();
    if code != "0" {
        let name = ctatt.get("errNm").map(scalar_text).unwrap_or_default();
        return Err(ProviderError::upstream(format!("{code}: {name}")));
    }

    Ok(ctatt)
}

/// Render a string or number scalar as text; anything else is empty.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn take_list<T: DeserializeOwned>(
    ctatt: &mut Map<String, Value>,
    field: &str,
) -> Result<Vec<T>, ProviderError> {
    let value = ctatt.remove(field).unwrap_or(Value::Null);
    lenient::list_from_value(value).map_err(|e| {
        TransportError::Json {
            message: format!("train {field} payload: {e}"),
            body: None,
        }
        .into()
    })
}

fn decode<T: DeserializeOwned>(value: Value, field: &str) -> Result<T, ProviderError> {
    serde_json::from_value(value).map_err(|e| {
        TransportError::Json {
            message: format!("train {field} payload: {e}"),
            body: None,
        }
        .into()
    })
}
