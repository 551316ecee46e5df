//! Bus tracker HTTP client.
//!
//! One provider call per operation. The credential, locale, and format are
//! attached to every request; per-call parameters are only sent when given.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::provider::{
    ApiKey, ProviderError, QueryParams, TransportError, build_http, get_json, lenient,
};

use super::types::{
    BulletinFilter, BusTime, Direction, Pattern, PatternFilter, Prediction, PredictionTarget,
    Route, ServiceBulletin, Stop, TimeResolution, Vehicle, VehicleFilter,
};

/// Default base URL for the bus tracker API.
const DEFAULT_BASE_URL: &str = "http://www.ctabustracker.com/bustime/api/v2";

/// Default per-call timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Envelope key wrapping every bus response.
const ENVELOPE_KEY: &str = "bustime-response";

/// Format of the provider's `gettime` value.
const TIME_FORMAT: &str = "%Y%m%d %H:%M:%S";

/// Configuration for the bus client.
#[derive(Debug, Clone)]
pub struct BusConfig {
    /// API key sent as the `key` query parameter
    pub api_key: ApiKey,
    /// Base URL for the API (defaults to the production tracker)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BusConfig {
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

/// Bus tracker API client.
///
/// Holds no per-request state, so one instance is shared by every handler.
#[derive(Debug, Clone)]
pub struct BusClient {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
}

impl BusClient {
    /// Create a new bus client with the given configuration.
    pub fn new(config: BusConfig) -> Result<Self, ProviderError> {
        let http = build_http(Duration::from_secs(config.timeout_secs))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Call `path` and return the envelope's `field` payload.
    async fn request<T>(
        &self,
        path: &str,
        field: &str,
        params: QueryParams,
    ) -> Result<T, ProviderError>
    where
        T: DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(path, params = ?params.pairs(), "bus provider request");

        let fixed = [
            ("key", self.api_key.expose()),
            ("locale", "en"),
            ("format", "json"),
        ];
        let body = get_json(&self.http, &url, &fixed, &params).await?;

        unwrap_envelope(body, field)
    }

    /// Get the provider's current local time.
    pub async fn get_time(&self) -> Result<BusTime, ProviderError> {
        let tm: String = self.request("/gettime", "tm", QueryParams::new()).await?;
        let tm = parse_bus_time(&tm)?;
        Ok(BusTime { tm })
    }

    /// Get the latest positions of the selected vehicles.
    pub async fn get_vehicles(
        &self,
        filter: &VehicleFilter,
        tmres: Option<TimeResolution>,
    ) -> Result<Vec<Vehicle>, ProviderError> {
        let params = match filter {
            VehicleFilter::Vehicles(vid) => QueryParams::new().with("vid", vid),
            VehicleFilter::Routes(rt) => QueryParams::new().with("rt", rt),
        }
        .with_opt("tmres", tmres.map(|t| t.as_str()));

        self.request("/getvehicles", "vehicle", params).await
    }

    /// Get every route serviced by the system.
    pub async fn get_routes(&self) -> Result<Vec<Route>, ProviderError> {
        self.request("/getroutes", "routes", QueryParams::new()).await
    }

    /// Get the directions served by a route.
    pub async fn get_directions(&self, rt: &str) -> Result<Vec<Direction>, ProviderError> {
        let params = QueryParams::new().with("rt", rt);
        self.request("/getdirections", "directions", params).await
    }

    /// Get the stops for a route/direction pair.
    pub async fn get_stops(&self, rt: &str, dir: &str) -> Result<Vec<Stop>, ProviderError> {
        let params = QueryParams::new().with("rt", rt).with("dir", dir);
        self.request("/getstops", "stops", params).await
    }

    /// Get patterns by id or by route.
    pub async fn get_patterns(&self, filter: &PatternFilter) -> Result<Vec<Pattern>, ProviderError> {
        let params = match filter {
            PatternFilter::Patterns(pid) => QueryParams::new().with("pid", pid),
            PatternFilter::Route(rt) => QueryParams::new().with("rt", rt),
        };
        self.request("/getpatterns", "ptr", params).await
    }

    /// Get predictions for stops or vehicles.
    ///
    /// The provider returns predictions in ascending `prdtm` order; the order
    /// is passed through untouched.
    pub async fn get_predictions(
        &self,
        target: &PredictionTarget,
        top: Option<u32>,
    ) -> Result<Vec<Prediction>, ProviderError> {
        let params = match target {
            PredictionTarget::Stops { stpid, rt } => QueryParams::new()
                .with("stpid", stpid)
                .with_opt("rt", rt.as_deref()),
            PredictionTarget::Vehicles { vid } => QueryParams::new().with("vid", vid),
        }
        .with_opt("top", top);

        self.request("/getpredictions", "prd", params).await
    }

    /// Get service bulletins for routes, directions, or stops.
    pub async fn get_service_bulletins(
        &self,
        filter: &BulletinFilter,
    ) -> Result<Vec<ServiceBulletin>, ProviderError> {
        let params = QueryParams::new()
            .with_opt("rt", filter.rt.as_deref())
            .with_opt("rtdir", filter.rtdir.as_deref())
            .with_opt("stpid", filter.stpid.as_deref());

        self.request("/getservicebulletins", "sb", params).await
    }
}

/// Extract `field` from a `bustime-response` envelope, failing on reported errors.
///
/// Multiple provider error messages are joined with ", ". A success envelope
/// without the payload field decodes as `T::default()`.
fn unwrap_envelope<T>(body: Value, field: &str) -> Result<T, ProviderError>
where
    T: DeserializeOwned + Default,
{
    let Value::Object(mut root) = body else {
        return Err(TransportError::malformed("bus response is not a JSON object").into());
    };
    let Some(Value::Object(mut response)) = root.remove(ENVELOPE_KEY) else {
        return Err(TransportError::malformed(format!("bus response has no {ENVELOPE_KEY}")).into());
    };

    if let Some(error) = response.remove("error").filter(|e| !e.is_null()) {
        return Err(ProviderError::upstream(error_message(error)));
    }

    match response.remove(field) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(payload) => serde_json::from_value(payload).map_err(|e| {
            TransportError::Json {
                message: format!("bus {field} payload: {e}"),
                body: None,
            }
            .into()
        }),
    }
}

/// Join the `msg` of every provider error entry.
fn error_message(error: Value) -> String {
    #[derive(serde::Deserialize)]
    struct Entry {
        msg: Option<String>,
    }

    let entries: Vec<Entry> = lenient::list_from_value(error).unwrap_or_default();
    let messages: Vec<String> = entries.into_iter().filter_map(|e| e.msg).collect();

    if messages.is_empty() {
        "bus provider reported an error".to_string()
    } else {
        messages.join(", ")
    }
}

/// Parse the provider's "YYYYMMDD HH:MM:SS" local-time string.
pub fn parse_bus_time(s: &str) -> Result<DateTime<Local>, ProviderError> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), TIME_FORMAT).map_err(|e| {
        TransportError::malformed(format!("invalid bus time {s:?}: {e}"))
    })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| TransportError::malformed(format!("bus time {s:?} does not exist locally")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use serde_json::json;

    #[test]
    fn config_builder() {
        let config = BusConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(3);

        assert_eq!(config.api_key.expose(), "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn config_defaults() {
        let config = BusConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn client_creation() {
        let client = BusClient::new(BusConfig::new("test-key").with_base_url("http://x/"));
        assert_eq!(client.unwrap().base_url, "http://x");
    }

    #[test]
    fn envelope_payload_is_returned() {
        let body = json!({ "bustime-response": { "routes": [{ "rt": "20", "rtnm": "Madison" }] } });
        let routes: Vec<Route> = unwrap_envelope(body, "routes").unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].rtnm.as_deref(), Some("Madison"));
    }

    #[test]
    fn envelope_errors_are_joined() {
        let body = json!({
            "bustime-response": {
                "error": [
                    { "rt": "1000", "msg": "Invalid route" },
                    { "msg": "No data found for parameter" }
                ]
            }
        });
        let err = unwrap_envelope::<Vec<Route>>(body, "routes").unwrap_err();
        assert!(matches!(err, ProviderError::Upstream { .. }));
        assert_eq!(err.to_string(), "Invalid route, No data found for parameter");
    }

    #[test]
    fn single_error_object_is_accepted() {
        let body = json!({ "bustime-response": { "error": { "msg": "Invalid API access key supplied" } } });
        let err = unwrap_envelope::<Vec<Route>>(body, "routes").unwrap_err();
        assert_eq!(err.to_string(), "Invalid API access key supplied");
    }

    #[test]
    fn missing_payload_is_empty() {
        let body = json!({ "bustime-response": {} });
        let vehicles: Vec<Vehicle> = unwrap_envelope(body, "vehicle").unwrap();
        assert!(vehicles.is_empty());
    }

    #[test]
    fn missing_envelope_is_transport_error() {
        let err = unwrap_envelope::<Vec<Route>>(json!({ "ctatt": {} }), "routes").unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));

        let err = unwrap_envelope::<Vec<Route>>(json!([1, 2]), "routes").unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[test]
    fn payload_of_wrong_shape_is_transport_error() {
        let body = json!({ "bustime-response": { "routes": "nope" } });
        let err = unwrap_envelope::<Vec<Route>>(body, "routes").unwrap_err();
        assert!(matches!(err, ProviderError::Transport(TransportError::Json { .. })));
    }

    #[test]
    fn parses_provider_time_as_local() {
        let tm = parse_bus_time("20240101 13:45:00").unwrap();
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(13, 45, 0)
            .unwrap();

        assert_eq!(tm.naive_local(), expected);
        assert_eq!(tm.hour(), 13);
    }

    #[test]
    fn rejects_malformed_time() {
        assert!(parse_bus_time("2024-01-01T13:45:00").is_err());
        assert!(parse_bus_time("").is_err());
    }
}
