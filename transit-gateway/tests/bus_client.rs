//! Integration tests for the bus client (wiremock-based)

use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use transit_gateway::bus::{
    BulletinFilter, BusClient, BusConfig, PatternFilter, PredictionTarget, TimeResolution,
    VehicleFilter,
};
use transit_gateway::provider::{ProviderError, TransportError};

fn client_for_mock(server: &MockServer) -> BusClient {
    let config = BusConfig::new("test-key")
        .with_base_url(server.uri())
        .with_timeout(5);
    BusClient::new(config).unwrap()
}

fn envelope(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "bustime-response": body }))
}

#[tokio::test]
async fn test_fixed_params_attached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getroutes"))
        .and(query_param("key", "test-key"))
        .and(query_param("locale", "en"))
        .and(query_param("format", "json"))
        .respond_with(envelope(serde_json::json!({
            "routes": [
                { "rt": "20", "rtnm": "Madison", "rtclr": "#ff0000", "rtdd": "20" },
                { "rt": "X9", "rtnm": "Ashland Express", "rtclr": "#00ff00", "rtdd": "X9" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let routes = client_for_mock(&server).get_routes().await.unwrap();

    assert_eq!(routes.len(), 2);
    assert_eq!(routes[0].rt.as_deref(), Some("20"));
    assert_eq!(routes[1].rtnm.as_deref(), Some("Ashland Express"));
}

#[tokio::test]
async fn test_vehicles_forward_only_given_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getvehicles"))
        .and(query_param("rt", "20"))
        .respond_with(envelope(serde_json::json!({
            "vehicle": [
                { "vid": "1", "rt": "20", "pid": 954, "dly": false },
                { "vid": "2", "rt": "20", "pid": 954, "dly": true }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for_mock(&server);
    let vehicles = client
        .get_vehicles(&VehicleFilter::Routes("20".into()), None)
        .await
        .unwrap();

    assert_eq!(vehicles.len(), 2);
    assert_eq!(vehicles[0].vid.as_deref(), Some("1"));
    assert_eq!(vehicles[1].dly, Some(true));

    let requests = server.received_requests().await.unwrap();
    let keys: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert!(keys.contains(&"rt".to_string()));
    assert!(!keys.contains(&"vid".to_string()));
    assert!(!keys.contains(&"tmres".to_string()));
}

#[tokio::test]
async fn test_vehicles_with_time_resolution() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getvehicles"))
        .and(query_param("vid", "509,392"))
        .and(query_param("tmres", "s"))
        .respond_with(envelope(serde_json::json!({ "vehicle": [{ "vid": "509" }] })))
        .expect(1)
        .mount(&server)
        .await;

    let vehicles = client_for_mock(&server)
        .get_vehicles(
            &VehicleFilter::Vehicles("509,392".into()),
            Some(TimeResolution::Seconds),
        )
        .await
        .unwrap();

    assert_eq!(vehicles.len(), 1);
}

#[tokio::test]
async fn test_error_envelope_joins_messages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getpredictions"))
        .respond_with(envelope(serde_json::json!({
            "error": [
                { "stpid": "1", "msg": "No service scheduled" },
                { "stpid": "2", "msg": "No arrival times" }
            ]
        })))
        .mount(&server)
        .await;

    let target = PredictionTarget::Stops {
        stpid: "1,2".into(),
        rt: None,
    };
    let err = client_for_mock(&server)
        .get_predictions(&target, None)
        .await
        .unwrap_err();

    match err {
        ProviderError::Upstream { message } => {
            assert_eq!(message, "No service scheduled, No arrival times");
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_predictions_by_vehicle() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getpredictions"))
        .and(query_param("vid", "8452"))
        .and(query_param("top", "2"))
        .respond_with(envelope(serde_json::json!({
            "prd": [
                { "vid": "8452", "typ": "A", "stpid": "456", "dstp": 1200, "prdctdn": "4" },
                { "vid": "8452", "typ": "A", "stpid": "457", "dstp": "bogus", "prdctdn": "7" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let target = PredictionTarget::Vehicles { vid: "8452".into() };
    let predictions = client_for_mock(&server)
        .get_predictions(&target, Some(2))
        .await
        .unwrap();

    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].dstp, Some(1200));
    // Mistyped fields are dropped rather than failing the record
    assert_eq!(predictions[1].dstp, None);
    assert_eq!(predictions[1].prdctdn.as_deref(), Some("7"));
}

#[tokio::test]
async fn test_patterns_with_points() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getpatterns"))
        .and(query_param("pid", "954"))
        .respond_with(envelope(serde_json::json!({
            "ptr": [{
                "pid": 954,
                "ln": 35919.0,
                "rtdir": "Westbound",
                "pt": [
                    { "seq": 1, "lat": 41.88, "lon": -87.62, "typ": "S", "stpid": "1", "stpnm": "Michigan", "pdist": 0.0 },
                    { "seq": 2, "lat": 41.88, "lon": -87.63, "typ": "W", "pdist": 120.5 }
                ]
            }]
        })))
        .mount(&server)
        .await;

    let patterns = client_for_mock(&server)
        .get_patterns(&PatternFilter::Patterns("954".into()))
        .await
        .unwrap();

    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].pt.len(), 2);
    assert_eq!(patterns[0].pt[0].stpnm.as_deref(), Some("Michigan"));
    assert_eq!(patterns[0].pt[1].typ.as_deref(), Some("W"));
}

#[tokio::test]
async fn test_service_bulletins() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getservicebulletins"))
        .and(query_param("rt", "20"))
        .and(query_param("rtdir", "Eastbound"))
        .respond_with(envelope(serde_json::json!({
            "sb": [{
                "nm": "Reroute",
                "sbj": "Madison reroute",
                "prty": "Low",
                "srvc": [{ "rt": "20", "rtdir": "Eastbound" }]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filter = BulletinFilter {
        rt: Some("20".into()),
        rtdir: Some("Eastbound".into()),
        stpid: None,
    };
    let bulletins = client_for_mock(&server)
        .get_service_bulletins(&filter)
        .await
        .unwrap();

    assert_eq!(bulletins.len(), 1);
    assert_eq!(bulletins[0].srvc[0].rtdir.as_deref(), Some("Eastbound"));
}

#[tokio::test]
async fn test_get_time_parses_local_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gettime"))
        .respond_with(envelope(serde_json::json!({ "tm": "20240101 13:45:00" })))
        .mount(&server)
        .await;

    let time = client_for_mock(&server).get_time().await.unwrap();

    let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(13, 45, 0)
        .unwrap();
    assert_eq!(time.tm.naive_local(), expected);
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getroutes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client_for_mock(&server).get_routes().await.unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Transport(TransportError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_malformed_body_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getroutes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for_mock(&server).get_routes().await.unwrap_err();

    assert!(matches!(
        err,
        ProviderError::Transport(TransportError::Json { .. })
    ));
}

#[tokio::test]
async fn test_missing_envelope_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getroutes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "other": {} })))
        .mount(&server)
        .await;

    let err = client_for_mock(&server).get_routes().await.unwrap_err();

    assert!(matches!(err, ProviderError::Transport(_)));
}

#[tokio::test]
async fn test_mistyped_pattern_points_do_not_fail_the_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getpatterns"))
        .and(query_param("rt", "20"))
        .respond_with(envelope(serde_json::json!({
            "ptr": [
                { "pid": 1, "rtdir": "Eastbound", "pt": 5 },
                { "pid": 2, "rtdir": "Westbound", "pt": ["x", { "seq": 1, "typ": "S" }] }
            ]
        })))
        .mount(&server)
        .await;

    let patterns = client_for_mock(&server)
        .get_patterns(&PatternFilter::Route("20".into()))
        .await
        .unwrap();

    assert_eq!(patterns.len(), 2);
    assert_eq!(patterns[0].rtdir.as_deref(), Some("Eastbound"));
    assert!(patterns[0].pt.is_empty());
    assert_eq!(patterns[1].pt.len(), 1);
    assert_eq!(patterns[1].pt[0].seq, Some(1));
}

#[tokio::test]
async fn test_stops_forward_route_and_direction() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getstops"))
        .and(query_param("rt", "20"))
        .and(query_param("dir", "Eastbound"))
        .respond_with(envelope(serde_json::json!({
            "stops": [
                { "stpid": "456", "stpnm": "Madison & Wells", "lat": 41.88, "lon": -87.63 },
                { "stpid": "457", "stpnm": "Madison & LaSalle", "lat": "north", "lon": -87.632 }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stops = client_for_mock(&server)
        .get_stops("20", "Eastbound")
        .await
        .unwrap();

    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].stpnm.as_deref(), Some("Madison & Wells"));
    assert_eq!(stops[1].lat, None);
    assert_eq!(stops[1].lon, Some(-87.632));
}
