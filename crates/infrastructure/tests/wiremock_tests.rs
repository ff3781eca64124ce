//! Integration tests for the weather pipeline
//!
//! Tests cover:
//! - Live adapter against a wiremock One Call endpoint
//! - Display service caching on top of the live and fixture adapters
//! - Error propagation without disturbing the cached state

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use application::{
    ApplicationError, Clock, DataSource, ManualClock, StateCache, WeatherDisplayService,
    WeatherSourcePort, WeatherTransformer,
};
use chrono::{DateTime, TimeDelta, Utc};
use domain::Timezone;
use infrastructure::WeatherSourceAdapter;
use integration_weather::WeatherConfig;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn onecall_body(current_temp: f64) -> serde_json::Value {
    serde_json::json!({
        "timezone": "Europe/Berlin",
        "current": {
            "dt": 1_705_320_000,
            "temp": current_temp,
            "feels_like": current_temp - 2.0,
            "weather": [{"description": "broken clouds", "icon": "04d"}]
        },
        "hourly": [
            {"dt": 1_705_316_400, "temp": 1.0, "feels_like": 0.0, "weather": [{"description": "mist", "icon": "50d"}]},
            {"dt": 1_705_323_600, "temp": 7.6, "feels_like": 5.0, "weather": [{"description": "light rain", "icon": "10d"}], "rain": {"1h": 0.2}},
            {"dt": 1_705_327_200, "temp": 8.4, "feels_like": 6.0, "weather": [{"description": "overcast clouds", "icon": "04d"}]}
        ]
    })
}

fn live_adapter(server: &MockServer) -> WeatherSourceAdapter {
    let config = WeatherConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..WeatherConfig::new("integration-key", 52.52, 13.405).with_units("metric")
    };
    WeatherSourceAdapter::live(&config).unwrap()
}

fn fixture_file(current_temp: f64) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", onecall_body(current_temp)).unwrap();
    file
}

fn service(
    live: WeatherSourceAdapter,
    fixture: WeatherSourceAdapter,
) -> (WeatherDisplayService, Arc<ManualClock>) {
    let start = DateTime::<Utc>::from_timestamp(1_705_320_000, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let cache = Arc::new(StateCache::new(
        WeatherTransformer::new(Timezone::parse("Europe/Berlin").unwrap()),
        Arc::clone(&clock) as Arc<dyn Clock>,
    ));
    let service = WeatherDisplayService::new(cache, Arc::new(live), Arc::new(fixture))
        .with_max_age(Duration::from_secs(300));
    (service, clock)
}

#[tokio::test]
async fn live_adapter_maps_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .and(query_param("appid", "integration-key"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(onecall_body(7.5)))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = live_adapter(&server);
    let snapshot = adapter.fetch_snapshot().await.unwrap();

    assert_eq!(snapshot.source_id, adapter.source_id());
    assert_eq!(snapshot.timezone, "Europe/Berlin");
    assert_eq!(snapshot.hourly.len(), 3);
    assert!(snapshot.hourly[1].has_rain());
}

#[tokio::test]
async fn live_requests_are_cached_until_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(onecall_body(7.5)))
        .expect(2)
        .mount(&server)
        .await;

    let fixture = fixture_file(1.0);
    let (service, clock) = service(
        live_adapter(&server),
        WeatherSourceAdapter::fixture(fixture.path()),
    );

    let first = service.display_state(DataSource::Live).await.unwrap();
    let second = service.display_state(DataSource::Live).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // 13:00 Berlin, only the two later hourly entries are shown
    assert_eq!(first.time_label, "Mon 1:00 PM");
    assert_eq!(first.temperature, 8);
    assert_eq!(first.hourly.len(), 2);
    assert_eq!(first.hourly[0].time_label, "2:00 PM");
    assert!(first.hourly[0].rain);

    clock.advance(TimeDelta::seconds(300));
    let third = service.display_state(DataSource::Live).await.unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
}

#[tokio::test]
async fn switching_sources_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(onecall_body(7.5)))
        .expect(2)
        .mount(&server)
        .await;

    let fixture = fixture_file(-3.5);
    let (service, _clock) = service(
        live_adapter(&server),
        WeatherSourceAdapter::fixture(fixture.path()),
    );

    let live = service.display_state(DataSource::Live).await.unwrap();
    let fake = service.display_state(DataSource::Fixture).await.unwrap();
    let live_again = service.display_state(DataSource::Live).await.unwrap();

    assert_eq!(live.temperature, 8);
    assert_eq!(fake.temperature, -4);
    assert_eq!(live_again.temperature, 8);
    assert_eq!(service.cached_state().unwrap().0, DataSource::Live);
}

#[tokio::test]
async fn upstream_failure_keeps_previous_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(onecall_body(7.5)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let fixture = fixture_file(1.0);
    let (service, clock) = service(
        live_adapter(&server),
        WeatherSourceAdapter::fixture(fixture.path()),
    );

    let original = service.display_state(DataSource::Live).await.unwrap();
    clock.advance(TimeDelta::minutes(10));

    let result = service.display_state(DataSource::Live).await;
    assert!(matches!(result, Err(ApplicationError::Fetch(_))));

    let (_, cached) = service.cached_state().unwrap();
    assert!(Arc::ptr_eq(&original, &cached));
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let fixture = fixture_file(1.0);
    let (service, _clock) = service(
        live_adapter(&server),
        WeatherSourceAdapter::fixture(fixture.path()),
    );

    let result = service.display_state(DataSource::Live).await;
    assert!(matches!(result, Err(ApplicationError::RateLimited)));
    assert!(service.cached_state().is_none());
}

#[tokio::test]
async fn malformed_current_conditions_are_rejected() {
    let server = MockServer::start().await;
    let mut body = onecall_body(7.5);
    body["current"]["weather"] = serde_json::json!([]);
    Mock::given(method("GET"))
        .and(path("/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let fixture = fixture_file(1.0);
    let (service, _clock) = service(
        live_adapter(&server),
        WeatherSourceAdapter::fixture(fixture.path()),
    );

    let err = service.display_state(DataSource::Live).await.unwrap_err();
    assert!(err.is_data_error());
    assert!(service.cached_state().is_none());
}
