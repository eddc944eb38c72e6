//! End-to-end lookups against mock geocoding and weather servers.

use std::time::Duration;

use weather_core::{Config, Icon, LookupError, RequestState, Service, WeatherLookup};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn lookup_for(geocoder: &MockServer, weather: &MockServer) -> WeatherLookup {
    let cfg = Config {
        geocoding_url: format!("{}/search", geocoder.uri()),
        weather_url: format!("{}/v1/forecast", weather.uri()),
        ..Config::default()
    };
    WeatherLookup::from_config(&cfg).expect("lookup should build")
}

fn berlin_candidate() -> serde_json::Value {
    serde_json::json!([{
        "lat": "52.5170365",
        "lon": "13.3888599",
        "display_name": "Berlin, Deutschland",
        "address": { "city": "Berlin", "state": "Berlin", "country": "Deutschland" }
    }])
}

async fn mount_weather(server: &MockServer, temperature: f64, code: i64, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.5170365"))
        .and(query_param("longitude", "13.3888599"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": {
                "temperature": temperature,
                "weathercode": code,
                "time": "2026-10-18T15:00"
            }
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn city_only_lookup_end_to_end() {
    let geocoder = MockServer::start().await;
    let weather = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(berlin_candidate()))
        .expect(1)
        .mount(&geocoder)
        .await;
    mount_weather(&weather, 20.5, 3, 1).await;

    let lookup = lookup_for(&geocoder, &weather);
    let model = lookup.search(Some("Berlin"), Some("")).await.expect("lookup should succeed");

    assert_eq!(model.name, "Berlin, Deutschland");
    assert_eq!(model.temperature, "21 °C");
    assert_eq!(model.description, "Overcast");
    assert_eq!(model.icon, Icon::PartlyCloudy);
    assert_eq!(model.observed_at.as_deref(), Some("2026-10-18T15:00"));
    assert_eq!(lookup.state(), RequestState::Idle);
}

#[tokio::test]
async fn unmatched_zip_and_city_never_reaches_weather_service() {
    let geocoder = MockServer::start().await;
    let weather = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("postalcode", "00000"))
        .and(query_param("city", "Nowhere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "lat": "47.8",
            "lon": "13.0",
            "display_name": "Salzburg, Österreich",
            "address": { "city": "Salzburg", "postcode": "5020" }
        }])))
        .mount(&geocoder)
        .await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&weather).await;

    let lookup = lookup_for(&geocoder, &weather);
    let err = lookup.search(Some("Nowhere"), Some("00000")).await.unwrap_err();

    assert!(matches!(err, LookupError::NoExactMatch));
    assert_eq!(
        lookup.state(),
        RequestState::Failed("postal code and city do not match exactly".into())
    );
}

#[tokio::test]
async fn geocoder_outage_stops_before_weather_fetch() {
    let geocoder = MockServer::start().await;
    let weather = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&geocoder)
        .await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&weather).await;

    let lookup = lookup_for(&geocoder, &weather);
    let err = lookup.search(Some("Berlin"), None).await.unwrap_err();

    assert!(matches!(err, LookupError::Network { service: Service::Geocoding, .. }));
    assert_eq!(err.to_string(), "location search failed");
}

#[tokio::test]
async fn weather_outage_after_successful_resolution() {
    let geocoder = MockServer::start().await;
    let weather = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(berlin_candidate()))
        .mount(&geocoder)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&weather)
        .await;

    let lookup = lookup_for(&geocoder, &weather);
    let err = lookup.search(Some("berlin"), None).await.unwrap_err();

    assert!(matches!(err, LookupError::Network { service: Service::Weather, .. }));
    assert_eq!(lookup.state(), RequestState::Failed("failed to fetch weather data".into()));
}

#[tokio::test]
async fn empty_input_sends_nothing() {
    let geocoder = MockServer::start().await;
    let weather = MockServer::start().await;

    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&geocoder).await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&weather).await;

    let lookup = lookup_for(&geocoder, &weather);
    let err = lookup.search(Some(" "), Some("")).await.unwrap_err();

    assert!(matches!(err, LookupError::Input));
}

#[tokio::test]
async fn overlapping_submission_is_rejected() {
    let geocoder = MockServer::start().await;
    let weather = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(berlin_candidate())
                .set_delay(Duration::from_millis(200)),
        )
        .expect(2)
        .mount(&geocoder)
        .await;
    mount_weather(&weather, 8.2, 71, 2).await;

    let lookup = lookup_for(&geocoder, &weather);
    let (first, second) =
        tokio::join!(lookup.search(Some("Berlin"), None), lookup.search(Some("Berlin"), None));

    let model = first.expect("first submission should complete");
    assert_eq!(model.temperature, "8 °C");
    assert_eq!(model.description, "Slight snowfall");
    assert!(matches!(second, Err(LookupError::Busy)));
    assert_eq!(lookup.state(), RequestState::Idle);

    // Accepted again once the first one is done.
    let again = lookup.search(Some("Berlin"), None).await;
    assert!(again.is_ok());
}
