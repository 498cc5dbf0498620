//! End-to-end tests for the weather and time commands against mock upstreams.

use botcmd_core::{
    CommandError, CommandMessage, CommandRegistry, Config, Endpoints, ServiceId, User,
    builtin_commands,
};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEOCODE_PATH: &str = "/search";
const TIMEZONE_PATH: &str = "/api/TimeZone/coordinate";
const FORECAST_PATH: &str = "/data/2.5/forecast";

// 2024-01-11T00:00:00Z, a Thursday.
const JAN_11: i64 = 1_704_931_200;
const HOUR: i64 = 3600;

fn config_for(server: &MockServer, api_key: Option<&str>) -> Config {
    let mut cfg = Config {
        endpoints: Endpoints {
            geocoding: format!("{}{GEOCODE_PATH}", server.uri()),
            timezone: format!("{}{TIMEZONE_PATH}", server.uri()),
            forecast: format!("{}{FORECAST_PATH}", server.uri()),
        },
        request_timeout_secs: 5,
        ..Config::default()
    };
    if let Some(key) = api_key {
        cfg.upsert_api_key(ServiceId::OpenWeather, key.to_string());
    }
    cfg
}

fn message(command: &str, args: &[&str], private: bool) -> CommandMessage {
    let args = args.iter().map(|a| a.to_string()).collect();
    CommandMessage::new(command, args, User::new("alice", "42"), private)
}

fn entry(dt: i64, temp: f64, min: f64, max: f64, sky: &str) -> Value {
    json!({
        "dt": dt,
        "main": { "temp": temp, "temp_min": min, "temp_max": max, "humidity": 70 },
        "weather": [{ "id": 500, "main": "Rain", "description": sky }],
        "dt_txt": "ignored"
    })
}

async fn mount_london(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "place_id": 1,
            "display_name": "London, Greater London, England, United Kingdom",
            "lat": "51.5073219",
            "lon": "-0.1276474",
            "importance": 0.9
        }])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(TIMEZONE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "timeZone": "Europe/London",
            "currentLocalTime": "2024-01-10T08:00:00",
            "currentUtcOffset": { "seconds": 0, "milliseconds": 0 },
            "hasDayLightSaving": true
        })))
        .mount(server)
        .await;
}

async fn mount_london_forecast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .and(query_param("appid", "KEY"))
        .and(query_param("lat", "51.50732"))
        .and(query_param("lon", "-0.12765"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cnt": 5,
            "list": [
                entry(JAN_11 - 15 * HOUR, 280.15, 279.0, 281.0, "light rain"),
                entry(JAN_11 + 3 * HOUR, 276.0, 274.15, 278.15, "light rain"),
                entry(JAN_11 + 6 * HOUR, 277.0, 275.15, 279.15, "light rain"),
                entry(JAN_11 + 9 * HOUR, 276.5, 276.15, 277.15, "overcast clouds"),
                entry(JAN_11 + 24 * HOUR, 270.0, 268.0, 272.0, "snow")
            ],
            "city": { "id": 2643743, "name": "London", "country": "GB", "timezone": 0 }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn weather_renders_one_bucket_and_drops_last_day() {
    let server = MockServer::start().await;
    mount_london(&server).await;
    mount_london_forecast(&server).await;

    let registry = CommandRegistry::new(&config_for(&server, Some("KEY")), builtin_commands())
        .expect("registry");
    let replies =
        registry.dispatch(&message("weather", &["London"], false)).await.expect("weather");

    assert_eq!(replies.len(), 1);
    assert_eq!(
        replies[0].message,
        "Showing weather for London, United Kingdom\n\
         Current: 7.0°C - light rain\n\
         Thursday: 1.0°C to 6.0°C -- light rain - overcast clouds\n"
    );
    assert_eq!(replies[0].recipient.nick, "alice");
    assert!(!replies[0].private);
}

#[tokio::test]
async fn weather_alias_with_fahrenheit_token() {
    let server = MockServer::start().await;
    mount_london(&server).await;
    mount_london_forecast(&server).await;

    let registry = CommandRegistry::new(&config_for(&server, Some("KEY")), builtin_commands())
        .expect("registry");
    let replies = registry.dispatch(&message("w", &["London", "F"], true)).await.expect("weather");

    let text = &replies[0].message;
    assert!(text.contains("Current: 44.6°F - light rain\n"), "{text}");
    assert!(text.contains("Thursday: 33.8°F to 42.8°F"), "{text}");
    assert!(replies[0].private);
}

#[tokio::test]
async fn unknown_place_is_location_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let registry = CommandRegistry::new(&config_for(&server, Some("KEY")), builtin_commands())
        .expect("registry");
    let err = registry.dispatch(&message("weather", &["Atlantis"], false)).await.unwrap_err();

    assert!(matches!(err, CommandError::LocationNotFound(ref s) if s == "Atlantis"));
}

#[tokio::test]
async fn timezone_failure_surfaces_unchanged() {
    let server = MockServer::start().await;
    mount_london_geocode_only(&server).await;
    Mock::given(method("GET"))
        .and(path(TIMEZONE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let registry = CommandRegistry::new(&config_for(&server, Some("KEY")), builtin_commands())
        .expect("registry");
    let err = registry.dispatch(&message("weather", &["London"], false)).await.unwrap_err();

    assert!(matches!(err, CommandError::TimezoneLookup(ref msg) if msg.contains("503")));
}

#[tokio::test]
async fn malformed_forecast_is_a_fetch_error() {
    let server = MockServer::start().await;
    mount_london(&server).await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"list\": \"nope\"}"))
        .mount(&server)
        .await;

    let registry = CommandRegistry::new(&config_for(&server, Some("KEY")), builtin_commands())
        .expect("registry");
    let err = registry.dispatch(&message("weather", &["London"], false)).await.unwrap_err();

    assert!(matches!(err, CommandError::ForecastFetch(_)));
}

#[tokio::test]
async fn garbage_geocoding_body_is_malformed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&server)
        .await;

    let registry = CommandRegistry::new(&config_for(&server, None), builtin_commands())
        .expect("registry");
    let err = registry.dispatch(&message("time", &["London"], false)).await.unwrap_err();

    assert!(matches!(err, CommandError::MalformedUpstreamPayload(_)));
}

#[tokio::test]
async fn time_uses_whole_arg_string_and_skips_forecast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("q", "Paris f"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "display_name": "Paris, Ile-de-France, Metropolitan France, France",
            "lat": "48.8588897",
            "lon": "2.3200410"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(TIMEZONE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "timeZone": "Europe/Paris",
            "currentLocalTime": "2024-01-10T14:05:09.1234567",
            "currentUtcOffset": { "seconds": 3600 }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    // No OpenWeather key: the time command must not need one.
    let registry = CommandRegistry::new(&config_for(&server, None), builtin_commands())
        .expect("registry");
    let replies = registry.dispatch(&message("t", &["Paris", "f"], true)).await.expect("time");

    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].message, "02:05:09 PM - Paris, France");
    assert!(replies[0].private);
}

#[tokio::test]
async fn empty_args_differ_between_weather_and_time() {
    let server = MockServer::start().await;
    let registry = CommandRegistry::new(&config_for(&server, Some("KEY")), builtin_commands())
        .expect("registry");

    let weather = registry.dispatch(&message("weather", &[], false)).await.expect("no error");
    let time = registry.dispatch(&message("time", &[], false)).await.unwrap_err();

    assert!(weather.is_empty());
    assert!(matches!(time, CommandError::MissingArguments));
}

async fn mount_london_geocode_only(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "display_name": "London, Greater London, England, United Kingdom",
            "lat": "51.5073219",
            "lon": "-0.1276474"
        }])))
        .mount(server)
        .await;
}
