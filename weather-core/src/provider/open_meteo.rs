use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{Config, LocationData, LookupError, WeatherData, error::Service, http::truncate_body};

use super::WeatherSource;

#[derive(Debug, Clone)]
pub struct OpenMeteoSource {
    url: String,
    http: Client,
}

impl OpenMeteoSource {
    pub fn new(http: Client, config: &Config) -> Self {
        Self { url: config.weather_url.clone(), http }
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoSource {
    async fn fetch(&self, location: &LocationData) -> Result<WeatherData, LookupError> {
        let params = current_weather_params(location);
        tracing::debug!(url = %self.url, ?params, "fetching current weather");

        let res = self
            .http
            .get(&self.url)
            .query(&params)
            .send()
            .await
            .map_err(|e| LookupError::transport(Service::Weather, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| LookupError::transport(Service::Weather, e))?;

        if !status.is_success() {
            tracing::debug!(%status, body = truncate_body(&body), "weather request rejected");
            return Err(LookupError::status(Service::Weather, status));
        }

        let parsed: OmResponse = serde_json::from_str(&body)
            .map_err(|source| LookupError::Decode { service: Service::Weather, source })?;

        let current = parsed.current_weather.ok_or(LookupError::Data)?;
        let weather = current.into_weather(location);

        tracing::info!(
            temperature = weather.temperature(),
            code = ?weather.weather_code(),
            time = weather.time().unwrap_or("-"),
            "current weather received"
        );
        Ok(weather)
    }
}

pub fn current_weather_params(location: &LocationData) -> [(&'static str, String); 4] {
    [
        ("current_weather", "true".to_string()),
        ("latitude", location.latitude().to_string()),
        ("longitude", location.longitude().to_string()),
        ("timezone", "auto".to_string()),
    ]
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    #[serde(default)]
    current_weather: Option<OmCurrent>,
}

// Fields are kept loose: a bad value degrades the display instead of failing the request.
#[derive(Debug, Deserialize)]
struct OmCurrent {
    #[serde(default)]
    temperature: Option<Value>,
    #[serde(default)]
    weathercode: Option<Value>,
    #[serde(default)]
    time: Option<Value>,
}

impl OmCurrent {
    fn into_weather(self, location: &LocationData) -> WeatherData {
        let temperature = self.temperature.as_ref().and_then(number).unwrap_or(f64::NAN);
        let code = self.weathercode.as_ref().and_then(integer);
        let time = match self.time {
            Some(Value::String(s)) => Some(s),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        WeatherData::observed(location, temperature, code, time)
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Fractional codes are truncated toward zero, `2.9` reads as `2`.
fn integer(value: &Value) -> Option<i64> {
    number(value).filter(|n| n.is_finite()).map(|n| n.trunc() as i64)
}
