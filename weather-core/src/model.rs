use serde::Serialize;

use crate::weather_code::{Icon, WeatherCode};

/// What the user asked for. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationQuery {
    city: Option<String>,
    zip: Option<String>,
}

impl LocationQuery {
    pub fn new(city: Option<&str>, zip: Option<&str>) -> Self {
        Self { city: non_blank(city), zip: non_blank(zip) }
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.zip.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

/// A place resolved by the geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationData {
    latitude: f64,
    longitude: f64,
    display_name: Option<String>,
}

impl LocationData {
    pub fn new(latitude: f64, longitude: f64, display_name: Option<String>) -> Self {
        Self { latitude, longitude, display_name }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// Current conditions for a resolved place.
///
/// Name and coordinates always come from the [`LocationData`] the snapshot was
/// observed for.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherData {
    display_name: Option<String>,
    latitude: f64,
    longitude: f64,
    temperature: f64,
    weather_code: Option<i64>,
    time: Option<String>,
}

impl WeatherData {
    /// `temperature` is in °C and NaN when the provider did not send a usable value.
    pub fn observed(
        location: &LocationData,
        temperature: f64,
        weather_code: Option<i64>,
        time: Option<String>,
    ) -> Self {
        Self {
            display_name: location.display_name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            temperature,
            weather_code,
            time,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn weather_code(&self) -> Option<i64> {
        self.weather_code
    }

    pub fn condition(&self) -> WeatherCode {
        WeatherCode::from_optional(self.weather_code)
    }

    /// Observation time exactly as the provider sent it.
    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }
}

/// Everything a renderer needs to show one result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    pub name: String,
    pub temperature: String,
    pub description: String,
    pub icon: Icon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<String>,
}
