//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Location resolution by city and/or postal code (Nominatim)
//! - Current weather lookup for coordinates (Open-Meteo)
//! - Translation of WMO weather codes into descriptions and icons
//! - Display formatting and the one-request-at-a-time lookup pipeline
//! - Configuration handling
//!
//! Nothing in here renders anything; `weather-cli` owns all output.

pub mod config;
pub mod error;
pub mod geocode;
pub mod http;
pub mod lookup;
pub mod model;
pub mod present;
pub mod provider;
pub mod weather_code;

pub use config::Config;
pub use error::{LookupError, Service};
pub use geocode::{LocationResolver, NominatimResolver};
pub use lookup::{RequestState, WeatherLookup};
pub use model::{DisplayModel, LocationData, LocationQuery, WeatherData};
pub use present::{format_temperature, present};
pub use provider::{OpenMeteoSource, WeatherSource};
pub use weather_code::{Icon, WeatherCode, describe, icon_for};
