use async_trait::async_trait;
use std::fmt::Debug;

use crate::{LocationData, LookupError, WeatherData};

pub mod open_meteo;

pub use open_meteo::OpenMeteoSource;

/// Current conditions for already resolved coordinates.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, location: &LocationData) -> Result<WeatherData, LookupError>;
}
