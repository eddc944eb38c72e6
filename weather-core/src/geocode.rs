use async_trait::async_trait;
use std::fmt::Debug;

use crate::{LocationData, LocationQuery, LookupError};

pub mod nominatim;

pub use nominatim::NominatimResolver;

/// Turns a city and/or postal code into one exactly matching place.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    async fn resolve(&self, query: &LocationQuery) -> Result<LocationData, LookupError>;
}
