use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};

use crate::{
    Config, LocationData, LocationQuery, LookupError,
    error::Service,
    http::truncate_body,
};

use super::LocationResolver;

/// Location search against a Nominatim `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimResolver {
    url: String,
    country_codes: String,
    http: Client,
}

impl NominatimResolver {
    pub fn new(http: Client, config: &Config) -> Self {
        Self { url: config.geocoding_url.clone(), country_codes: config.country_filter(), http }
    }

    async fn search(&self, query: &LocationQuery) -> Result<Vec<Candidate>, LookupError> {
        let params = search_params(query, &self.country_codes);
        tracing::debug!(url = %self.url, ?params, "searching location");

        let res = self
            .http
            .get(&self.url)
            .query(&params)
            .send()
            .await
            .map_err(|e| LookupError::transport(Service::Geocoding, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| LookupError::transport(Service::Geocoding, e))?;

        if !status.is_success() {
            tracing::debug!(%status, body = truncate_body(&body), "location search rejected");
            return Err(LookupError::status(Service::Geocoding, status));
        }

        serde_json::from_str(&body)
            .map_err(|source| LookupError::Decode { service: Service::Geocoding, source })
    }
}

#[async_trait]
impl LocationResolver for NominatimResolver {
    async fn resolve(&self, query: &LocationQuery) -> Result<LocationData, LookupError> {
        if query.is_empty() {
            return Err(LookupError::Input);
        }

        let candidates = self.search(query).await?;
        tracing::debug!(count = candidates.len(), "location candidates received");

        if candidates.is_empty() {
            return Err(LookupError::NotFound);
        }

        let found = select_exact_match(&candidates, query).ok_or(LookupError::NoExactMatch)?;
        let location = found.to_location()?;

        tracing::info!(
            name = location.display_name().unwrap_or("-"),
            lat = location.latitude(),
            lon = location.longitude(),
            "location resolved"
        );
        Ok(location)
    }
}

/// Query parameters for a search. City and zip together narrow by both;
/// a city alone goes into the free-text `q`.
pub fn search_params(query: &LocationQuery, country_codes: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("format", "json".to_string()),
        ("addressdetails", "1".to_string()),
        ("limit", "1".to_string()),
        ("countrycodes", country_codes.to_string()),
    ];

    match (query.city(), query.zip()) {
        (Some(city), Some(zip)) => {
            params.push(("postalcode", zip.to_string()));
            params.push(("city", city.to_string()));
        }
        (None, Some(zip)) => params.push(("postalcode", zip.to_string())),
        (Some(city), None) => params.push(("q", city.to_string())),
        (None, None) => {}
    }

    params
}

/// First candidate whose postcode and place name equal the query, ignoring
/// whitespace (and case, for the place name). Absent query fields match anything.
pub fn select_exact_match<'a>(
    candidates: &'a [Candidate],
    query: &LocationQuery,
) -> Option<&'a Candidate> {
    let zip = query.zip().map(strip_whitespace);
    let city = query.city().map(normalize_place);

    candidates.iter().find(|candidate| {
        let address = &candidate.address;

        let zip_match = match &zip {
            None => true,
            Some(zip) => address.postcode.as_deref().is_some_and(|p| strip_whitespace(p) == *zip),
        };

        let city_match = match &city {
            None => true,
            Some(city) => address.place_names().any(|name| normalize_place(name) == *city),
        };

        zip_match && city_match
    })
}

fn strip_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

fn normalize_place(value: &str) -> String {
    strip_whitespace(value).to_lowercase()
}

/// One search hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub lat: Option<Coordinate>,
    #[serde(default)]
    pub lon: Option<Coordinate>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: Address,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Candidate {
    fn to_location(&self) -> Result<LocationData, LookupError> {
        let lat = self.lat.as_ref().and_then(Coordinate::value);
        let lon = self.lon.as_ref().and_then(Coordinate::value);

        match (lat, lon) {
            (Some(lat), Some(lon)) => Ok(LocationData::new(lat, lon, self.display_name.clone())),
            _ => Err(LookupError::Decode {
                service: Service::Geocoding,
                source: serde::de::Error::custom("candidate has no usable coordinates"),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Address {
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub municipality: Option<String>,
}

impl Address {
    fn place_names(&self) -> impl Iterator<Item = &str> {
        [&self.city, &self.town, &self.village, &self.municipality]
            .into_iter()
            .filter_map(|name| name.as_deref())
    }
}

/// Nominatim sends coordinates as decimal strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    pub fn value(&self) -> Option<f64> {
        match self {
            Coordinate::Number(n) => Some(*n),
            Coordinate::Text(s) => s.trim().parse().ok(),
        }
    }
}
