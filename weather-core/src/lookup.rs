//! The request pipeline: resolve → fetch → present, one request at a time.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{
    Config, DisplayModel, LocationQuery, LookupError,
    geocode::{LocationResolver, NominatimResolver},
    http, present,
    provider::{OpenMeteoSource, WeatherSource},
};

/// Where the current (or last) request stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Resolving,
    Fetching,
    Presenting,
    /// Last request failed with this message. Cleared by the next submission.
    Failed(String),
}

impl RequestState {
    pub fn is_busy(&self) -> bool {
        matches!(self, RequestState::Resolving | RequestState::Fetching | RequestState::Presenting)
    }
}

#[derive(Debug)]
pub struct WeatherLookup {
    resolver: Box<dyn LocationResolver>,
    source: Box<dyn WeatherSource>,
    state: Mutex<RequestState>,
}

impl WeatherLookup {
    pub fn new(resolver: Box<dyn LocationResolver>, source: Box<dyn WeatherSource>) -> Self {
        Self { resolver, source, state: Mutex::new(RequestState::Idle) }
    }

    /// Nominatim + Open-Meteo sharing one HTTP client.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = http::client(config)?;

        Ok(Self::new(
            Box::new(NominatimResolver::new(client.clone(), config)),
            Box::new(OpenMeteoSource::new(client, config)),
        ))
    }

    pub fn state(&self) -> RequestState {
        self.lock().clone()
    }

    pub async fn search(
        &self,
        city: Option<&str>,
        zip: Option<&str>,
    ) -> Result<DisplayModel, LookupError> {
        self.submit(&LocationQuery::new(city, zip)).await
    }

    /// Rejected with [`LookupError::Busy`] while another submission is running.
    pub async fn submit(&self, query: &LocationQuery) -> Result<DisplayModel, LookupError> {
        let mut in_flight = self.begin()?;

        let outcome = self.run(query).await;
        match &outcome {
            Ok(model) => {
                tracing::info!(name = %model.name, "search finished");
                in_flight.finish(RequestState::Idle);
            }
            Err(err) => {
                tracing::info!(error = %err, "search failed");
                in_flight.finish(RequestState::Failed(err.to_string()));
            }
        }

        outcome
    }

    async fn run(&self, query: &LocationQuery) -> Result<DisplayModel, LookupError> {
        let location = self.resolver.resolve(query).await?;

        self.transition(RequestState::Fetching);
        let weather = self.source.fetch(&location).await?;

        self.transition(RequestState::Presenting);
        Ok(present::present(&weather))
    }

    fn begin(&self) -> Result<InFlight<'_>, LookupError> {
        let mut state = self.lock();
        if state.is_busy() {
            tracing::warn!(state = ?*state, "search rejected, another one is in progress");
            return Err(LookupError::Busy);
        }

        *state = RequestState::Resolving;
        tracing::debug!(state = ?*state, "search started");
        Ok(InFlight { lookup: self, done: false })
    }

    fn transition(&self, next: RequestState) {
        tracing::debug!(state = ?next, "search state");
        *self.lock() = next;
    }

    fn lock(&self) -> MutexGuard<'_, RequestState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the lookup to `Idle` if a running search is dropped before it finishes.
struct InFlight<'a> {
    lookup: &'a WeatherLookup,
    done: bool,
}

impl InFlight<'_> {
    fn finish(&mut self, state: RequestState) {
        self.lookup.transition(state);
        self.done = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done {
            self.lookup.transition(RequestState::Idle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LocationData, WeatherData};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct FixedResolver(Option<LocationData>);

    #[async_trait]
    impl LocationResolver for FixedResolver {
        async fn resolve(&self, query: &LocationQuery) -> Result<LocationData, LookupError> {
            if query.is_empty() {
                return Err(LookupError::Input);
            }
            self.0.clone().ok_or(LookupError::NotFound)
        }
    }

    #[derive(Debug, Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherSource for CountingSource {
        async fn fetch(&self, location: &LocationData) -> Result<WeatherData, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(WeatherData::observed(location, 21.5, Some(0), None))
        }
    }

    fn lookup(location: Option<LocationData>) -> WeatherLookup {
        WeatherLookup::new(Box::new(FixedResolver(location)), Box::new(CountingSource::default()))
    }

    #[tokio::test]
    async fn success_returns_to_idle() {
        let lookup = lookup(Some(LocationData::new(1.0, 2.0, Some("Somewhere".into()))));

        let model = lookup.search(Some("Somewhere"), None).await.unwrap();

        assert_eq!(model.name, "Somewhere");
        assert_eq!(model.temperature, "22 °C");
        assert_eq!(model.description, "Clear sky");
        assert_eq!(lookup.state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn failure_is_recorded_until_next_submission() {
        let lookup = lookup(None);

        let err = lookup.search(Some("Atlantis"), None).await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound));
        assert_eq!(lookup.state(), RequestState::Failed("no location found".into()));

        let err = lookup.search(None, None).await.unwrap_err();
        assert!(matches!(err, LookupError::Input));
        assert_eq!(
            lookup.state(),
            RequestState::Failed("please provide a postal code and/or city".into())
        );
    }

    #[test]
    fn busy_states() {
        assert!(!RequestState::Idle.is_busy());
        assert!(RequestState::Resolving.is_busy());
        assert!(RequestState::Fetching.is_busy());
        assert!(RequestState::Presenting.is_busy());
        assert!(!RequestState::Failed("x".into()).is_busy());
    }

    #[test]
    fn dropped_submission_releases_the_lookup() {
        let lookup = lookup(None);
        {
            let _guard = lookup.begin().unwrap();
            assert_eq!(lookup.state(), RequestState::Resolving);
            assert!(matches!(lookup.begin(), Err(LookupError::Busy)));
        }
        assert_eq!(lookup.state(), RequestState::Idle);
    }

    #[test]
    fn builds_from_default_config() {
        assert!(WeatherLookup::from_config(&Config::default()).is_ok());
    }
}
