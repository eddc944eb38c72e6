use std::fmt;

use reqwest::StatusCode;

/// Upstream service a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Geocoding,
    Weather,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Geocoding => "geocoding service",
            Service::Weather => "weather service",
        }
    }

    /// User-facing message for a failed request against this service.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Service::Geocoding => "location search failed",
            Service::Weather => "failed to fetch weather data",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every way a single weather lookup can fail. All of them end the request.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("please provide a postal code and/or city")]
    Input,

    #[error("{}", .service.failure_message())]
    Network {
        service: Service,
        status: Option<StatusCode>,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("no location found")]
    NotFound,

    #[error("postal code and city do not match exactly")]
    NoExactMatch,

    #[error("no current weather data found")]
    Data,

    #[error("invalid response from the {service}")]
    Decode {
        service: Service,
        #[source]
        source: serde_json::Error,
    },

    #[error("a search is already in progress")]
    Busy,
}

impl LookupError {
    pub(crate) fn transport(service: Service, source: reqwest::Error) -> Self {
        LookupError::Network { service, status: source.status(), source: Some(source) }
    }

    pub(crate) fn status(service: Service, status: StatusCode) -> Self {
        LookupError::Network { service, status: Some(status), source: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_message_depends_on_service() {
        let geo = LookupError::status(Service::Geocoding, StatusCode::INTERNAL_SERVER_ERROR);
        let wx = LookupError::status(Service::Weather, StatusCode::BAD_GATEWAY);

        assert_eq!(geo.to_string(), "location search failed");
        assert_eq!(wx.to_string(), "failed to fetch weather data");
    }

    #[test]
    fn decode_error_names_the_service() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = LookupError::Decode { service: Service::Weather, source };

        assert_eq!(err.to_string(), "invalid response from the weather service");
    }
}
