use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::{Config, model::Coordinates};

/// Errors raised while resolving coordinates from the geolocation service.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("could not reach the geolocation service: {0}")]
    Network(#[from] reqwest::Error),

    #[error("geolocation service answered with status {0}")]
    Status(StatusCode),

    #[error("geolocation response was not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("geolocation response carried no location")]
    MissingLocation,

    #[error("could not parse coordinates from {0:?}")]
    BadCoordinates(String),
}

/// Resolves the caller's approximate coordinates from an IP-geolocation
/// endpoint (ipinfo.io by default).
///
/// One outbound request per [`IpLocator::resolve`] call; no retries and no
/// state kept between calls.
#[derive(Debug, Clone)]
pub struct IpLocator {
    endpoint: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    loc: Option<String>,
}

impl IpLocator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LocationError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LocationError> {
        Self::new(config.location_url.clone(), config.request_timeout())
    }

    /// Resolve the caller's coordinates.
    ///
    /// Succeeds only on HTTP 200 with a non-empty `loc` field of the form
    /// `"<lat>,<lon>"`.
    pub async fn resolve(&self) -> Result<Coordinates, LocationError> {
        debug!(endpoint = %self.endpoint, "resolving coordinates from IP address");

        let response = self.http.get(&self.endpoint).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LocationError::Status(status));
        }

        let body = response.text().await?;
        let geo: GeoResponse = serde_json::from_str(&body)?;

        let loc = geo
            .loc
            .filter(|loc| !loc.is_empty())
            .ok_or(LocationError::MissingLocation)?;

        parse_loc(&loc)
    }
}

/// Parse a `"<lat>,<lon>"` string. Latitude comes first in the source field.
fn parse_loc(loc: &str) -> Result<Coordinates, LocationError> {
    let (lat, lon) = loc
        .split_once(',')
        .ok_or_else(|| LocationError::BadCoordinates(loc.to_owned()))?;

    let latitude = lat
        .trim()
        .parse()
        .map_err(|_| LocationError::BadCoordinates(loc.to_owned()))?;
    let longitude = lon
        .trim()
        .parse()
        .map_err(|_| LocationError::BadCoordinates(loc.to_owned()))?;

    Ok(Coordinates {
        latitude,
        longitude,
    })
}
