//! Forward geocoding: free-text place name to coordinates.

use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{CommandError, Result},
    http::{FetchError, get_json},
};

/// A resolved place. Lives for one command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Split a comma separated display name: first segment is the place, last is the country.
    pub fn from_display_name(display_name: &str, latitude: f64, longitude: f64) -> Self {
        let mut parts = display_name.split(',');
        let name = parts.next().unwrap_or_default().to_string();
        let country = parts.next_back().map_or_else(|| name.trim(), str::trim).to_string();

        Self { name, country, latitude, longitude }
    }

    /// "{name}, {country}"
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingPlace {
    display_name: String,
    lat: String,
    lon: String,
}

#[derive(Debug, Clone)]
pub struct LocationResolver {
    http: Client,
    url: String,
}

impl LocationResolver {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }

    /// Resolve `search` to the first match the geocoder returns.
    pub async fn resolve(&self, search: &str) -> Result<Location> {
        tracing::debug!(search, "geocoding");

        let places: Vec<GeocodingPlace> =
            get_json(&self.http, &self.url, &[("q", search.to_string())])
                .await
                .map_err(|e| match e {
                    FetchError::Decode(e) => CommandError::MalformedUpstreamPayload(format!(
                        "geocoding response: {e}"
                    )),
                    other => CommandError::Geocoding(other.to_string()),
                })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| CommandError::LocationNotFound(search.to_string()))?;

        let latitude = parse_coordinate(&place.lat, "lat")?;
        let longitude = parse_coordinate(&place.lon, "lon")?;

        Ok(Location::from_display_name(&place.display_name, latitude, longitude))
    }
}

fn parse_coordinate(raw: &str, field: &str) -> Result<f64> {
    raw.trim().parse().map_err(|_| {
        CommandError::MalformedUpstreamPayload(format!("geocoding {field} '{raw}' is not a number"))
    })
}
