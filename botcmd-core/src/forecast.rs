//! 3-hourly forecast samples by coordinate.

use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{CommandError, Result},
    http::{FetchError, get_json},
};

/// One forecast record. Temperatures are in Kelvin.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temp_kelvin: f64,
    pub temp_min_kelvin: f64,
    pub temp_max_kelvin: f64,
    pub sky: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl TryFrom<OwForecastEntry> for ForecastSample {
    type Error = CommandError;

    fn try_from(entry: OwForecastEntry) -> Result<Self> {
        let sky = entry.weather.into_iter().next().map(|w| w.description).ok_or_else(|| {
            CommandError::MalformedUpstreamPayload(format!(
                "forecast record at {} has no weather description",
                entry.dt
            ))
        })?;

        Ok(Self {
            timestamp: entry.dt,
            temp_kelvin: entry.main.temp,
            temp_min_kelvin: entry.main.temp_min,
            temp_max_kelvin: entry.main.temp_max,
            sky,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    http: Client,
    url: String,
    api_key: String,
}

impl ForecastFetcher {
    pub fn new(http: Client, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { http, url: url.into(), api_key: api_key.into() }
    }

    /// Samples in provider order (ascending time). Never empty on success.
    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Result<Vec<ForecastSample>> {
        tracing::debug!(latitude, longitude, "fetching forecast");

        let query = [
            ("lat", format!("{latitude:.5}")),
            ("lon", format!("{longitude:.5}")),
            ("appid", self.api_key.clone()),
        ];

        let res: OwForecastResponse =
            get_json(&self.http, &self.url, &query).await.map_err(|e| match e {
                FetchError::Decode(e) => {
                    CommandError::ForecastFetch(format!("malformed payload: {e}"))
                }
                other => CommandError::ForecastFetch(other.to_string()),
            })?;

        tracing::debug!(samples = res.list.len(), "forecast received");
        decode_samples(res.list)
    }
}

fn decode_samples(entries: Vec<OwForecastEntry>) -> Result<Vec<ForecastSample>> {
    if entries.is_empty() {
        return Err(CommandError::ForecastFetch("forecast contained no samples".to_string()));
    }

    entries.into_iter().map(ForecastSample::try_from).collect()
}
