//! Current local time at a coordinate.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{CommandError, Result},
    http::get_json,
};

const LOCAL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Wall-clock time at a location, interpreted in the offset valid at lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalTime {
    pub time_zone: String,
    pub now: DateTime<FixedOffset>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeZoneResponse {
    time_zone: String,
    current_local_time: String,
    current_utc_offset: UtcOffset,
}

#[derive(Debug, Deserialize)]
struct UtcOffset {
    seconds: i32,
}

#[derive(Debug, Clone)]
pub struct TimezoneResolver {
    http: Client,
    url: String,
}

impl TimezoneResolver {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self { http, url: url.into() }
    }

    pub async fn resolve(&self, latitude: f64, longitude: f64) -> Result<LocalTime> {
        tracing::debug!(latitude, longitude, "looking up timezone");

        let query = [
            ("latitude", format!("{latitude:.15}")),
            ("longitude", format!("{longitude:.15}")),
        ];

        let res: TimeZoneResponse = get_json(&self.http, &self.url, &query)
            .await
            .map_err(|e| CommandError::TimezoneLookup(e.to_string()))?;

        parse_local_time(&res.time_zone, &res.current_local_time, res.current_utc_offset.seconds)
    }
}

/// Build a fixed-offset clock and read `local` (no zone suffix) in it.
pub fn parse_local_time(time_zone: &str, local: &str, offset_secs: i32) -> Result<LocalTime> {
    let offset = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
        CommandError::TimezoneLookup(format!("UTC offset {offset_secs}s is out of range"))
    })?;

    let naive = NaiveDateTime::parse_from_str(local, LOCAL_TIME_FORMAT).map_err(|e| {
        CommandError::TimezoneLookup(format!("unparsable local time '{local}': {e}"))
    })?;

    let now = offset.from_local_datetime(&naive).single().ok_or_else(|| {
        CommandError::TimezoneLookup(format!("local time '{local}' is ambiguous"))
    })?;

    Ok(LocalTime { time_zone: time_zone.to_string(), now })
}
