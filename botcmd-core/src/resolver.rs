use reqwest::Client;

use crate::{
    config::Endpoints,
    error::Result,
    geocode::{Location, LocationResolver},
    timezone::{LocalTime, TimezoneResolver},
};

/// A place together with its current local time.
#[derive(Debug, Clone)]
pub struct LocatedTime {
    pub location: Location,
    pub local_time: LocalTime,
}

/// Geocoding followed by timezone lookup. Shared by the weather and time commands.
#[derive(Debug, Clone)]
pub struct LocationTimeResolver {
    locations: LocationResolver,
    timezones: TimezoneResolver,
}

impl LocationTimeResolver {
    pub fn new(http: Client, endpoints: &Endpoints) -> Self {
        Self {
            locations: LocationResolver::new(http.clone(), &endpoints.geocoding),
            timezones: TimezoneResolver::new(http, &endpoints.timezone),
        }
    }

    pub async fn resolve(&self, search: &str) -> Result<LocatedTime> {
        let location = self.locations.resolve(search).await?;
        let local_time = self.timezones.resolve(location.latitude, location.longitude).await?;

        Ok(LocatedTime { location, local_time })
    }
}
