use async_trait::async_trait;

use crate::{
    ClientMessage, CommandMessage,
    aggregate::aggregate,
    command::{Command, Executor},
    config::ServiceId,
    error::{CommandError, Result},
    forecast::ForecastFetcher,
    format::render_weather,
    http::build_client,
    resolver::LocationTimeResolver,
    units::split_unit,
};

/// `weather <place> [c|f]`: current conditions plus a per-day forecast.
#[derive(Debug, Default)]
pub struct WeatherCommand {
    service: Option<WeatherService>,
}

#[derive(Debug, Clone)]
struct WeatherService {
    resolver: LocationTimeResolver,
    forecasts: Option<ForecastFetcher>,
}

impl WeatherCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Command for WeatherCommand {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["w"]
    }

    fn init(&mut self, executor: &dyn Executor) -> Result<()> {
        let http = build_client(executor.request_timeout())?;
        let endpoints = executor.endpoints();

        let forecasts = executor
            .api_key(ServiceId::OpenWeather)
            .map(|key| ForecastFetcher::new(http.clone(), &endpoints.forecast, key));
        if forecasts.is_none() {
            tracing::debug!(
                service = %ServiceId::OpenWeather,
                "no API key configured; weather command will fail"
            );
        }

        self.service = Some(WeatherService {
            resolver: LocationTimeResolver::new(http, endpoints),
            forecasts,
        });
        Ok(())
    }

    async fn execute(&self, command: &CommandMessage) -> Result<Vec<ClientMessage>> {
        if command.args().is_empty() {
            return Ok(Vec::new());
        }

        let (unit, place) = split_unit(command.args());
        if place.is_empty() {
            return Err(CommandError::MissingArguments);
        }

        let service = self.service.as_ref().ok_or(CommandError::NotInitialized("weather"))?;
        let forecasts = service
            .forecasts
            .as_ref()
            .ok_or_else(|| CommandError::MissingApiKey(ServiceId::OpenWeather.to_string()))?;

        let located = service.resolver.resolve(&place.join(" ")).await?;
        let samples =
            forecasts.fetch(located.location.latitude, located.location.longitude).await?;
        let forecast = aggregate(located.location.label(), located.local_time.now, &samples)?;

        Ok(vec![ClientMessage::reply_to(render_weather(&forecast, unit), command)])
    }
}
