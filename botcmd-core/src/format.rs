use chrono::{DateTime, FixedOffset};

use crate::{aggregate::Forecast, geocode::Location, units::TemperatureUnit};

/// Render a forecast, one line per following day, temperatures to one decimal.
pub fn render_weather(forecast: &Forecast, unit: TemperatureUnit) -> String {
    let mut text = format!(
        "Showing weather for {}\nCurrent: {:.1}°{unit} - {}\n",
        forecast.location_label,
        unit.convert(forecast.current.temp_kelvin),
        forecast.current.sky,
    );

    for day in &forecast.following_days {
        text.push_str(&format!(
            "{}: {:.1}°{unit} to {:.1}°{unit} -- {}\n",
            day.weekday,
            unit.convert(day.temp_min_kelvin),
            unit.convert(day.temp_max_kelvin),
            day.sky,
        ));
    }

    text
}

/// "{hh:mm:ss AM} - {name}, {country}"
pub fn render_time(local: &DateTime<FixedOffset>, location: &Location) -> String {
    format!("{} - {}", local.format("%I:%M:%S %p"), location.label())
}
