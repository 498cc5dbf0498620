//! Commands exposed to the host.

pub mod time;
pub mod weather;

pub use time::TimeCommand;
pub use weather::WeatherCommand;
