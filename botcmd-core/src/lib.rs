//! Core library for the `botcmd` chat-bot commands.
//!
//! This crate defines:
//! - The host boundary (`Command`, `Executor`, messages) and an explicit command table
//! - Configuration & credentials handling
//! - The weather/time pipeline: geocoding, timezone lookup, forecast fetch,
//!   per-day aggregation and text rendering
//!
//! It is used by `botcmd-cli`, but any chat host can assemble a
//! [`CommandRegistry`] from [`builtin_commands`] and dispatch to it.

pub mod aggregate;
pub mod command;
pub mod commands;
pub mod config;
pub mod error;
pub mod forecast;
pub mod format;
pub mod geocode;
mod http;
pub mod message;
pub mod resolver;
pub mod timezone;
pub mod units;

pub use command::{Command, CommandRegistry, Executor, builtin_commands};
pub use commands::{TimeCommand, WeatherCommand};
pub use config::{Config, Endpoints, ServiceConfig, ServiceId};
pub use error::CommandError;
pub use message::{ClientMessage, CommandMessage, User};
pub use units::TemperatureUnit;
