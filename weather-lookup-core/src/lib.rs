//! Core library for the `weather-lookup` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The upstream provider abstraction and its OpenWeather implementation
//! - Shaping of upstream data into snapshots and daily forecast points
//! - The search state machine that decides which view to render
//!
//! It is used by `weather-lookup-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod forecast;
pub mod icon;
pub mod model;
pub mod provider;
pub mod search;
pub mod state;

pub use config::Config;
pub use error::WeatherError;
pub use icon::IconCategory;
pub use model::{CurrentConditions, ForecastEntry, ForecastPoint, WeatherSnapshot};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use search::{SearchOutcome, WeatherService};
pub use state::{Action, Effect, SearchState, View, reducer};
