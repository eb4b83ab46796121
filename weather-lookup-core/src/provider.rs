use crate::{
    Config,
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::debug;

pub mod openweather;

/// Upstream source of current conditions and the 3-hour forecast for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `weather-lookup configure`, pass --api-key, or set OPENWEATHER_API_KEY."
        )
    })?;

    let provider = OpenWeatherProvider::new(api_key.to_owned()).with_base_url(config.base_url());
    debug!(base_url = provider.base_url(), "using OpenWeather provider");
    Ok(Box::new(provider))
}
