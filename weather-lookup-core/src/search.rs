//! The fetch pipeline: current conditions first, then the forecast for the
//! same city, reduced to one point per day.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::WeatherError,
    forecast::daily_midday,
    model::{ForecastPoint, WeatherSnapshot},
    provider::WeatherProvider,
    state::{Action, Effect, SearchState, reducer},
};

/// Everything a successful search produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub snapshot: WeatherSnapshot,
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Debug)]
pub struct WeatherService {
    provider: Box<dyn WeatherProvider>,
}

impl WeatherService {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Feed one action through the reducer and run the search it asks for, if any.
    ///
    /// The state already reflects a failed search; the error is returned for reporting.
    pub async fn dispatch(&self, state: &mut SearchState, action: Action) -> Option<WeatherError> {
        self.dispatch_on(state, action, Local::now().date_naive()).await
    }

    pub async fn dispatch_on(
        &self,
        state: &mut SearchState,
        action: Action,
        today: NaiveDate,
    ) -> Option<WeatherError> {
        let Some(Effect::Search { city }) = reducer(state, action) else {
            return None;
        };

        match self.search_on(&city, today).await {
            Ok(outcome) => {
                reducer(state, Action::SearchDidLoad(outcome));
                None
            }
            Err(err) => {
                warn!(%city, error = %err, "search failed");
                reducer(state, Action::SearchDidFail);
                Some(err)
            }
        }
    }

    /// Both requests are sequential; a failing forecast fails the whole search.
    #[instrument(skip(self))]
    pub async fn search_on(
        &self,
        city: &str,
        today: NaiveDate,
    ) -> Result<SearchOutcome, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        let current = self.provider.current(city).await?;
        let snapshot = WeatherSnapshot::from_conditions(&current, today);
        debug!(location = %snapshot.country, temp = snapshot.temp, "current conditions loaded");

        let entries = self.provider.forecast(city).await?;
        let forecast = daily_midday(&entries);
        info!(entries = entries.len(), days = forecast.len(), "forecast reduced");

        Ok(SearchOutcome { snapshot, forecast })
    }
}
