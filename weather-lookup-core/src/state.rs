//! Search state and the view it selects.
//!
//! `reducer` is the only place state changes. Network work is requested by
//! returning an [`Effect`]; its result comes back as another [`Action`].

use serde::Serialize;

use crate::{
    model::{ForecastPoint, WeatherSnapshot},
    search::SearchOutcome,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Text currently in the input field.
    pub city: String,
    pub snapshot: Option<WeatherSnapshot>,
    pub forecast: Vec<ForecastPoint>,
    pub error: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The input field changed.
    CityInput(String),
    /// Search button or Enter.
    Submit,
    SearchDidLoad(SearchOutcome),
    SearchDidFail,
}

/// Side effects requested by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Search { city: String },
}

/// What to render, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View<'a> {
    NotFound,
    Weather {
        snapshot: &'a WeatherSnapshot,
        forecast: &'a [ForecastPoint],
    },
    Prompt,
}

impl SearchState {
    pub fn view(&self) -> View<'_> {
        if self.error {
            return View::NotFound;
        }
        match &self.snapshot {
            Some(snapshot) => View::Weather {
                snapshot,
                forecast: &self.forecast,
            },
            None => View::Prompt,
        }
    }
}

pub fn reducer(state: &mut SearchState, action: Action) -> Option<Effect> {
    match action {
        Action::CityInput(text) => {
            state.city = text;
            None
        }

        Action::Submit => {
            let city = state.city.trim();
            if city.is_empty() {
                return None;
            }
            let effect = Effect::Search {
                city: city.to_string(),
            };
            // input clears now, whatever the outcome
            state.city.clear();
            Some(effect)
        }

        Action::SearchDidLoad(outcome) => {
            state.snapshot = Some(outcome.snapshot);
            state.forecast = outcome.forecast;
            state.error = false;
            None
        }

        Action::SearchDidFail => {
            state.snapshot = None;
            state.forecast.clear();
            state.error = true;
            None
        }
    }
}
