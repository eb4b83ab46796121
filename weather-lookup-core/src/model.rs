use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::icon::IconCategory;

/// Current conditions as reported upstream, before any shaping.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub condition_code: i32,
    pub condition: String,
}

/// One 3-hour forecast entry, timestamped in the city's wall-clock time.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub local_time: NaiveDateTime,
    pub temperature_c: f64,
    pub condition_code: i32,
}

/// Result of a successful current-weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub country: String,
    pub temp: i32,
    pub condition: String,
    pub humidity: u8,
    pub wind_speed: f64,
    pub icon: IconCategory,
    pub date: String,
}

impl WeatherSnapshot {
    pub fn from_conditions(current: &CurrentConditions, today: NaiveDate) -> Self {
        Self {
            country: current.location_name.clone(),
            temp: round_temp(current.temperature_c),
            condition: current.condition.clone(),
            humidity: current.humidity_pct,
            wind_speed: current.wind_speed_mps,
            icon: IconCategory::from_code(current.condition_code),
            date: today.format("%a %d %b").to_string(),
        }
    }
}

/// One forecast day, sampled at midday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: String,
    pub icon: IconCategory,
    pub temp: i32,
}

impl From<&ForecastEntry> for ForecastPoint {
    fn from(entry: &ForecastEntry) -> Self {
        Self {
            date: entry.local_time.format("%d %b").to_string(),
            icon: IconCategory::from_code(entry.condition_code),
            temp: round_temp(entry.temperature_c),
        }
    }
}

/// Round half up, so -2.5 becomes -2 and 15.5 becomes 16.
///
/// Compares against `floor(x)` because `floor(x + 0.5)` rounds 0.49999999999999994 up.
pub fn round_temp(celsius: f64) -> i32 {
    let floor = celsius.floor();
    let rounded = if celsius - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i32
}
