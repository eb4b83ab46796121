use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    config::DEFAULT_BASE_URL,
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry},
};

use super::WeatherProvider;

const CURRENT: &str = "weather";
const FORECAST: &str = "forecast";

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}/{endpoint}` for a city and decode the payload.
    ///
    /// A `cod` other than 200 means not found, whatever the HTTP status says.
    /// `/weather` must carry a numeric `cod`; `/forecast` may omit it.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        city: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&[("q", city), ("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|source| WeatherError::Request { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Request { endpoint, source })?;

        debug!(%status, bytes = body.len(), "upstream responded");

        match serde_json::from_str::<OwEnvelope>(&body).ok().and_then(|e| e.cod) {
            Some(cod) if cod.is_success_for(endpoint) => {}
            Some(cod) => {
                warn!(code = %cod, "upstream rejected city");
                return Err(WeatherError::NotFound {
                    city: city.to_string(),
                    code: cod.to_string(),
                });
            }
            None if !status.is_success() => {
                return Err(WeatherError::Status {
                    endpoint,
                    status,
                    body: truncate_body(&body),
                });
            }
            None if endpoint == CURRENT => {
                return Err(WeatherError::MissingData { endpoint, field: "cod" });
            }
            None => {}
        }

        serde_json::from_str(&body).map_err(|e| WeatherError::Parse {
            endpoint,
            reason: e.to_string(),
        })
    }
}

/// `cod` is a number on `/weather` success, a string on `/forecast` and on most failures.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OwCode {
    Number(i64),
    Text(String),
}

impl OwCode {
    /// Only the numeric 200 counts on `/weather`; `/forecast` reports it as text.
    fn is_success_for(&self, endpoint: &str) -> bool {
        match self {
            OwCode::Number(n) => *n == 200,
            OwCode::Text(s) => endpoint == FORECAST && s.trim() == "200",
        }
    }
}

impl std::fmt::Display for OwCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwCode::Number(n) => write!(f, "{n}"),
            OwCode::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwEnvelope {
    cod: Option<OwCode>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i32,
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastWeather {
    id: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwForecastWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl TryFrom<OwCurrentResponse> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let weather = parsed.weather.into_iter().next().ok_or(WeatherError::MissingData {
            endpoint: CURRENT,
            field: "weather[0]",
        })?;

        Ok(CurrentConditions {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            condition_code: weather.id,
            condition: weather.main,
        })
    }
}

impl TryFrom<&OwForecastEntry> for ForecastEntry {
    type Error = WeatherError;

    fn try_from(entry: &OwForecastEntry) -> Result<Self, Self::Error> {
        let local_time = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT).map_err(
            |e| WeatherError::Parse {
                endpoint: FORECAST,
                reason: format!("invalid dt_txt '{}': {e}", entry.dt_txt),
            },
        )?;

        let weather = entry.weather.first().ok_or(WeatherError::MissingData {
            endpoint: FORECAST,
            field: "list[].weather[0]",
        })?;

        Ok(ForecastEntry {
            local_time,
            temperature_c: entry.main.temp,
            condition_code: weather.id,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let parsed: OwCurrentResponse = self.fetch(CURRENT, city).await?;
        CurrentConditions::try_from(parsed)
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
        let parsed: OwForecastResponse = self.fetch(FORECAST, city).await?;
        parsed.list.iter().map(ForecastEntry::try_from).collect()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
