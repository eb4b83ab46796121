use std::io::Write;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;
use weather_lookup_core::{Action, Config, SearchState, WeatherService, provider_from_config};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "Current weather and forecast for a city")]
pub struct Cli {
    /// OpenWeather API key; takes precedence over the config file.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Search cities from a prompt until Esc or Ctrl-C.
    Interactive,

    /// Show weather for one city and exit.
    Show {
        /// City name, e.g. "London".
        city: String,

        /// Print the selected view as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Interactive => {
                let service = build_service(self.api_key)?;
                interactive(&service).await
            }
            Command::Show { city, json } => {
                let service = build_service(self.api_key)?;
                show(&service, &city, json, &mut std::io::stdout()).await
            }
        }
    }
}

fn build_service(api_key: Option<String>) -> anyhow::Result<WeatherService> {
    let config = Config::load()?.with_api_key_override(api_key);
    let provider = provider_from_config(&config)?;
    Ok(WeatherService::new(provider))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(key);
    let path = config.save()?;
    println!("Saved API key to {}", path.display());

    Ok(())
}

async fn interactive(service: &WeatherService) -> anyhow::Result<()> {
    let mut state = SearchState::default();
    println!("{}", render(&state.view()));

    loop {
        let input = match Text::new("Search City").with_placeholder("e.g. London").prompt() {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                debug!("prompt closed");
                return Ok(());
            }
            Err(err) => return Err(err).context("Failed to read city"),
        };

        service.dispatch(&mut state, Action::CityInput(input)).await;
        let before = state.clone();
        service.dispatch(&mut state, Action::Submit).await;

        if state != before {
            println!("{}", render(&state.view()));
        }
    }
}

/// Run one search, write the view to `out`, and fail if nothing was found.
async fn show(
    service: &WeatherService,
    city: &str,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut state = SearchState::default();
    service.dispatch(&mut state, Action::CityInput(city.to_string())).await;
    let failure = service.dispatch(&mut state, Action::Submit).await;

    if state.snapshot.is_none() && !state.error {
        bail!("City name must not be empty");
    }

    let text = if json {
        serde_json::to_string_pretty(&state.view()).context("Failed to serialize view to JSON")?
    } else {
        render(&state.view())
    };
    writeln!(out, "{text}").context("Failed to write output")?;

    match failure {
        Some(err) if err.is_not_found() => bail!("City '{}' not found", city.trim()),
        Some(err) => Err(err).with_context(|| format!("Search for '{}' failed", city.trim())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use weather_lookup_core::{CurrentConditions, ForecastEntry, WeatherError, WeatherProvider};

    /// Knows every city except "Atlantis"; the forecast is empty.
    #[derive(Debug)]
    struct StubProvider;

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
            if city == "Atlantis" {
                return Err(WeatherError::NotFound {
                    city: city.to_string(),
                    code: "404".into(),
                });
            }
            Ok(CurrentConditions {
                location_name: city.to_string(),
                temperature_c: 15.4,
                humidity_pct: 60,
                wind_speed_mps: 3.2,
                condition_code: 800,
                condition: "Clear".into(),
            })
        }

        async fn forecast(&self, _city: &str) -> Result<Vec<ForecastEntry>, WeatherError> {
            Ok(Vec::new())
        }
    }

    fn stub_service() -> WeatherService {
        WeatherService::new(Box::new(StubProvider))
    }

    async fn run_show(city: &str, json: bool) -> (anyhow::Result<()>, String) {
        let mut out = Vec::new();
        let result = show(&stub_service(), city, json, &mut out).await;
        (result, String::from_utf8(out).expect("utf-8 output"))
    }

    #[tokio::test]
    async fn show_renders_weather() {
        let (result, out) = run_show("London", false).await;

        assert!(result.is_ok());
        assert!(out.contains("London"));
        assert!(out.contains("15 °C"));
    }

    #[tokio::test]
    async fn show_renders_not_found_then_fails() {
        let (result, out) = run_show("Atlantis", false).await;

        assert!(out.contains("City Not Found"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("City 'Atlantis' not found"));
    }

    #[tokio::test]
    async fn show_json_prints_selected_view() {
        let (result, out) = run_show("London", true).await;
        assert!(result.is_ok());

        let value: serde_json::Value = serde_json::from_str(&out).expect("json output");
        assert_eq!(value["view"], "weather");
        assert_eq!(value["snapshot"]["temp"], 15);
    }

    #[tokio::test]
    async fn show_blank_city_writes_nothing() {
        let (result, out) = run_show("   ", false).await;

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather-lookup"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_takes_city_and_json_flag() {
        let cli = Cli::try_parse_from(["weather-lookup", "show", "New York", "--json"])
            .expect("parse");

        match cli.command {
            Some(Command::Show { city, json }) => {
                assert_eq!(city, "New York");
                assert!(json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn api_key_flag_is_global() {
        let cli = Cli::try_parse_from(["weather-lookup", "show", "Oslo", "--api-key", "K"])
            .expect("parse");
        assert_eq!(cli.api_key.as_deref(), Some("K"));
    }

    #[test]
    fn show_requires_city() {
        assert!(Cli::try_parse_from(["weather-lookup", "show"]).is_err());
    }
}
