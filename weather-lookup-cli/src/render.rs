//! Plain-text rendering of the three views.

use weather_lookup_core::{ForecastPoint, View, WeatherSnapshot};

const COLUMN: usize = 9;

pub fn render(view: &View<'_>) -> String {
    match view {
        View::NotFound => message("✖", "City Not Found", "Please try searching again"),
        View::Prompt => message(
            "🔍",
            "Search City",
            "Find out the weather conditions of the city",
        ),
        View::Weather { snapshot, forecast } => weather(snapshot, forecast),
    }
}

fn message(glyph: &str, title: &str, detail: &str) -> String {
    format!("\n  {glyph}  {title}\n     {detail}\n")
}

fn weather(snapshot: &WeatherSnapshot, forecast: &[ForecastPoint]) -> String {
    let mut out = format!(
        "\n  📍 {:<24}{}\n\n     {}  {} °C\n        {}\n\n  Humidity    {}%\n  Wind Speed  {} M/s\n",
        snapshot.country,
        snapshot.date,
        snapshot.icon.glyph(),
        snapshot.temp,
        snapshot.condition,
        snapshot.humidity,
        snapshot.wind_speed,
    );

    if !forecast.is_empty() {
        let dates = strip(forecast, |p| p.date.clone());
        let icons = strip(forecast, |p| p.icon.glyph().to_string());
        let temps = strip(forecast, |p| format!("{} °C", p.temp));
        out.push_str(&format!("\n  {dates}\n  {icons}\n  {temps}\n"));
    }

    out
}

/// One forecast row, each day left-aligned in a fixed-width column.
fn strip(forecast: &[ForecastPoint], cell: impl Fn(&ForecastPoint) -> String) -> String {
    let row: String = forecast
        .iter()
        .map(|p| format!("{:<COLUMN$}", cell(p)))
        .collect();
    row.trim_end().to_string()
}
