use thiserror::Error;

/// Failures of a single search. The state machine collapses all of them into
/// the "city not found" view; the variants exist for logs and one-shot output.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City name is empty")]
    EmptyCity,

    #[error("City '{city}' not found (upstream code {code})")]
    NotFound { city: String, code: String },

    #[error("{endpoint} request failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse {endpoint} response: {reason}")]
    Parse {
        endpoint: &'static str,
        reason: String,
    },

    #[error("{endpoint} response is missing {field}")]
    MissingData {
        endpoint: &'static str,
        field: &'static str,
    },
}

impl WeatherError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, WeatherError::NotFound { .. })
    }
}
