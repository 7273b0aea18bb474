use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherSimError {
    #[error("Start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Coordinates ({latitude}, {longitude}) are outside [-90, 90] x [-180, 180]")]
    InvalidLocation { latitude: f64, longitude: f64 },

    // Terminal for the request: no series or metric can be produced
    #[error("Unsupported weather variable '{0}'")]
    UnsupportedVariable(String),

    #[error("Unsupported aggregation '{0}'")]
    UnsupportedAggregation(String),

    #[error("Failed to parse date, expected YYYY-MM-DD")]
    DateParsing,
}
