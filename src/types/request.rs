//! The wire-level request accepted by [`crate::WeatherSim`].

use crate::error::WeatherSimError;
use crate::types::aggregation::Aggregation;
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use crate::types::variable::VariableKind;
use serde::{Deserialize, Serialize};

/// An unvalidated weather request, as a front-end would post it.
///
/// Dates are ISO `YYYY-MM-DD` strings. `variable` and `aggregation` are
/// optional and default to `temperature` and `daily`; the variable may also
/// be given under the key `metric`.
///
/// # Examples
///
/// ```
/// use weathersim::{Aggregation, VariableKind, WeatherRequest};
///
/// let request: WeatherRequest = serde_json::from_str(
///     r#"{"latitude": -17.78, "longitude": -63.18,
///         "start_date": "2024-01-01", "end_date": "2024-01-31",
///         "metric": "wind"}"#,
/// ).unwrap();
/// let parsed = request.parse().unwrap();
/// assert_eq!(parsed.variable, VariableKind::WindSpeed);
/// assert_eq!(parsed.aggregation, Aggregation::Daily);
/// assert_eq!(parsed.range.days(), 31);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: String,
    pub end_date: String,
    #[serde(default, alias = "metric", skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
}

/// A validated [`WeatherRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedRequest {
    pub location: Location,
    pub range: DateRange,
    pub variable: VariableKind,
    pub aggregation: Aggregation,
}

impl WeatherRequest {
    pub fn new(
        latitude: f64,
        longitude: f64,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            start_date: start_date.into(),
            end_date: end_date.into(),
            variable: None,
            aggregation: None,
        }
    }

    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = Some(variable.into());
        self
    }

    pub fn with_aggregation(mut self, aggregation: impl Into<String>) -> Self {
        self.aggregation = Some(aggregation.into());
        self
    }

    /// Validates every field.
    ///
    /// # Errors
    ///
    /// * [`WeatherSimError::InvalidLocation`] for coordinates out of range.
    /// * [`WeatherSimError::DateParsing`] for dates that are not `YYYY-MM-DD`.
    /// * [`WeatherSimError::InvalidRange`] if the start is after the end.
    /// * [`WeatherSimError::UnsupportedVariable`] or
    ///   [`WeatherSimError::UnsupportedAggregation`] for unknown names.
    pub fn parse(&self) -> Result<ParsedRequest, WeatherSimError> {
        let location = Location::new(self.latitude, self.longitude)?;
        let range = DateRange::new(self.start_date.as_str(), self.end_date.as_str())?;
        let variable = match &self.variable {
            Some(name) => name.parse()?,
            None => VariableKind::default(),
        };
        let aggregation = match &self.aggregation {
            Some(name) => name.parse()?,
            None => Aggregation::default(),
        };
        Ok(ParsedRequest {
            location,
            range,
            variable,
            aggregation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let parsed = WeatherRequest::new(10.0, 20.0, "2024-01-01", "2024-01-07")
            .parse()
            .unwrap();
        assert_eq!(parsed.variable, VariableKind::Temperature);
        assert_eq!(parsed.aggregation, Aggregation::Daily);
        assert_eq!(parsed.range.days(), 7);
    }

    #[test]
    fn test_unknown_variable() {
        let err = WeatherRequest::new(10.0, 20.0, "2024-01-01", "2024-01-07")
            .with_variable("visibility")
            .parse()
            .unwrap_err();
        assert!(matches!(err, WeatherSimError::UnsupportedVariable(name) if name == "visibility"));
    }

    #[test]
    fn test_unknown_aggregation() {
        let err = WeatherRequest::new(10.0, 20.0, "2024-01-01", "2024-01-07")
            .with_aggregation("hourly")
            .parse()
            .unwrap_err();
        assert!(matches!(err, WeatherSimError::UnsupportedAggregation(_)));
    }

    #[test]
    fn test_invalid_fields() {
        let base = WeatherRequest::new(10.0, 20.0, "2024-01-01", "2024-01-07");
        assert!(matches!(
            WeatherRequest { latitude: 95.0, ..base.clone() }.parse(),
            Err(WeatherSimError::InvalidLocation { .. })
        ));
        assert!(matches!(
            WeatherRequest { start_date: "01/01/2024".into(), ..base.clone() }.parse(),
            Err(WeatherSimError::DateParsing)
        ));
        assert!(matches!(
            WeatherRequest { start_date: "2024-02-01".into(), ..base }.parse(),
            Err(WeatherSimError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_deserializes_front_end_body() {
        let request: WeatherRequest = serde_json::from_str(
            r#"{"latitude": 1.5, "longitude": 2.5, "start_date": "2024-01-01",
                "end_date": "2024-12-31", "variable": "uv", "aggregation": "monthly"}"#,
        )
        .unwrap();
        let parsed = request.parse().unwrap();
        assert_eq!(parsed.variable, VariableKind::UvIndex);
        assert_eq!(parsed.aggregation, Aggregation::Monthly);
    }
}
