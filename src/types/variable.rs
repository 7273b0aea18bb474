//! Defines the closed set of weather variables this crate can produce.

use crate::error::WeatherSimError;
use crate::generator::transform::SeriesTransform;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A weather variable with a physical unit and a valid output range.
///
/// Parsing accepts the kebab-case names (`wind-speed`, `uv-index`, ...) as well
/// as the short forms `wind` and `uv`.
///
/// # Examples
///
/// ```
/// use weathersim::VariableKind;
///
/// let kind: VariableKind = "uv".parse().unwrap();
/// assert_eq!(kind, VariableKind::UvIndex);
/// assert_eq!(kind.valid_range(), (0.0, 11.0));
/// assert!("visibility".parse::<VariableKind>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum VariableKind {
    /// Air temperature in °C.
    #[default]
    Temperature = 0,
    /// Relative humidity in %.
    Humidity = 1,
    /// Wind speed in km/h.
    #[serde(alias = "wind")]
    WindSpeed = 2,
    /// Atmospheric pressure in hPa.
    Pressure = 3,
    /// UV index, unitless.
    #[serde(alias = "uv")]
    UvIndex = 4,
    /// Air quality index.
    AirQuality = 5,
    /// Chance of precipitation in %.
    Precipitation = 6,
}

impl VariableKind {
    pub const ALL: [VariableKind; 7] = [
        VariableKind::Temperature,
        VariableKind::Humidity,
        VariableKind::WindSpeed,
        VariableKind::Pressure,
        VariableKind::UvIndex,
        VariableKind::AirQuality,
        VariableKind::Precipitation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            VariableKind::Temperature => "temperature",
            VariableKind::Humidity => "humidity",
            VariableKind::WindSpeed => "wind-speed",
            VariableKind::Pressure => "pressure",
            VariableKind::UvIndex => "uv-index",
            VariableKind::AirQuality => "air-quality",
            VariableKind::Precipitation => "precipitation",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            VariableKind::Temperature => "°C",
            VariableKind::Humidity => "%",
            VariableKind::WindSpeed => "km/h",
            VariableKind::Pressure => "hPa",
            VariableKind::UvIndex => "",
            VariableKind::AirQuality => "AQI",
            VariableKind::Precipitation => "%",
        }
    }

    /// The inclusive `(min, max)` range every generated series value lies in.
    pub fn valid_range(&self) -> (f64, f64) {
        let transform = SeriesTransform::lookup(*self);
        (transform.min, transform.max)
    }

    /// Field names this variable may carry in an external results payload.
    ///
    /// Empty when external data never provides the variable.
    pub(crate) fn external_fields(&self) -> &'static [&'static str] {
        match self {
            VariableKind::Temperature => &["temperature", "Temperatura (°C)"],
            VariableKind::Humidity => &["humidity", "Humedad (%)"],
            VariableKind::WindSpeed => &["wind_speed", "Viento (km/h)"],
            VariableKind::Pressure => &["pressure", "PresionAtm (hPa)"],
            VariableKind::Precipitation => &["precipitation", "Precipitacion (%)"],
            VariableKind::UvIndex | VariableKind::AirQuality => &[],
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for VariableKind {
    type Err = WeatherSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "temperature" => Ok(VariableKind::Temperature),
            "humidity" => Ok(VariableKind::Humidity),
            "wind-speed" | "wind" => Ok(VariableKind::WindSpeed),
            "pressure" => Ok(VariableKind::Pressure),
            "uv-index" | "uv" => Ok(VariableKind::UvIndex),
            "air-quality" => Ok(VariableKind::AirQuality),
            "precipitation" => Ok(VariableKind::Precipitation),
            _ => Err(WeatherSimError::UnsupportedVariable(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_parse() {
        for kind in VariableKind::ALL {
            assert_eq!(kind.name().parse::<VariableKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_variable_is_unsupported() {
        let err = "snow-depth".parse::<VariableKind>().unwrap_err();
        assert!(matches!(err, WeatherSimError::UnsupportedVariable(name) if name == "snow-depth"));
    }

    #[test]
    fn test_serde_aliases() {
        let kind: VariableKind = serde_json::from_str("\"wind\"").unwrap();
        assert_eq!(kind, VariableKind::WindSpeed);
        let kind: VariableKind = serde_json::from_str("\"air-quality\"").unwrap();
        assert_eq!(kind, VariableKind::AirQuality);
        assert_eq!(serde_json::to_string(&VariableKind::UvIndex).unwrap(), "\"uv-index\"");
    }

    #[test]
    fn test_external_fields() {
        assert!(VariableKind::UvIndex.external_fields().is_empty());
        assert!(VariableKind::AirQuality.external_fields().is_empty());
        assert_eq!(VariableKind::Pressure.external_fields()[1], "PresionAtm (hPa)");
    }
}
