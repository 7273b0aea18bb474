//! Defines the `Condition` enum, the qualitative sky description derived from a
//! snapshot's temperature, humidity and precipitation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The qualitative weather condition shown next to a snapshot.
///
/// Serializes to the human-readable label, e.g. `"Partly Cloudy"`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Condition {
    /// Hot and dry.
    Sunny,
    /// Warm with moderate humidity.
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    /// Very humid.
    Cloudy,
    /// Cold.
    Overcast,
    /// High chance of precipitation.
    Rainy,
    /// Anything that matches none of the other conditions.
    #[serde(rename = "Cloudy & Sunny")]
    CloudyAndSunny,
}

impl Condition {
    /// Derives the condition from a set of current values.
    ///
    /// The checks form a strict priority chain evaluated top to bottom, the
    /// first match wins:
    ///
    /// 1. precipitation > 70 → [`Condition::Rainy`]
    /// 2. temperature > 30 and humidity < 40 → [`Condition::Sunny`]
    /// 3. temperature > 25 and humidity < 60 → [`Condition::PartlyCloudy`]
    /// 4. humidity > 70 → [`Condition::Cloudy`]
    /// 5. temperature < 15 → [`Condition::Overcast`]
    /// 6. otherwise → [`Condition::CloudyAndSunny`]
    ///
    /// # Arguments
    ///
    /// * `temperature`: Temperature in °C.
    /// * `humidity`: Relative humidity in %.
    /// * `precipitation`: Chance of precipitation in %.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weathersim::Condition;
    ///
    /// // Rain wins even though the values would also qualify as sunny.
    /// assert_eq!(Condition::derive(35.0, 20.0, 80.0), Condition::Rainy);
    /// assert_eq!(Condition::derive(35.0, 20.0, 10.0), Condition::Sunny);
    /// assert_eq!(Condition::derive(20.0, 65.0, 10.0), Condition::CloudyAndSunny);
    /// ```
    pub fn derive(temperature: f64, humidity: f64, precipitation: f64) -> Self {
        if precipitation > 70.0 {
            Condition::Rainy
        } else if temperature > 30.0 && humidity < 40.0 {
            Condition::Sunny
        } else if temperature > 25.0 && humidity < 60.0 {
            Condition::PartlyCloudy
        } else if humidity > 70.0 {
            Condition::Cloudy
        } else if temperature < 15.0 {
            Condition::Overcast
        } else {
            Condition::CloudyAndSunny
        }
    }

    /// The label as displayed to users.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::PartlyCloudy => "Partly Cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::Overcast => "Overcast",
            Condition::Rainy => "Rainy",
            Condition::CloudyAndSunny => "Cloudy & Sunny",
        }
    }

    /// Attempts to read a condition from its label, ignoring case.
    ///
    /// # Returns
    ///
    /// * `Some(Condition)` if `label` matches one of the known labels.
    /// * `None` otherwise.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        [
            Condition::Sunny,
            Condition::PartlyCloudy,
            Condition::Cloudy,
            Condition::Overcast,
            Condition::Rainy,
            Condition::CloudyAndSunny,
        ]
        .into_iter()
        .find(|condition| condition.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_takes_priority() {
        assert_eq!(Condition::derive(35.0, 20.0, 80.0), Condition::Rainy);
        assert_eq!(Condition::derive(10.0, 90.0, 70.1), Condition::Rainy);
    }

    #[test]
    fn test_priority_chain() {
        assert_eq!(Condition::derive(31.0, 39.0, 0.0), Condition::Sunny);
        // Sunny fails on humidity, falls through to partly cloudy
        assert_eq!(Condition::derive(31.0, 45.0, 0.0), Condition::PartlyCloudy);
        assert_eq!(Condition::derive(26.0, 75.0, 0.0), Condition::Cloudy);
        assert_eq!(Condition::derive(10.0, 75.0, 0.0), Condition::Cloudy);
        assert_eq!(Condition::derive(10.0, 50.0, 0.0), Condition::Overcast);
        assert_eq!(Condition::derive(20.0, 50.0, 70.0), Condition::CloudyAndSunny);
    }

    #[test]
    fn test_boundaries_are_strict() {
        assert_eq!(Condition::derive(30.0, 39.0, 0.0), Condition::PartlyCloudy);
        assert_eq!(Condition::derive(25.0, 50.0, 0.0), Condition::CloudyAndSunny);
        assert_eq!(Condition::derive(15.0, 70.0, 0.0), Condition::CloudyAndSunny);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Condition::CloudyAndSunny.to_string(), "Cloudy & Sunny");
        assert_eq!(Condition::from_label("partly cloudy"), Some(Condition::PartlyCloudy));
        assert_eq!(Condition::from_label("Hail"), None);
        assert_eq!(
            serde_json::to_string(&Condition::PartlyCloudy).unwrap(),
            "\"Partly Cloudy\""
        );
    }
}
