//! Defines the [`Location`] a request is generated for.

use crate::error::WeatherSimError;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate picked by the user.
///
/// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]`. A `Location`
/// is immutable; selecting a new point on the map means creating a new one.
///
/// # Examples
///
/// ```
/// use weathersim::Location;
///
/// let la_paz = Location::new(-16.5, -68.15).unwrap();
/// assert_eq!(la_paz.latitude(), -16.5);
/// assert_eq!(la_paz.longitude(), -68.15);
///
/// assert!(Location::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawLocation> for Location {
    type Error = WeatherSimError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Location::new(raw.latitude, raw.longitude)
    }
}

impl Location {
    /// Creates a new `Location`, validating both coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherSimError::InvalidLocation`] when either coordinate is
    /// outside its range or not a finite number.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WeatherSimError> {
        let lat_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let lon_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);
        if !lat_ok || !lon_ok {
            return Err(WeatherSimError::InvalidLocation {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Normalized distance from the equator, `|latitude| / 90`, in `[0, 1]`.
    pub fn lat_factor(&self) -> f64 {
        self.latitude.abs() / 90.0
    }

    /// Normalized longitude, `(longitude + 180) / 360`, in `[0, 1]`.
    pub fn lon_factor(&self) -> f64 {
        (self.longitude + 180.0) / 360.0
    }
}
