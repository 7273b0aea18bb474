//! The point generator: one "current conditions" snapshot per call.

use crate::generator::jitter::UnitSource;
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use crate::types::snapshot::Snapshot;
use crate::types::variable::VariableKind;
use crate::types::weather_condition::Condition;
use crate::utils::{round1, round_to};
use log::debug;
use std::collections::BTreeMap;

/// Coordinate-derived base values, before any jitter is applied.
///
/// Only the latitude factor feeds the formulas. The longitude factor is kept
/// alongside so both normalized coordinates stay visible, but it must not be
/// folded into the bases: snapshot values are defined by latitude alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotBase {
    pub lat_factor: f64,
    pub lon_factor: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub uv_index: f64,
    pub precipitation: f64,
}

impl SnapshotBase {
    pub fn at(location: &Location) -> Self {
        let lf = location.lat_factor();
        Self {
            lat_factor: lf,
            lon_factor: location.lon_factor(),
            temperature: 25.0 + lf * 15.0 - lf * 20.0,
            humidity: 50.0 + lf * 30.0,
            pressure: 1013.0 + lf * 50.0,
            wind_speed: 5.0 + lf * 10.0,
            uv_index: 3.0 + lf * 8.0,
            precipitation: 20.0 + lf * 40.0,
        }
    }
}

// Jitter spreads, in draw order
const TEMPERATURE_SPREAD: f64 = 10.0;
const HUMIDITY_SPREAD: f64 = 20.0;
const PRESSURE_SPREAD: f64 = 30.0;
const WIND_SPREAD: f64 = 5.0;
const UV_SPREAD: f64 = 3.0;
const PRECIPITATION_SPREAD: f64 = 30.0;

fn jitter<R: UnitSource + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    (rng.next_unit() - 0.5) * spread
}

/// Simplified air quality index in `[0, 100]`; higher is worse.
///
/// Low pressure, high humidity, calm wind and strong UV all push the index up.
pub fn air_quality_index(pressure: f64, humidity: f64, wind_speed: f64, uv_index: f64) -> f64 {
    let pressure_factor = ((1013.0 - pressure) / 100.0).max(0.0);
    let humidity_factor = ((humidity - 50.0) / 50.0).max(0.0);
    let wind_factor = ((10.0 - wind_speed) / 10.0).max(0.0);
    let uv_factor = uv_index / 15.0;

    let aqi = 20.0
        + pressure_factor * 20.0
        + humidity_factor * 15.0
        + wind_factor * 25.0
        + uv_factor * 20.0;
    aqi.round().clamp(0.0, 100.0)
}

/// Generates a snapshot of current conditions for `location`.
///
/// Each variable is its coordinate-derived base plus a uniform jitter
/// `(U - 0.5) * spread`, rounded to one decimal (pressure and air quality to
/// whole numbers). The draws happen in a fixed order: temperature, humidity,
/// pressure, wind speed, UV index, precipitation. Air quality is derived from
/// the drawn values and consumes no draw. The condition is derived from the
/// same values with [`Condition::derive`].
///
/// `date_range` does not influence the values; it is carried into the result.
///
/// # Examples
///
/// ```
/// use weathersim::{generate_snapshot, ConstantSource, DateRange, Location, VariableKind};
///
/// let equator = Location::new(0.0, 10.0).unwrap();
/// let range = DateRange::new("2024-06-01", "2024-06-07").unwrap();
///
/// // A constant 0.5 cancels the jitter and leaves the base values.
/// let snapshot = generate_snapshot(&equator, &range, &mut ConstantSource::new(0.5));
/// assert_eq!(snapshot.get(VariableKind::Temperature), Some(25.0));
/// assert_eq!(snapshot.get(VariableKind::Humidity), Some(50.0));
/// assert_eq!(snapshot.get(VariableKind::Pressure), Some(1013.0));
/// ```
pub fn generate_snapshot<R: UnitSource + ?Sized>(
    location: &Location,
    date_range: &DateRange,
    rng: &mut R,
) -> Snapshot {
    let base = SnapshotBase::at(location);

    let temperature = round1(base.temperature + jitter(rng, TEMPERATURE_SPREAD));
    let humidity = round1(base.humidity + jitter(rng, HUMIDITY_SPREAD));
    let pressure = round_to(base.pressure + jitter(rng, PRESSURE_SPREAD), 0);
    let wind_speed = round1(base.wind_speed + jitter(rng, WIND_SPREAD));
    let uv_index = round1(base.uv_index + jitter(rng, UV_SPREAD));
    let precipitation = round1(base.precipitation + jitter(rng, PRECIPITATION_SPREAD));
    let air_quality = air_quality_index(pressure, humidity, wind_speed, uv_index);

    let condition = Condition::derive(temperature, humidity, precipitation);
    debug!(
        "Generated snapshot at ({}, {}) lat_factor={:.3} lon_factor={:.3}: {}",
        location.latitude(),
        location.longitude(),
        base.lat_factor,
        base.lon_factor,
        condition
    );

    let values = BTreeMap::from([
        (VariableKind::Temperature, temperature),
        (VariableKind::Humidity, humidity),
        (VariableKind::WindSpeed, wind_speed),
        (VariableKind::Pressure, pressure),
        (VariableKind::UvIndex, uv_index),
        (VariableKind::AirQuality, air_quality),
        (VariableKind::Precipitation, precipitation),
    ]);
    Snapshot::new(values, condition, *location, *date_range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::jitter::ConstantSource;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn range() -> DateRange {
        DateRange::new("2024-01-01", "2024-01-10").unwrap()
    }

    /// Replays a fixed sequence of draws.
    struct Sequence(Vec<f64>, usize);

    impl UnitSource for Sequence {
        fn next_unit(&mut self) -> f64 {
            let value = self.0[self.1 % self.0.len()];
            self.1 += 1;
            value
        }
    }

    #[test]
    fn test_equator_base_values() {
        let base = SnapshotBase::at(&Location::new(0.0, 0.0).unwrap());
        assert_eq!(base.temperature, 25.0);
        assert_eq!(base.humidity, 50.0);
        assert_eq!(base.pressure, 1013.0);
        assert_eq!(base.wind_speed, 5.0);
        assert_eq!(base.uv_index, 3.0);
        assert_eq!(base.precipitation, 20.0);
    }

    #[test]
    fn test_pole_base_values() {
        let base = SnapshotBase::at(&Location::new(-90.0, 0.0).unwrap());
        assert_eq!(base.lat_factor, 1.0);
        assert_eq!(base.temperature, 20.0);
        assert_eq!(base.humidity, 80.0);
        assert_eq!(base.pressure, 1063.0);
        assert_eq!(base.wind_speed, 15.0);
        assert_eq!(base.uv_index, 11.0);
        assert_eq!(base.precipitation, 60.0);
    }

    #[test]
    fn test_longitude_does_not_change_values() {
        let west = generate_snapshot(
            &Location::new(30.0, -170.0).unwrap(),
            &range(),
            &mut ConstantSource::new(0.5),
        );
        let east = generate_snapshot(
            &Location::new(30.0, 170.0).unwrap(),
            &range(),
            &mut ConstantSource::new(0.5),
        );
        assert_eq!(west.values(), east.values());
        assert_ne!(
            SnapshotBase::at(&west.location()).lon_factor,
            SnapshotBase::at(&east.location()).lon_factor
        );
    }

    #[test]
    fn test_zero_draws_shift_down_by_half_spread() {
        let snapshot = generate_snapshot(
            &Location::new(0.0, 0.0).unwrap(),
            &range(),
            &mut ConstantSource::zero(),
        );
        assert_eq!(snapshot.get(VariableKind::Temperature), Some(20.0));
        assert_eq!(snapshot.get(VariableKind::Humidity), Some(40.0));
        assert_eq!(snapshot.get(VariableKind::Pressure), Some(998.0));
        assert_eq!(snapshot.get(VariableKind::WindSpeed), Some(2.5));
        assert_eq!(snapshot.get(VariableKind::UvIndex), Some(1.5));
        assert_eq!(snapshot.get(VariableKind::Precipitation), Some(5.0));
        // 20 + 0.15*20 + 0 + 0.75*25 + 0.1*20 = 43.75
        assert_eq!(snapshot.get(VariableKind::AirQuality), Some(44.0));
        assert_eq!(snapshot.condition(), Condition::CloudyAndSunny);
    }

    #[test]
    fn test_draw_order() {
        // temperature, humidity, pressure, wind, uv, precipitation
        let mut draws = Sequence(vec![1.0, 0.5, 0.5, 0.5, 0.5, 0.5], 0);
        let snapshot = generate_snapshot(&Location::new(0.0, 0.0).unwrap(), &range(), &mut draws);
        assert_eq!(snapshot.get(VariableKind::Temperature), Some(30.0));
        assert_eq!(snapshot.get(VariableKind::Humidity), Some(50.0));
        assert_eq!(draws.1, 6);
    }

    #[test]
    fn test_condition_uses_generated_values() {
        // Precipitation draw at the top of its band at the pole: 60 + 15 = 75 > 70
        let mut draws = Sequence(vec![0.5, 0.5, 0.5, 0.5, 0.5, 1.0], 0);
        let snapshot = generate_snapshot(&Location::new(90.0, 0.0).unwrap(), &range(), &mut draws);
        assert_eq!(snapshot.get(VariableKind::Precipitation), Some(75.0));
        assert_eq!(snapshot.condition(), Condition::Rainy);
    }

    #[test]
    fn test_random_snapshots_stay_in_jitter_bands() {
        let mut rng = StdRng::seed_from_u64(42);
        let location = Location::new(52.37, 4.9).unwrap();
        let base = SnapshotBase::at(&location);
        for _ in 0..200 {
            let snapshot = generate_snapshot(&location, &range(), &mut rng);
            let temperature = snapshot.get(VariableKind::Temperature).unwrap();
            assert!((temperature - base.temperature).abs() <= 5.05);
            let pressure = snapshot.get(VariableKind::Pressure).unwrap();
            assert_eq!(pressure, pressure.round());
            let aqi = snapshot.get(VariableKind::AirQuality).unwrap();
            assert!((0.0..=100.0).contains(&aqi));
        }
    }

    #[test]
    fn test_air_quality_index() {
        assert_eq!(air_quality_index(1013.0, 50.0, 10.0, 0.0), 20.0);
        // Every factor maxed out far beyond the clamp
        assert_eq!(air_quality_index(0.0, 100.0, 0.0, 15.0), 100.0);
    }

    #[test]
    fn test_date_range_is_carried() {
        let snapshot = generate_snapshot(
            &Location::new(10.0, 10.0).unwrap(),
            &range(),
            &mut ConstantSource::new(0.5),
        );
        assert_eq!(snapshot.date_range(), range());
    }
}
