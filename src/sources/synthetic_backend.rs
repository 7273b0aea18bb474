//! An in-process stand-in for the results backend.
//!
//! Produces the data the backend script writes: one record per day with weekly
//! and seasonal oscillations, plus the averaged aggregates and the most
//! frequent condition. Serialized, the payload uses the backend's `forecast`
//! and `current_weather` keys.

use crate::generator::jitter::UnitSource;
use crate::generator::snapshot::{air_quality_index, SnapshotBase};
use crate::sources::error::SourceError;
use crate::sources::payload::{ExternalPayload, ExternalRecord};
use crate::sources::{ExternalSource, FetchRequest};
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use crate::types::weather_condition::Condition;
use crate::utils::{mean, round1, round_to};
use async_trait::async_trait;
use chrono::Days;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Map, Value};
use std::f64::consts::PI;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DailyValues {
    temperature: f64,
    humidity: f64,
    pressure: f64,
    wind_speed: f64,
    uv_index: f64,
    air_quality: f64,
}

fn daily_values<R: UnitSource + ?Sized>(base: &SnapshotBase, day: u64, rng: &mut R) -> DailyValues {
    let day = day as f64;
    let weekly = (day * 2.0 * PI / 7.0).sin();
    let seasonal = (day * 2.0 * PI / 365.0).sin();
    // Uniform in [0.8, 1.2), centred so that `r - 1` spans ±0.2
    let r = 0.8 + rng.next_unit() * 0.4 - 1.0;

    let temperature =
        round1(base.temperature + weekly * 5.0 + seasonal * 3.0 + r * 10.0).clamp(-10.0, 45.0);
    let humidity =
        round1(base.humidity + weekly * 10.0 + seasonal * 5.0 + r * 20.0).clamp(10.0, 100.0);
    let pressure = round_to(base.pressure + weekly * 20.0 + seasonal * 10.0 + r * 30.0, 0)
        .clamp(950.0, 1050.0);
    let wind_speed =
        round1(base.wind_speed + weekly * 3.0 + seasonal * 2.0 + r * 5.0).clamp(0.0, 50.0);
    let uv_index = round1(base.uv_index + weekly * 2.0 + seasonal + r * 3.0).clamp(0.0, 15.0);
    let air_quality = air_quality_index(pressure, humidity, wind_speed, uv_index);

    DailyValues {
        temperature,
        humidity,
        pressure,
        wind_speed,
        uv_index,
        air_quality,
    }
}

fn most_common(conditions: &[Condition]) -> Option<Condition> {
    let mut best: Option<(Condition, usize)> = None;
    for condition in conditions {
        let count = conditions.iter().filter(|c| *c == condition).count();
        // Ties go to the condition seen first
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((*condition, count));
        }
    }
    best.map(|(condition, _)| condition)
}

/// Builds a backend-style payload for `range` at `location`.
///
/// Every day of the range gets one record; an inverted range yields an empty
/// payload. Aggregates hold the rounded means and the most frequent condition.
///
/// # Examples
///
/// ```
/// use weathersim::{generate_backend_payload, DateRange, Location};
///
/// let payload = generate_backend_payload(
///     &Location::new(-16.5, -68.15).unwrap(),
///     &DateRange::new("2024-01-01", "2024-01-07").unwrap(),
///     &mut rand::rng(),
/// );
/// assert_eq!(payload.records.len(), 7);
/// assert!(payload.aggregates.is_some());
/// ```
pub fn generate_backend_payload<R: UnitSource + ?Sized>(
    location: &Location,
    range: &DateRange,
    rng: &mut R,
) -> ExternalPayload {
    let base = SnapshotBase::at(location);
    let mut days = Vec::new();
    for i in 0..range.days() {
        let Some(date) = range.start.checked_add_days(Days::new(i)) else {
            break;
        };
        days.push((date, daily_values(&base, i, rng)));
    }

    let conditions: Vec<Condition> = days
        .iter()
        .map(|(_, v)| Condition::derive(v.temperature, v.humidity, 0.0))
        .collect();

    let records = days
        .iter()
        .zip(&conditions)
        .map(|((date, v), condition)| {
            let fields = json!({
                "temperature": v.temperature,
                "humidity": v.humidity,
                "pressure": v.pressure,
                "wind_speed": v.wind_speed,
                "uv_index": v.uv_index,
                "air_quality": v.air_quality,
                "condition": condition.label(),
                "coordinates": {
                    "latitude": location.latitude(),
                    "longitude": location.longitude(),
                },
            });
            ExternalRecord {
                date: date.format("%Y-%m-%d").to_string(),
                fields: match fields {
                    Value::Object(map) => map,
                    _ => Map::new(),
                },
            }
        })
        .collect();

    let aggregates = if days.is_empty() {
        None
    } else {
        let avg = |select: fn(&DailyValues) -> f64, decimals: u32| {
            mean(days.iter().map(|(_, v)| select(v))).map(|m| round_to(m, decimals))
        };
        let mut map = Map::new();
        map.insert("temperature".into(), json!(avg(|v| v.temperature, 1)));
        map.insert("humidity".into(), json!(avg(|v| v.humidity, 1)));
        map.insert("pressure".into(), json!(avg(|v| v.pressure, 0)));
        map.insert("wind_speed".into(), json!(avg(|v| v.wind_speed, 1)));
        map.insert("uv_index".into(), json!(avg(|v| v.uv_index, 1)));
        map.insert("air_quality".into(), json!(avg(|v| v.air_quality, 0)));
        if let Some(condition) = most_common(&conditions) {
            map.insert("condition".into(), json!(condition.label()));
        }
        Some(map)
    };

    ExternalPayload {
        records,
        aggregates,
    }
}

/// An [`ExternalSource`] answering every request with
/// [`generate_backend_payload`].
///
/// Useful to exercise the external-data path of the selector without a
/// running backend.
#[derive(Debug)]
pub struct SyntheticBackend {
    rng: Mutex<StdRng>,
}

impl SyntheticBackend {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

#[async_trait]
impl ExternalSource for SyntheticBackend {
    fn name(&self) -> &str {
        "synthetic-backend"
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<ExternalPayload, SourceError> {
        let location = Location::new(request.latitude, request.longitude)
            .map_err(|e| SourceError::Rejected(e.to_string()))?;
        let range = request.range();
        if range.start > range.end {
            return Err(SourceError::Rejected(format!("inverted range {range}")));
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| SourceError::Rejected("backend generator poisoned".to_string()))?;
        let payload = generate_backend_payload(&location, &range, &mut *rng);
        debug!("Synthetic backend produced {} records", payload.records.len());
        Ok(payload)
    }
}
