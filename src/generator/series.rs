//! The series generator: walks a date range at a given aggregation and emits
//! one labelled synthetic value per step.

use crate::generator::jitter::UnitSource;
use crate::generator::transform::SeriesTransform;
use crate::types::aggregation::Aggregation;
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use crate::types::series::{Series, WeatherPoint};
use crate::types::variable::VariableKind;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::debug;
use std::f64::consts::PI;

/// Reference base every raw value is scaled from, whatever the variable.
const REFERENCE_BASE: f64 = 25.0;

/// `1 + 0.3 * sin(2π * day_of_year / 365)`, with a zero-based day of year.
pub(crate) fn seasonal_factor(date: NaiveDate) -> f64 {
    let day_of_year = f64::from(date.ordinal0());
    1.0 + 0.3 * (day_of_year / 365.0 * 2.0 * PI).sin()
}

/// `1 + 0.2 * sin(2π * hour / 24)`.
///
/// Date walks always sit at midnight, which makes this exactly 1. It is still
/// evaluated for every point so cursors that carry a time of day stay covered.
pub(crate) fn daily_factor(cursor: NaiveDateTime) -> f64 {
    let hour = f64::from(cursor.hour());
    1.0 + 0.2 * (hour / 24.0 * 2.0 * PI).sin()
}

/// Builds the raw, variable-independent value for one point.
///
/// `random_factor` is the per-point draw in `[0.8, 1.2)`. Weekly and monthly
/// points draw a second, narrower factor; yearly points use the seasonal
/// factor only.
fn raw_value<R: UnitSource + ?Sized>(
    aggregation: Aggregation,
    seasonal: f64,
    daily: f64,
    random_factor: f64,
    rng: &mut R,
) -> f64 {
    match aggregation {
        Aggregation::Daily => REFERENCE_BASE * seasonal * daily * random_factor,
        Aggregation::Weekly => REFERENCE_BASE * seasonal * (0.9 + rng.next_unit() * 0.2),
        Aggregation::Monthly => REFERENCE_BASE * seasonal * (0.95 + rng.next_unit() * 0.1),
        Aggregation::Yearly => REFERENCE_BASE * seasonal,
    }
}

/// A lazy, single-pass walk over a date range producing [`WeatherPoint`]s.
///
/// Created by [`SeriesWalk::new`]; [`generate_series`] collects one into a
/// [`Series`]. The walk borrows the random source for its whole lifetime and
/// cannot be restarted.
pub struct SeriesWalk<'r, R: UnitSource + ?Sized> {
    range: DateRange,
    variable: VariableKind,
    aggregation: Aggregation,
    transform: &'static SeriesTransform,
    step: u32,
    done: bool,
    rng: &'r mut R,
}

impl<'r, R: UnitSource + ?Sized> SeriesWalk<'r, R> {
    pub fn new(
        range: &DateRange,
        variable: VariableKind,
        aggregation: Aggregation,
        rng: &'r mut R,
    ) -> Self {
        Self {
            range: *range,
            variable,
            aggregation,
            transform: SeriesTransform::lookup(variable),
            step: 0,
            done: range.start > range.end,
            rng,
        }
    }

    pub fn variable(&self) -> VariableKind {
        self.variable
    }

    fn point_at(&mut self, cursor: NaiveDate) -> WeatherPoint {
        let seasonal = seasonal_factor(cursor);
        let daily = daily_factor(cursor.and_time(NaiveTime::MIN));
        let random_factor = 0.8 + self.rng.next_unit() * 0.4;
        let raw = raw_value(self.aggregation, seasonal, daily, random_factor, &mut *self.rng);

        WeatherPoint {
            label: self.aggregation.label(cursor),
            value: self.transform.apply(raw, random_factor),
        }
    }
}

impl<R: UnitSource + ?Sized> Iterator for SeriesWalk<'_, R> {
    type Item = WeatherPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let cursor = match self.aggregation.nth_step(self.range.start, self.step) {
            Some(cursor) if cursor <= self.range.end => cursor,
            _ => {
                self.done = true;
                return None;
            }
        };
        self.step = match self.step.checked_add(1) {
            Some(step) => step,
            None => {
                self.done = true;
                self.step
            }
        };
        Some(self.point_at(cursor))
    }
}

impl<R: UnitSource + ?Sized> std::iter::FusedIterator for SeriesWalk<'_, R> {}

/// Generates a synthetic series for one variable over a date range.
///
/// Starting at `range.start`, one point is emitted per aggregation step
/// (+1 day, +7 days, +1 month, +1 year) while the cursor does not exceed
/// `range.end`. An inverted range yields an empty series. For each point:
///
/// * `seasonal = 1 + 0.3 * sin(2π * day_of_year / 365)` (zero-based day of year)
/// * `daily = 1 + 0.2 * sin(2π * hour / 24)`, exactly 1 for date walks
/// * `random_factor = 0.8 + 0.4 * U`
/// * a raw value `25 * seasonal * ...` blended per aggregation
/// * the variable's fixed transform, rounding and clamp
///
/// The series formulas do not depend on the location; it is only logged.
///
/// # Examples
///
/// ```
/// use weathersim::{generate_series, Aggregation, DateRange, Location, VariableKind};
///
/// let location = Location::new(-17.78, -63.18).unwrap();
/// let range = DateRange::new("2024-01-01", "2024-03-31").unwrap();
/// let series = generate_series(
///     &location,
///     &range,
///     VariableKind::Humidity,
///     Aggregation::Monthly,
///     &mut rand::rng(),
/// );
/// assert_eq!(series.labels(), vec!["Jan '24", "Feb '24", "Mar '24"]);
/// assert!(series.values().iter().all(|v| (0.0..=100.0).contains(v)));
/// ```
pub fn generate_series<R: UnitSource + ?Sized>(
    location: &Location,
    range: &DateRange,
    variable: VariableKind,
    aggregation: Aggregation,
    rng: &mut R,
) -> Series {
    let series: Series = SeriesWalk::new(range, variable, aggregation, rng).collect();
    debug!(
        "Generated {} {} {} points at ({}, {}) for {}",
        series.len(),
        aggregation,
        variable,
        location.latitude(),
        location.longitude(),
        range
    );
    series
}
