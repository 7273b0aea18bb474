//! Defines the inclusive [`DateRange`] a request covers.

use crate::error::WeatherSimError;
use crate::types::traits::any_date::AnyDate;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive range of calendar dates.
///
/// Ranges built through [`DateRange::new`] always satisfy `start <= end`.
/// The generators also accept ranges built with [`DateRange::unchecked`]; an
/// inverted range simply produces an empty series there.
///
/// # Examples
///
/// ```
/// use weathersim::DateRange;
///
/// let range = DateRange::new("2024-01-01", "2024-01-31").unwrap();
/// assert_eq!(range.days(), 31);
/// assert!(DateRange::new("2024-02-01", "2024-01-01").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = WeatherSimError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a validated date range from anything that reads as a date.
    ///
    /// # Errors
    ///
    /// * [`WeatherSimError::DateParsing`] if either bound cannot be read as a date.
    /// * [`WeatherSimError::InvalidRange`] if `start` is after `end`.
    pub fn new(start: impl AnyDate, end: impl AnyDate) -> Result<Self, WeatherSimError> {
        let start = start.get_date().ok_or(WeatherSimError::DateParsing)?;
        let end = end.get_date().ok_or(WeatherSimError::DateParsing)?;
        if start > end {
            return Err(WeatherSimError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range without checking the order of its bounds.
    pub fn unchecked(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range covering one single day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, counting both ends. Zero for inverted ranges.
    pub fn days(&self) -> u64 {
        let span = (self.end - self.start).num_days();
        if span < 0 {
            0
        } else {
            span as u64 + 1
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}
