//! Defines the time-bucketing granularity of a generated series.

use crate::error::WeatherSimError;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The time granularity of a [`crate::Series`].
///
/// The aggregation decides both how far the date cursor advances between two
/// points and how each point is labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// One point per day, labelled like `Jan 5`.
    #[default]
    Daily,
    /// One point every seven days, labelled like `Week 1 Jan`.
    Weekly,
    /// One point per calendar month, labelled like `Jan '24`.
    Monthly,
    /// One point per calendar year, labelled like `2024`.
    Yearly,
}

impl Aggregation {
    pub const ALL: [Aggregation; 4] = [
        Aggregation::Daily,
        Aggregation::Weekly,
        Aggregation::Monthly,
        Aggregation::Yearly,
    ];

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Aggregation::Daily => "daily",
            Aggregation::Weekly => "weekly",
            Aggregation::Monthly => "monthly",
            Aggregation::Yearly => "yearly",
        }
    }

    /// Returns the date `n` steps after `start`, or `None` once chrono can no
    /// longer represent it.
    ///
    /// Month and year steps are always measured from `start` itself, so a walk
    /// starting on the 31st visits the last day of shorter months and returns to
    /// the 31st afterwards instead of drifting.
    pub fn nth_step(&self, start: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Aggregation::Daily => start.checked_add_days(Days::new(u64::from(n))),
            Aggregation::Weekly => start.checked_add_days(Days::new(u64::from(n) * 7)),
            Aggregation::Monthly => start.checked_add_months(Months::new(n)),
            Aggregation::Yearly => start.checked_add_months(Months::new(n.checked_mul(12)?)),
        }
    }

    /// Formats `date` as a chart label for this aggregation.
    ///
    /// Formatting only depends on the date, never on locale or timezone.
    ///
    /// # Examples
    ///
    /// ```
    /// use weathersim::Aggregation;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// assert_eq!(Aggregation::Daily.label(date), "Mar 15");
    /// assert_eq!(Aggregation::Weekly.label(date), "Week 3 Mar");
    /// assert_eq!(Aggregation::Monthly.label(date), "Mar '24");
    /// assert_eq!(Aggregation::Yearly.label(date), "2024");
    /// ```
    pub fn label(&self, date: NaiveDate) -> String {
        match self {
            Aggregation::Daily => date.format("%b %-d").to_string(),
            Aggregation::Weekly => {
                format!("Week {} {}", date.day().div_ceil(7), date.format("%b"))
            }
            Aggregation::Monthly => date.format("%b '%y").to_string(),
            Aggregation::Yearly => date.format("%Y").to_string(),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Aggregation {
    type Err = WeatherSimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Aggregation::Daily),
            "weekly" => Ok(Aggregation::Weekly),
            "monthly" => Ok(Aggregation::Monthly),
            "yearly" => Ok(Aggregation::Yearly),
            _ => Err(WeatherSimError::UnsupportedAggregation(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_steps() {
        let start = date(2024, 1, 31);
        assert_eq!(Aggregation::Daily.nth_step(start, 1), Some(date(2024, 2, 1)));
        assert_eq!(Aggregation::Weekly.nth_step(start, 2), Some(date(2024, 2, 14)));
        assert_eq!(Aggregation::Monthly.nth_step(start, 1), Some(date(2024, 2, 29)));
        assert_eq!(Aggregation::Monthly.nth_step(start, 2), Some(date(2024, 3, 31)));
        assert_eq!(Aggregation::Yearly.nth_step(date(2024, 2, 29), 1), Some(date(2025, 2, 28)));
        assert_eq!(Aggregation::Yearly.nth_step(date(2024, 2, 29), 4), Some(date(2028, 2, 29)));
    }

    #[test]
    fn test_step_zero_is_start() {
        let start = date(2023, 7, 9);
        for aggregation in Aggregation::ALL {
            assert_eq!(aggregation.nth_step(start, 0), Some(start));
        }
    }

    #[test]
    fn test_step_past_representable_range() {
        assert_eq!(Aggregation::Yearly.nth_step(NaiveDate::MAX, 1), None);
        assert_eq!(Aggregation::Daily.nth_step(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Aggregation::Daily.label(date(2024, 1, 5)), "Jan 5");
        assert_eq!(Aggregation::Weekly.label(date(2024, 1, 7)), "Week 1 Jan");
        assert_eq!(Aggregation::Weekly.label(date(2024, 1, 8)), "Week 2 Jan");
        assert_eq!(Aggregation::Weekly.label(date(2024, 12, 31)), "Week 5 Dec");
        assert_eq!(Aggregation::Monthly.label(date(2009, 11, 1)), "Nov '09");
        assert_eq!(Aggregation::Yearly.label(date(2031, 6, 1)), "2031");
    }

    #[test]
    fn test_monthly_label_is_stable() {
        let d = date(2024, 10, 18);
        let first = Aggregation::Monthly.label(d);
        let second = Aggregation::Monthly.label(d);
        assert_eq!(first, second);
        assert_eq!(first, "Oct '24");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Weekly".parse::<Aggregation>().unwrap(), Aggregation::Weekly);
        assert!(matches!(
            "hourly".parse::<Aggregation>(),
            Err(WeatherSimError::UnsupportedAggregation(name)) if name == "hourly"
        ));
        assert_eq!(Aggregation::Yearly.to_string(), "yearly");
    }
}
