//! Defines the [`Snapshot`] of current conditions for one location.

use crate::types::date_range::DateRange;
use crate::types::location::Location;
use crate::types::variable::VariableKind;
use crate::types::weather_condition::Condition;
use serde::Serialize;
use std::collections::BTreeMap;

/// "Current conditions" for one location and date range.
///
/// Holds one value per reported [`VariableKind`] and the derived [`Condition`].
/// A snapshot built from external aggregates may lack some variables, so
/// values are looked up with [`Snapshot::get`].
///
/// Serializes the values flat next to `condition`, `location` and `date_range`:
///
/// ```json
/// { "temperature": 24.1, "humidity": 52.3, ..., "condition": "Cloudy & Sunny", ... }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(flatten)]
    values: BTreeMap<VariableKind, f64>,
    condition: Condition,
    location: Location,
    date_range: DateRange,
}

impl Snapshot {
    pub(crate) fn new(
        values: BTreeMap<VariableKind, f64>,
        condition: Condition,
        location: Location,
        date_range: DateRange,
    ) -> Self {
        Self {
            values,
            condition,
            location,
            date_range,
        }
    }

    pub fn get(&self, kind: VariableKind) -> Option<f64> {
        self.values.get(&kind).copied()
    }

    pub fn values(&self) -> &BTreeMap<VariableKind, f64> {
        &self.values
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }
}
