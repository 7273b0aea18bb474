//! The results payload an external source delivers, and the pure mapping from
//! a payload to a [`Series`].

use crate::sources::error::SourceError;
use crate::types::aggregation::Aggregation;
use crate::types::date_range::DateRange;
use crate::types::series::{Series, WeatherPoint};
use crate::types::traits::any_date::AnyDate;
use crate::types::variable::VariableKind;
use crate::types::weather_condition::Condition;
use crate::utils::mean;
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const DATE_KEYS: [&str; 3] = ["date", "Fecha", "fecha"];

/// Externally supplied weather data: one record per date plus optional
/// precomputed aggregates.
///
/// Serializes with the keys the weather backend answers with (`forecast`,
/// `current_weather`). Also reads the plain English keys (`records`,
/// `aggregates`) and the Spanish keys of the results file (`datos`, `Fecha`,
/// `medias`). Other top-level keys, such as the echoed `location`, are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExternalPayload {
    #[serde(rename = "forecast", alias = "records", alias = "datos", default)]
    pub records: Vec<ExternalRecord>,
    #[serde(
        rename = "current_weather",
        alias = "aggregates",
        alias = "medias",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub aggregates: Option<Map<String, Value>>,
}

/// One dated record of an [`ExternalPayload`]; every other key is a variable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ExternalRecord {
    pub date: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for ExternalRecord {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let date = DATE_KEYS
            .iter()
            .find_map(|key| fields.remove(*key))
            .ok_or_else(|| "record has no date field".to_string())?;
        match date {
            Value::String(date) => Ok(Self { date, fields }),
            other => Err(format!("record date must be a string, got {other}")),
        }
    }
}

/// Reads a number, or a string holding one.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn field_value(fields: &Map<String, Value>, kind: VariableKind) -> Option<f64> {
    kind.external_fields()
        .iter()
        .find_map(|name| fields.get(*name))
        .and_then(as_number)
}

impl ExternalRecord {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_str().get_date()
    }

    pub fn value(&self, kind: VariableKind) -> Option<f64> {
        field_value(&self.fields, kind)
    }
}

impl ExternalPayload {
    /// Parses a payload from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SourceError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Records within `range` (both ends inclusive), in chronological order.
    ///
    /// Records whose date cannot be read are skipped. Records sharing a date
    /// keep their payload order.
    pub fn records_in(&self, range: &DateRange) -> Vec<(NaiveDate, &ExternalRecord)> {
        let mut selected: Vec<(NaiveDate, &ExternalRecord)> = self
            .records
            .iter()
            .filter_map(|record| match record.parsed_date() {
                Some(date) => Some((date, record)),
                None => {
                    warn!("Skipping external record with unreadable date '{}'", record.date);
                    None
                }
            })
            .filter(|(date, _)| range.contains(*date))
            .collect();
        selected.sort_by_key(|(date, _)| *date);
        selected
    }

    /// The precomputed aggregate for `kind`, if the payload carries one.
    pub fn aggregate(&self, kind: VariableKind) -> Option<f64> {
        self.aggregates
            .as_ref()
            .and_then(|aggregates| field_value(aggregates, kind))
    }

    /// The condition label carried next to the aggregates, if it is a known one.
    pub fn condition(&self) -> Option<Condition> {
        self.aggregates
            .as_ref()
            .and_then(|aggregates| aggregates.get("condition"))
            .and_then(Value::as_str)
            .and_then(Condition::from_label)
    }

    /// Per-variable aggregates for `range`.
    ///
    /// Uses the payload's own aggregates when it has any; otherwise derives the
    /// arithmetic mean of every variable over the records within `range`.
    /// Variables without data are left out.
    pub fn aggregates_for(&self, range: &DateRange) -> BTreeMap<VariableKind, f64> {
        if self.aggregates.is_some() {
            return VariableKind::ALL
                .into_iter()
                .filter_map(|kind| self.aggregate(kind).map(|v| (kind, v)))
                .collect();
        }
        let records = self.records_in(range);
        VariableKind::ALL
            .into_iter()
            .filter_map(|kind| {
                mean(records.iter().filter_map(|(_, record)| record.value(kind))).map(|v| (kind, v))
            })
            .collect()
    }

    /// Maps the records within `range` to a series for `variable`.
    ///
    /// Points are labelled with the aggregation's formatter; one point is
    /// produced per record, no re-bucketing happens.
    ///
    /// # Errors
    ///
    /// * [`SourceError::EmptyPayload`] if the payload has no records at all.
    /// * [`SourceError::MissingVariable`] if the variable has no external field,
    ///   or any selected record lacks a numeric value for it.
    /// * [`SourceError::NoRecordsInRange`] if no record falls within `range`.
    pub fn to_series(
        &self,
        range: &DateRange,
        variable: VariableKind,
        aggregation: Aggregation,
    ) -> Result<Series, SourceError> {
        if self.records.is_empty() {
            return Err(SourceError::EmptyPayload);
        }
        if variable.external_fields().is_empty() {
            return Err(SourceError::MissingVariable(variable));
        }
        let records = self.records_in(range);
        if records.is_empty() {
            return Err(SourceError::NoRecordsInRange(*range));
        }
        records
            .into_iter()
            .map(|(date, record)| {
                record
                    .value(variable)
                    .map(|value| WeatherPoint::new(aggregation.label(date), value))
                    .ok_or(SourceError::MissingVariable(variable))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Series::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE_DAYS: &str = r#"{
        "datos": [
            {"Fecha": "2024-01-04", "Temperatura (°C)": 24.0, "Humedad (%)": 61.0},
            {"Fecha": "2024-01-02", "Temperatura (°C)": 22.0, "Humedad (%)": 59.0},
            {"Fecha": "2024-01-01", "Temperatura (°C)": 21.0, "Humedad (%)": 58.0},
            {"Fecha": "2024-01-03", "Temperatura (°C)": "23.5", "Humedad (%)": 60.0},
            {"Fecha": "2024-01-05T00:00:00", "Temperatura (°C)": 25.0, "Humedad (%)": 62.0}
        ]
    }"#;

    fn payload() -> ExternalPayload {
        ExternalPayload::from_slice(FIVE_DAYS.as_bytes()).unwrap()
    }

    fn first_three_days() -> DateRange {
        DateRange::new("2024-01-01", "2024-01-03").unwrap()
    }

    #[test]
    fn test_filters_inclusive_range_in_chronological_order() {
        let series = payload()
            .to_series(&first_three_days(), VariableKind::Temperature, Aggregation::Daily)
            .unwrap();
        assert_eq!(series.labels(), vec!["Jan 1", "Jan 2", "Jan 3"]);
        assert_eq!(series.values(), vec![21.0, 22.0, 23.5]);
    }

    #[test]
    fn test_timestamped_dates_are_included() {
        let range = DateRange::new("2024-01-05", "2024-01-05").unwrap();
        let series = payload()
            .to_series(&range, VariableKind::Humidity, Aggregation::Daily)
            .unwrap();
        assert_eq!(series.values(), vec![62.0]);
    }

    #[test]
    fn test_derives_means_when_aggregates_are_missing() {
        let aggregates = payload().aggregates_for(&first_three_days());
        assert_eq!(aggregates.get(&VariableKind::Temperature), Some(&22.166666666666668));
        assert_eq!(aggregates.get(&VariableKind::Humidity), Some(&59.0));
        assert_eq!(aggregates.get(&VariableKind::Pressure), None);
    }

    #[test]
    fn test_prefers_given_aggregates() {
        let payload: ExternalPayload = serde_json::from_str(
            r#"{"records": [{"date": "2024-01-01", "pressure": 1000}],
                "medias": {"PresionAtm (hPa)": 1011.4, "Viento (km/h)": 9.5}}"#,
        )
        .unwrap();
        let aggregates = payload.aggregates_for(&first_three_days());
        assert_eq!(aggregates.get(&VariableKind::Pressure), Some(&1011.4));
        assert_eq!(aggregates.get(&VariableKind::WindSpeed), Some(&9.5));
        assert_eq!(aggregates.len(), 2);
    }

    #[test]
    fn test_unmapped_variable_is_missing() {
        let err = payload()
            .to_series(&first_three_days(), VariableKind::UvIndex, Aggregation::Daily)
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingVariable(VariableKind::UvIndex)));
    }

    #[test]
    fn test_variable_absent_from_records_is_missing() {
        let err = payload()
            .to_series(&first_three_days(), VariableKind::Pressure, Aggregation::Daily)
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingVariable(VariableKind::Pressure)));
    }

    #[test]
    fn test_empty_payloads() {
        let empty = ExternalPayload::from_slice(b"{}").unwrap();
        assert!(matches!(
            empty.to_series(&first_three_days(), VariableKind::Temperature, Aggregation::Daily),
            Err(SourceError::EmptyPayload)
        ));

        let range = DateRange::new("2025-01-01", "2025-01-31").unwrap();
        assert!(matches!(
            payload().to_series(&range, VariableKind::Temperature, Aggregation::Daily),
            Err(SourceError::NoRecordsInRange(_))
        ));
    }

    #[test]
    fn test_unreadable_dates_are_skipped() {
        let payload: ExternalPayload = serde_json::from_str(
            r#"{"records": [{"date": "yesterday", "humidity": 1}, {"date": "2024-01-02", "humidity": 2}]}"#,
        )
        .unwrap();
        assert_eq!(payload.records_in(&first_three_days()).len(), 1);
    }

    #[test]
    fn test_malformed_payloads_fail_to_parse() {
        assert!(ExternalPayload::from_slice(b"not json").is_err());
        assert!(ExternalPayload::from_slice(br#"{"records": [{"humidity": 1}]}"#).is_err());
        assert!(ExternalPayload::from_slice(br#"{"records": [{"date": 20240101}]}"#).is_err());
    }

    #[test]
    fn test_reads_backend_response_shape() {
        let payload: ExternalPayload = serde_json::from_str(
            r#"{"current_weather": {"temperature": 31.2, "condition": "Sunny", "humidity": 35.0},
                "forecast": [{"date": "2024-01-02", "temperature": 31.4, "condition": "Sunny"},
                             {"date": "2024-01-01", "temperature": 31.0, "condition": "Sunny"}],
                "location": {"latitude": -17.78, "longitude": -63.18},
                "date_range": {"start": "2024-01-01", "end": "2024-01-02"}}"#,
        )
        .unwrap();
        assert_eq!(payload.records.len(), 2);
        assert_eq!(payload.aggregate(VariableKind::Temperature), Some(31.2));
        assert_eq!(payload.condition(), Some(Condition::Sunny));
        let series = payload
            .to_series(&first_three_days(), VariableKind::Temperature, Aggregation::Daily)
            .unwrap();
        assert_eq!(series.values(), vec![31.0, 31.4]);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["forecast"][0]["date"], "2024-01-02");
        assert_eq!(json["current_weather"]["condition"], "Sunny");
    }

    #[test]
    fn test_unknown_condition_label_is_ignored() {
        let payload: ExternalPayload =
            serde_json::from_str(r#"{"aggregates": {"condition": "Hail", "humidity": 80}}"#).unwrap();
        assert_eq!(payload.condition(), None);
        assert_eq!(payload.aggregate(VariableKind::Humidity), Some(80.0));
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = &payload().records[0];
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["date"], "2024-01-04");
        assert_eq!(json["Temperatura (°C)"], 24.0);
    }
}
