//! Defines [`WeatherPoint`] and the ordered [`Series`] built from them.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// One labelled sample of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPoint {
    pub label: String,
    pub value: f64,
}

impl WeatherPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// An ordered, chronological sequence of [`WeatherPoint`]s.
///
/// The order is the order in which the points were produced; a `Series` is
/// never re-sorted. It serializes to parallel `labels` and `values` arrays,
/// the shape chart libraries expect.
///
/// # Examples
///
/// ```
/// use weathersim::{Series, WeatherPoint};
///
/// let series: Series = vec![WeatherPoint::new("Jan 1", 21.5), WeatherPoint::new("Jan 2", 22.0)]
///     .into_iter()
///     .collect();
/// assert_eq!(series.labels(), vec!["Jan 1", "Jan 2"]);
/// assert_eq!(series.values(), vec![21.5, 22.0]);
/// assert_eq!(
///     serde_json::to_string(&series).unwrap(),
///     r#"{"labels":["Jan 1","Jan 2"],"values":[21.5,22.0]}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series {
    points: Vec<WeatherPoint>,
}

impl Series {
    pub fn new(points: Vec<WeatherPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[WeatherPoint] {
        &self.points
    }

    pub fn labels(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WeatherPoint> {
        self.points.iter()
    }
}

impl FromIterator<WeatherPoint> for Series {
    fn from_iter<T: IntoIterator<Item = WeatherPoint>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Series {
    type Item = WeatherPoint;
    type IntoIter = std::vec::IntoIter<WeatherPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a WeatherPoint;
    type IntoIter = std::slice::Iter<'a, WeatherPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl Serialize for Series {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Series", 2)?;
        state.serialize_field("labels", &self.labels())?;
        state.serialize_field("values", &self.values())?;
        state.end()
    }
}

#[derive(Deserialize)]
struct ParallelArrays {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl<'de> Deserialize<'de> for Series {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let arrays = ParallelArrays::deserialize(deserializer)?;
        if arrays.labels.len() != arrays.values.len() {
            return Err(serde::de::Error::custom(format!(
                "labels ({}) and values ({}) differ in length",
                arrays.labels.len(),
                arrays.values.len()
            )));
        }
        Ok(arrays
            .labels
            .into_iter()
            .zip(arrays.values)
            .map(|(label, value)| WeatherPoint { label, value })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_rejects_uneven_arrays() {
        let result: Result<Series, _> =
            serde_json::from_str(r#"{"labels":["a","b"],"values":[1.0]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_keeps_order() {
        let series: Series =
            serde_json::from_str(r#"{"labels":["b","a"],"values":[2.0,1.0]}"#).unwrap();
        assert_eq!(series.labels(), vec!["b", "a"]);
        assert_eq!(series.len(), 2);
    }
}
