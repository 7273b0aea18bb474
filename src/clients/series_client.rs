//! Provides the `SeriesClient` for requesting a single-variable weather series.
//!
//! This client acts as an intermediate builder, obtained via [`WeatherSim::series()`],
//! allowing the user to specify the location, date range, variable and aggregation
//! before resolving the series.

use crate::selector::Resolved;
use crate::sources::ExternalSource;
use crate::types::aggregation::Aggregation;
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use crate::types::series::Series;
use crate::types::variable::VariableKind;
use crate::weathersim::WeatherSim;
use bon::bon;

/// A client builder for weather series.
///
/// Instances are created by calling [`WeatherSim::series()`]. Calling
/// `.location(..)` starts the builder; `.range(..)` is required, `.variable(..)`
/// and `.aggregation(..)` are optional. `.call().await` resolves the series and
/// returns a [`Resolved<Series>`].
pub struct SeriesClient<'a, S> {
    /// A reference to the main client instance.
    client: &'a WeatherSim<S>,
}

#[bon]
impl<'a, S: ExternalSource> SeriesClient<'a, S> {
    /// Creates a new `SeriesClient`.
    ///
    /// This is called by [`WeatherSim::series()`] and not directly by users.
    pub(crate) fn new(client: &'a WeatherSim<S>) -> Self {
        Self { client }
    }

    /// Initiates a request for one variable over a date range at a location.
    ///
    /// This method starts a builder pattern. You must provide the location and
    /// the range. You can optionally specify:
    /// *   `.variable(VariableKind)`: The variable to report (default: temperature).
    /// *   `.aggregation(Aggregation)`: The time granularity (default: daily).
    ///
    /// Finally, call `.call().await` on the builder to resolve the series.
    ///
    /// # Arguments (Initial Builder Method)
    ///
    /// * `location` - The [`Location`] of interest.
    ///
    /// # Returns
    ///
    /// A [`Resolved<Series>`]. Resolution never fails: if the external source is
    /// unavailable, times out, or lacks the variable, the series is generated and
    /// the origin is [`crate::Origin::Generated`]. An inverted range yields an
    /// empty series.
    ///
    /// # Example
    ///
    /// ```
    /// use weathersim::{Aggregation, DateRange, Location, VariableKind, WeatherSim};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let sim = WeatherSim::offline();
    /// let la_paz = Location::new(-16.5, -68.15).unwrap();
    ///
    /// let humidity = sim
    ///     .series()
    ///     .location(la_paz)                    // Required: start builder with location
    ///     .range(DateRange::new("2024-01-01", "2024-01-28").unwrap()) // Required
    ///     .variable(VariableKind::Humidity)    // Optional
    ///     .aggregation(Aggregation::Weekly)    // Optional
    ///     .call()                              // Resolve
    ///     .await;
    ///
    /// assert_eq!(humidity.value.labels(), vec!["Week 1 Jan", "Week 2 Jan", "Week 3 Jan", "Week 4 Jan"]);
    /// # }
    /// ```
    #[builder(start_fn = location)]
    #[doc(hidden)]
    pub async fn build_location(
        &self,
        #[builder(start_fn)] location: Location,
        range: DateRange,
        variable: Option<VariableKind>,
        aggregation: Option<Aggregation>,
    ) -> Resolved<Series> {
        let mut rng = self.client.next_rng().await;
        self.client
            .selector()
            .resolve_series(
                &location,
                &range,
                variable.unwrap_or_default(),
                aggregation.unwrap_or_default(),
                &mut rng,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{DateRange, Location, Origin, SyntheticBackend, VariableKind, WeatherSim};

    fn santa_cruz() -> Location {
        Location::new(-17.78, -63.18).unwrap()
    }

    #[tokio::test]
    async fn test_defaults_to_daily_temperature() {
        let sim = WeatherSim::offline().with_seed(5);
        let resolved = sim
            .series()
            .location(santa_cruz())
            .range(DateRange::new("2024-01-30", "2024-02-02").unwrap())
            .call()
            .await;
        assert_eq!(
            resolved.value.labels(),
            vec!["Jan 30", "Jan 31", "Feb 1", "Feb 2"]
        );
        assert!(resolved
            .value
            .values()
            .iter()
            .all(|v| (-90.0..=60.0).contains(v)));
        assert!(resolved.aggregates.contains_key(&VariableKind::Temperature));
    }

    #[tokio::test]
    async fn test_variable_without_external_field_is_generated() {
        let sim = WeatherSim::new(SyntheticBackend::seeded(2)).with_seed(5);
        let resolved = sim
            .series()
            .location(santa_cruz())
            .range(DateRange::new("2024-01-01", "2024-01-10").unwrap())
            .variable(VariableKind::AirQuality)
            .call()
            .await;
        assert_eq!(resolved.origin, Origin::Generated);
        assert_eq!(resolved.value.len(), 10);
    }
}
