//! Provides the `SnapshotClient` for requesting current weather conditions.
//!
//! Obtained via [`WeatherSim::snapshot()`].

use crate::selector::Resolved;
use crate::sources::ExternalSource;
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use crate::types::snapshot::Snapshot;
use crate::weathersim::WeatherSim;
use bon::bon;
use chrono::Local;

/// A client builder for current-conditions snapshots.
///
/// Calling `.location(..)` starts the builder; `.range(..)` is optional and
/// defaults to today. `.call().await` returns a [`Resolved<Snapshot>`].
pub struct SnapshotClient<'a, S> {
    client: &'a WeatherSim<S>,
}

#[bon]
impl<'a, S: ExternalSource> SnapshotClient<'a, S> {
    pub(crate) fn new(client: &'a WeatherSim<S>) -> Self {
        Self { client }
    }

    /// Initiates a snapshot request for a location.
    ///
    /// Optional:
    /// *   `.range(DateRange)`: The period the snapshot summarises (default: today).
    ///
    /// External aggregates are used when the source provides a condition label,
    /// or temperature, humidity and precipitation, for the range; otherwise the
    /// snapshot is generated from the coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use weathersim::{Location, VariableKind, WeatherSim};
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let sim = WeatherSim::offline();
    /// let snapshot = sim
    ///     .snapshot()
    ///     .location(Location::new(52.52, 13.40).unwrap())
    ///     .call()
    ///     .await
    ///     .into_inner();
    ///
    /// let humidity = snapshot.get(VariableKind::Humidity).unwrap();
    /// println!("{} with {humidity}% humidity", snapshot.condition());
    /// # }
    /// ```
    #[builder(start_fn = location)]
    #[doc(hidden)]
    pub async fn build_location(
        &self,
        #[builder(start_fn)] location: Location,
        range: Option<DateRange>,
    ) -> Resolved<Snapshot> {
        let range = range.unwrap_or_else(|| DateRange::single(Local::now().date_naive()));
        let mut rng = self.client.next_rng().await;
        self.client
            .selector()
            .resolve_snapshot(&location, &range, &mut rng)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::{DateRange, Location, Origin, VariableKind, WeatherSim};
    use chrono::Local;

    #[tokio::test]
    async fn test_defaults_to_today() {
        let sim = WeatherSim::offline().with_seed(3);
        let resolved = sim
            .snapshot()
            .location(Location::new(0.0, 0.0).unwrap())
            .call()
            .await;
        assert_eq!(resolved.origin, Origin::Generated);
        let today = Local::now().date_naive();
        assert!(resolved.value.date_range().contains(today));
        assert_eq!(resolved.value.values().len(), VariableKind::ALL.len());
    }

    #[tokio::test]
    async fn test_seeded_snapshots_match() {
        let range = DateRange::new("2024-06-01", "2024-06-07").unwrap();
        let location = Location::new(60.17, 24.94).unwrap();
        let a = WeatherSim::offline().with_seed(8);
        let b = WeatherSim::offline().with_seed(8);
        let left = a.snapshot().location(location).range(range).call().await;
        let right = b.snapshot().location(location).range(range).call().await;
        assert_eq!(left, right);
    }
}
