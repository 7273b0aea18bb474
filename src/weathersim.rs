//! This module provides the main entry point of the crate, [`WeatherSim`].
//! It ties an external source, the fallback policy and a random generator
//! together so callers only deal with locations, ranges and variables.

use crate::clients::series_client::SeriesClient;
use crate::clients::snapshot_client::SnapshotClient;
use crate::error::WeatherSimError;
use crate::selector::{Resolved, SelectorConfig, SourceSelector};
use crate::sources::{ExternalSource, Unavailable};
use crate::types::request::WeatherRequest;
use crate::types::series::Series;
use crate::types::snapshot::Snapshot;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

/// The main client for producing weather series and snapshots.
///
/// Every request first asks the configured [`ExternalSource`]; whatever it
/// cannot answer is generated synthetically. Create one with
/// [`WeatherSim::new()`] for a given source, or [`WeatherSim::offline()`] to
/// only ever generate.
///
/// Each call draws from a fresh generator seeded from the client's own, so a
/// client built with [`WeatherSim::with_seed`] replays the same sequence of
/// results for the same sequence of calls.
///
/// # Examples
///
/// ```
/// # use weathersim::{WeatherSim, Location, DateRange, VariableKind, Aggregation};
/// # #[tokio::main]
/// # async fn main() {
/// let sim = WeatherSim::offline().with_seed(42);
/// let location = Location::new(-17.78, -63.18).unwrap();
///
/// let series = sim
///     .series()
///     .location(location)
///     .range(DateRange::new("2024-01-01", "2024-12-31").unwrap())
///     .variable(VariableKind::Precipitation)
///     .aggregation(Aggregation::Monthly)
///     .call()
///     .await;
/// assert_eq!(series.value.len(), 12);
/// # }
/// ```
pub struct WeatherSim<S = Unavailable> {
    selector: SourceSelector<S>,
    rng: Mutex<StdRng>,
}

impl WeatherSim<Unavailable> {
    /// Creates a client without an external source: everything is generated.
    pub fn offline() -> Self {
        Self::new(Unavailable)
    }
}

impl<S: ExternalSource> WeatherSim<S> {
    /// Creates a client for `source` with the default [`SelectorConfig`]
    /// (10 second fetch timeout, payload cache enabled).
    ///
    /// # Examples
    ///
    /// ```
    /// use weathersim::{FileSource, WeatherSim};
    ///
    /// let sim = WeatherSim::new(FileSource::new("resultados.json"));
    /// assert!(sim.selector().config().use_cache);
    /// ```
    pub fn new(source: S) -> Self {
        Self::with_config(source, SelectorConfig::default())
    }

    /// Creates a client for `source` with a custom [`SelectorConfig`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use weathersim::{HttpSource, SelectorConfig, WeatherSim};
    ///
    /// let config = SelectorConfig::builder()
    ///     .fetch_timeout(Duration::from_secs(2))
    ///     .build();
    /// let sim = WeatherSim::with_config(
    ///     HttpSource::new("http://localhost:3000/api/calculate-weather"),
    ///     config,
    /// );
    /// assert_eq!(sim.selector().config().fetch_timeout, Duration::from_secs(2));
    /// ```
    pub fn with_config(source: S, config: SelectorConfig) -> Self {
        Self {
            selector: SourceSelector::with_config(source, config),
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Replaces the client's random generator with one seeded from `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn selector(&self) -> &SourceSelector<S> {
        &self.selector
    }

    /// Returns a builder for a single-variable series.
    ///
    /// See [`SeriesClient`] for the available options.
    pub fn series(&self) -> SeriesClient<'_, S> {
        SeriesClient::new(self)
    }

    /// Returns a builder for a current-conditions snapshot.
    ///
    /// See [`SnapshotClient`] for the available options.
    pub fn snapshot(&self) -> SnapshotClient<'_, S> {
        SnapshotClient::new(self)
    }

    /// Validates `request` and resolves the series it describes.
    ///
    /// # Errors
    ///
    /// Only validation can fail, see [`WeatherRequest::parse`]. Once the
    /// request is valid a series is always produced.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weathersim::{WeatherSim, WeatherRequest, WeatherSimError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), WeatherSimError> {
    /// let sim = WeatherSim::offline();
    /// let request = WeatherRequest::new(4.61, -74.08, "2024-01-01", "2024-01-31")
    ///     .with_variable("humidity")
    ///     .with_aggregation("weekly");
    /// let series = sim.series_for(&request).await?;
    /// assert_eq!(series.value.len(), 5);
    ///
    /// let unknown = request.clone().with_variable("visibility");
    /// assert!(matches!(
    ///     sim.series_for(&unknown).await,
    ///     Err(WeatherSimError::UnsupportedVariable(_))
    /// ));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn series_for(
        &self,
        request: &WeatherRequest,
    ) -> Result<Resolved<Series>, WeatherSimError> {
        let parsed = request.parse()?;
        Ok(self
            .series()
            .location(parsed.location)
            .range(parsed.range)
            .variable(parsed.variable)
            .aggregation(parsed.aggregation)
            .call()
            .await)
    }

    /// Validates `request` and resolves the snapshot for its location and range.
    ///
    /// The request's variable and aggregation are validated but otherwise
    /// unused: a snapshot always reports every variable it can.
    pub async fn snapshot_for(
        &self,
        request: &WeatherRequest,
    ) -> Result<Resolved<Snapshot>, WeatherSimError> {
        let parsed = request.parse()?;
        Ok(self
            .snapshot()
            .location(parsed.location)
            .range(parsed.range)
            .call()
            .await)
    }

    /// A generator for one call, seeded from the client's generator.
    pub(crate) async fn next_rng(&self) -> StdRng {
        let mut rng = self.rng.lock().await;
        StdRng::from_rng(&mut *rng)
    }
}
