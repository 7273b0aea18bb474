//! The fallback policy choosing between external data and synthetic generation.
//!
//! Resolution is a two-step pipeline. [`SourceSelector::fetch`] makes at most
//! one bounded attempt against the external source and returns a typed
//! [`FetchOutcome`]. The outcome then feeds a pure mapping step, and anything
//! that does not map cleanly falls through to the cache and finally to the
//! generators. External failures are logged, never returned.

use crate::generator::jitter::UnitSource;
use crate::generator::series::generate_series;
use crate::generator::snapshot::generate_snapshot;
use crate::sources::cache::PayloadCache;
use crate::sources::error::SourceError;
use crate::sources::payload::ExternalPayload;
use crate::sources::{ExternalSource, FetchRequest};
use crate::types::aggregation::Aggregation;
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use crate::types::series::Series;
use crate::types::snapshot::Snapshot;
use crate::types::variable::VariableKind;
use crate::types::weather_condition::Condition;
use crate::utils::{mean, round1};
use bon::Builder;
use log::{info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Tuning knobs for [`SourceSelector`].
///
/// # Examples
///
/// ```
/// use weathersim::SelectorConfig;
/// use std::time::Duration;
///
/// let config = SelectorConfig::builder()
///     .fetch_timeout(Duration::from_millis(500))
///     .use_cache(false)
///     .build();
/// assert_eq!(config.fetch_timeout, Duration::from_millis(500));
///
/// let defaults = SelectorConfig::default();
/// assert_eq!(defaults.fetch_timeout, Duration::from_secs(10));
/// assert!(defaults.use_cache);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct SelectorConfig {
    /// How long a single external fetch may take before it counts as unavailable.
    #[builder(default = Duration::from_secs(10))]
    pub fetch_timeout: Duration,
    /// Keep the last successful payload and reuse it when the source fails.
    #[builder(default = true)]
    pub use_cache: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Result of the single external attempt of a request.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Arc<ExternalPayload>),
    Unavailable(SourceError),
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Mapped from a payload fetched for this request.
    External,
    /// Mapped from a payload an earlier request fetched for the same location.
    Cached,
    /// Produced by the synthetic generators.
    Generated,
}

/// A resolved value together with its origin and per-variable aggregates.
///
/// For external data the aggregates are the payload's own (or the means over
/// the requested range); for generated series they hold the series mean.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub origin: Origin,
    pub aggregates: BTreeMap<VariableKind, f64>,
}

impl<T> Resolved<T> {
    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn is_generated(&self) -> bool {
        self.origin == Origin::Generated
    }
}

/// Maps a payload to a snapshot, or explains why it cannot.
///
/// A known `condition` label next to the aggregates is taken as is, as long as
/// at least one variable is present. Otherwise temperature, humidity and
/// precipitation are needed to derive it. Other variables are included when
/// present.
fn snapshot_from_payload(
    payload: &ExternalPayload,
    location: &Location,
    range: &DateRange,
) -> Result<Snapshot, SourceError> {
    if payload.records.is_empty() && payload.aggregates.is_none() {
        return Err(SourceError::EmptyPayload);
    }
    let aggregates = payload.aggregates_for(range);
    let condition = match payload.condition() {
        Some(condition) if !aggregates.is_empty() => condition,
        _ => {
            let required = |kind| {
                aggregates
                    .get(&kind)
                    .copied()
                    .ok_or(SourceError::MissingVariable(kind))
            };
            Condition::derive(
                required(VariableKind::Temperature)?,
                required(VariableKind::Humidity)?,
                required(VariableKind::Precipitation)?,
            )
        }
    };

    let values: BTreeMap<VariableKind, f64> = aggregates
        .iter()
        .map(|(kind, value)| {
            let value = if *kind == VariableKind::Pressure {
                value.round()
            } else {
                round1(*value)
            };
            (*kind, value)
        })
        .collect();
    Ok(Snapshot::new(values, condition, *location, *range))
}

/// Decides per request whether to serve external data or generated data.
///
/// Holds the external source, the configuration and the payload cache. A
/// call runs at most one external attempt; on any failure it continues with
/// the cached payload (same location only) and then with the generators.
///
/// Dropping a resolve future while the fetch is outstanding discards the
/// fetch: the cache is only written after the fetch completes, inside the
/// same future.
pub struct SourceSelector<S> {
    source: S,
    config: SelectorConfig,
    cache: PayloadCache,
}

impl<S: ExternalSource> SourceSelector<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, SelectorConfig::default())
    }

    pub fn with_config(source: S, config: SelectorConfig) -> Self {
        Self {
            source,
            config,
            cache: PayloadCache::new(),
        }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &PayloadCache {
        &self.cache
    }

    /// Makes the single, bounded external attempt for `request`.
    ///
    /// Timeouts, transport errors and payloads without records all become
    /// [`FetchOutcome::Unavailable`]. The cache is not touched.
    pub async fn fetch(&self, request: &FetchRequest) -> FetchOutcome {
        let attempt = tokio::time::timeout(self.config.fetch_timeout, self.source.fetch(request));
        match attempt.await {
            Ok(Ok(payload)) if payload.records.is_empty() && payload.aggregates.is_none() => {
                FetchOutcome::Unavailable(SourceError::EmptyPayload)
            }
            Ok(Ok(payload)) => FetchOutcome::Fetched(Arc::new(payload)),
            Ok(Err(e)) => FetchOutcome::Unavailable(e),
            Err(_) => FetchOutcome::Unavailable(SourceError::Timeout(self.config.fetch_timeout)),
        }
    }

    /// Fetches and, on success, remembers the payload for `location`.
    async fn fetch_and_cache(&self, location: &Location, range: &DateRange) -> FetchOutcome {
        let outcome = self.fetch(&FetchRequest::new(location, range)).await;
        match &outcome {
            FetchOutcome::Fetched(payload) if self.config.use_cache => {
                self.cache.store(*location, Arc::clone(payload));
            }
            FetchOutcome::Fetched(_) => {}
            FetchOutcome::Unavailable(e) => {
                warn!("Source '{}' unavailable: {}", self.source.name(), e);
            }
        }
        outcome
    }

    fn cached(&self, location: &Location) -> Option<Arc<ExternalPayload>> {
        if self.config.use_cache {
            self.cache.latest_for(location)
        } else {
            None
        }
    }

    /// Resolves a series for one variable over `range`.
    ///
    /// Order of preference:
    ///
    /// 1. the payload fetched for this request, filtered to `range`,
    /// 2. the cached payload of an earlier request for the same location,
    /// 3. [`generate_series`] with the same arguments, drawing from `rng`.
    ///
    /// Never fails: an unavailable source, malformed or empty payload, or a
    /// variable the payload does not provide all fall through to the next
    /// step. With a working source the result only depends on the payload, so
    /// repeated calls return identical series.
    pub async fn resolve_series<R: UnitSource + ?Sized>(
        &self,
        location: &Location,
        range: &DateRange,
        variable: VariableKind,
        aggregation: Aggregation,
        rng: &mut R,
    ) -> Resolved<Series> {
        let map = |payload: &ExternalPayload| {
            payload
                .to_series(range, variable, aggregation)
                .map(|series| (series, payload.aggregates_for(range)))
        };

        if let FetchOutcome::Fetched(payload) = self.fetch_and_cache(location, range).await {
            match map(&payload) {
                Ok((series, aggregates)) => {
                    info!("Serving {variable} for {range} from '{}'", self.source.name());
                    return Resolved {
                        value: series,
                        origin: Origin::External,
                        aggregates,
                    };
                }
                Err(e) => warn!("External payload unusable for {variable}: {e}"),
            }
        } else if let Some(payload) = self.cached(location) {
            match map(&payload) {
                Ok((series, aggregates)) => {
                    info!("Serving {variable} for {range} from cached payload");
                    return Resolved {
                        value: series,
                        origin: Origin::Cached,
                        aggregates,
                    };
                }
                Err(e) => warn!("Cached payload unusable for {variable}: {e}"),
            }
        }

        warn!("Falling back to generated {variable} series for {range}");
        let series = generate_series(location, range, variable, aggregation, rng);
        let aggregates = mean(series.values())
            .map(|m| BTreeMap::from([(variable, m)]))
            .unwrap_or_default();
        Resolved {
            value: series,
            origin: Origin::Generated,
            aggregates,
        }
    }

    /// Resolves the current-conditions snapshot for `location`.
    ///
    /// Prefers the aggregates of external data (given, or means over the
    /// records in `range`), then the cached payload, then
    /// [`generate_snapshot`]. External data must either carry its own condition
    /// label or provide temperature, humidity and precipitation to derive one;
    /// variables it lacks are left out of the snapshot.
    pub async fn resolve_snapshot<R: UnitSource + ?Sized>(
        &self,
        location: &Location,
        range: &DateRange,
        rng: &mut R,
    ) -> Resolved<Snapshot> {
        let map = |payload: &ExternalPayload| {
            snapshot_from_payload(payload, location, range)
                .map(|snapshot| (snapshot, payload.aggregates_for(range)))
        };

        let (mapped, origin) = match self.fetch_and_cache(location, range).await {
            FetchOutcome::Fetched(payload) => (Some(map(&payload)), Origin::External),
            FetchOutcome::Unavailable(_) => (self.cached(location).map(|p| map(&p)), Origin::Cached),
        };
        match mapped {
            Some(Ok((snapshot, aggregates))) => {
                info!("Serving snapshot for {range} from {origin:?} data");
                return Resolved {
                    value: snapshot,
                    origin,
                    aggregates,
                };
            }
            Some(Err(e)) => warn!("{origin:?} payload unusable for a snapshot: {e}"),
            None => {}
        }

        warn!("Falling back to generated snapshot for {range}");
        let snapshot = generate_snapshot(location, range, rng);
        let aggregates = snapshot.values().clone();
        Resolved {
            value: snapshot,
            origin: Origin::Generated,
            aggregates,
        }
    }
}
