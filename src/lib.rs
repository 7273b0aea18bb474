mod clients;
mod error;
mod generator;
mod selector;
mod sources;
mod types;
mod utils;
mod weathersim;

pub use error::WeatherSimError;
pub use weathersim::*;

pub use clients::series_client::*;
pub use clients::snapshot_client::*;

pub use generator::jitter::{ConstantSource, UnitSource};
pub use generator::series::{generate_series, SeriesWalk};
pub use generator::snapshot::{air_quality_index, generate_snapshot, SnapshotBase};

pub use selector::*;

pub use sources::cache::PayloadCache;
pub use sources::error::SourceError;
pub use sources::file_source::FileSource;
pub use sources::http_source::HttpSource;
pub use sources::payload::{ExternalPayload, ExternalRecord};
pub use sources::synthetic_backend::{generate_backend_payload, SyntheticBackend};
pub use sources::{ExternalSource, FetchRequest, Unavailable};

pub use types::aggregation::Aggregation;
pub use types::date_range::DateRange;
pub use types::location::Location;
pub use types::request::{ParsedRequest, WeatherRequest};
pub use types::series::{Series, WeatherPoint};
pub use types::snapshot::Snapshot;
pub use types::variable::VariableKind;
pub use types::weather_condition::Condition;

pub use types::traits::any_date::AnyDate;
