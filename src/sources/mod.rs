//! External weather data sources.
//!
//! A source is anything that, given a location and date range, may hand back
//! an [`ExternalPayload`]. Sources are allowed to fail in any way they like;
//! [`crate::SourceSelector`] absorbs those failures.

pub mod cache;
pub mod error;
pub mod file_source;
pub mod http_source;
pub mod payload;
pub mod synthetic_backend;

use crate::sources::error::SourceError;
use crate::sources::payload::ExternalPayload;
use crate::types::date_range::DateRange;
use crate::types::location::Location;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The parameters sent to an external source.
///
/// Serializes to `{"latitude", "longitude", "start_date", "end_date"}` with
/// ISO dates, the request body the results backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl FetchRequest {
    pub fn new(location: &Location, range: &DateRange) -> Self {
        Self {
            latitude: location.latitude(),
            longitude: location.longitude(),
            start_date: range.start,
            end_date: range.end,
        }
    }

    pub fn range(&self) -> DateRange {
        DateRange::unchecked(self.start_date, self.end_date)
    }
}

/// A provider of externally computed weather data.
#[async_trait]
pub trait ExternalSource: Send + Sync {
    /// Short name used in log messages.
    fn name(&self) -> &str;

    async fn fetch(&self, request: &FetchRequest) -> Result<ExternalPayload, SourceError>;
}

#[async_trait]
impl<S: ExternalSource + ?Sized> ExternalSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<ExternalPayload, SourceError> {
        (**self).fetch(request).await
    }
}

#[async_trait]
impl<S: ExternalSource + ?Sized> ExternalSource for std::sync::Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<ExternalPayload, SourceError> {
        (**self).fetch(request).await
    }
}

/// A source that is never available, for offline use: every request is
/// served by the generators.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl ExternalSource for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn fetch(&self, _request: &FetchRequest) -> Result<ExternalPayload, SourceError> {
        Err(SourceError::Rejected("no external source configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_request_body() {
        let request = FetchRequest::new(
            &Location::new(4.6097, -74.0817).unwrap(),
            &DateRange::new("2024-01-01", "2024-01-02").unwrap(),
        );
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json["latitude"], 4.6097);
        assert_eq!(json["start_date"], "2024-01-01");
        assert_eq!(json["end_date"], "2024-01-02");
        assert_eq!(request.range().days(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_always_fails() {
        let request = FetchRequest::new(
            &Location::new(0.0, 0.0).unwrap(),
            &DateRange::new("2024-01-01", "2024-01-02").unwrap(),
        );
        let boxed: Box<dyn ExternalSource> = Box::new(Unavailable);
        assert!(matches!(
            boxed.fetch(&request).await,
            Err(SourceError::Rejected(_))
        ));
    }
}
