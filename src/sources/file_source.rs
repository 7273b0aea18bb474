use crate::sources::error::SourceError;
use crate::sources::payload::ExternalPayload;
use crate::sources::{ExternalSource, FetchRequest};
use async_trait::async_trait;
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Reads the results file a backend process writes (e.g. `resultados.json`).
///
/// The file is re-read on every fetch so a backend rewriting it between
/// requests is picked up. The request parameters are not used to select
/// data; the selector filters records to the requested range afterwards.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ExternalSource for FileSource {
    fn name(&self) -> &str {
        "results-file"
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<ExternalPayload, SourceError> {
        debug!(
            "Reading results file {:?} for {}",
            self.path,
            request.range()
        );
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| SourceError::FileRead(self.path.clone(), e))?;
        let payload = ExternalPayload::from_slice(&bytes)?;
        info!(
            "Loaded {} records from {:?}",
            payload.records.len(),
            self.path
        );
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DateRange, Location};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn request() -> FetchRequest {
        FetchRequest::new(
            &Location::new(-17.8, -63.2).unwrap(),
            &DateRange::new("2024-01-01", "2024-01-03").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_reads_results_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"datos": [{{"Fecha": "2024-01-01", "Humedad (%)": 70.5}}]}}"#
        )
        .unwrap();

        let payload = FileSource::new(file.path()).fetch(&request()).await.unwrap();
        assert_eq!(payload.records.len(), 1);
        assert_eq!(payload.records[0].date, "2024-01-01");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("resultados.json"));
        assert!(matches!(
            source.fetch(&request()).await,
            Err(SourceError::FileRead(..))
        ));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<html>502 Bad Gateway</html>").unwrap();
        assert!(matches!(
            FileSource::new(file.path()).fetch(&request()).await,
            Err(SourceError::JsonParse(_))
        ));
    }
}
