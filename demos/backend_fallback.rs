//! Shows the fallback chain: a results file, an HTTP backend that is not
//! running, and the in-process synthetic backend.
//!
//! Run with `RUST_LOG=info` to see which source answered.

use std::time::Duration;
use weathersim::{
    FileSource, HttpSource, SelectorConfig, SyntheticBackend, WeatherRequest, WeatherSim,
    WeatherSimError,
};

#[tokio::main]
async fn main() -> Result<(), WeatherSimError> {
    env_logger::init();

    let request = WeatherRequest::new(-17.7833, -63.1821, "2024-01-01", "2024-01-14")
        .with_variable("humidity");

    // Missing results file: falls back to generation
    let from_file = WeatherSim::new(FileSource::new("resultados.json"));
    let resolved = from_file.series_for(&request).await?;
    println!("results file -> {:?}: {:?}", resolved.origin, resolved.value.values());

    // Nothing listening: the fetch fails fast and the series is generated
    let config = SelectorConfig::builder()
        .fetch_timeout(Duration::from_secs(2))
        .build();
    let from_http = WeatherSim::with_config(
        HttpSource::new("http://127.0.0.1:3000/api/calculate-weather"),
        config,
    );
    let resolved = from_http.series_for(&request).await?;
    println!("http backend -> {:?}: {:?}", resolved.origin, resolved.value.values());

    // In-process backend: external data is served
    let synthetic = WeatherSim::new(SyntheticBackend::from_entropy());
    let resolved = synthetic.series_for(&request).await?;
    println!("synthetic    -> {:?}: {:?}", resolved.origin, resolved.value.values());
    println!("aggregates: {:?}", resolved.aggregates);

    let snapshot = synthetic.snapshot_for(&request).await?;
    println!("snapshot     -> {:?}: {}", snapshot.origin, snapshot.value.condition());

    Ok(())
}
