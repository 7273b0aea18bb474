pub mod series_client;
pub mod snapshot_client;
