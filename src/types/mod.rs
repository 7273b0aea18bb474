pub mod aggregation;
pub mod date_range;
pub mod location;
pub mod request;
pub mod series;
pub mod snapshot;
pub mod traits;
pub mod variable;
pub mod weather_condition;
