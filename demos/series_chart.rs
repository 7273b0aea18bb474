//! Prints the chart data for every variable over one year, as the front-end
//! would plot it.

use weathersim::{Aggregation, DateRange, Location, VariableKind, WeatherSim, WeatherSimError};

#[tokio::main]
async fn main() -> Result<(), WeatherSimError> {
    // Set RUST_LOG=debug to see which data source answered
    env_logger::init();

    let sim = WeatherSim::offline();
    let santa_cruz = Location::new(-17.7833, -63.1821)?;
    let range = DateRange::new("2024-01-01", "2024-12-31")?;

    for variable in VariableKind::ALL {
        let resolved = sim
            .series()
            .location(santa_cruz)
            .range(range)
            .variable(variable)
            .aggregation(Aggregation::Monthly)
            .call()
            .await;
        println!("--- {} ({}) ---", variable, variable.unit());
        for point in &resolved.value {
            println!("{:>8} {:>8.1}", point.label, point.value);
        }
    }

    // The chart payload a front-end receives
    let humidity = sim
        .series()
        .location(santa_cruz)
        .range(range)
        .variable(VariableKind::Humidity)
        .aggregation(Aggregation::Weekly)
        .call()
        .await;
    println!("{}", serde_json::to_string_pretty(&humidity.value).unwrap_or_default());

    Ok(())
}
