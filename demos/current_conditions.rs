use weathersim::{DateRange, Location, VariableKind, WeatherSim, WeatherSimError};

#[tokio::main]
async fn main() -> Result<(), WeatherSimError> {
    env_logger::init();

    let sim = WeatherSim::offline();
    let cities = [
        ("La Paz", -16.4897, -68.1193),
        ("Reykjavik", 64.1466, -21.9426),
        ("Singapore", 1.3521, 103.8198),
    ];
    let week = DateRange::new("2024-07-01", "2024-07-07")?;

    for (name, latitude, longitude) in cities {
        let snapshot = sim
            .snapshot()
            .location(Location::new(latitude, longitude)?)
            .range(week)
            .call()
            .await
            .into_inner();
        println!("{name}: {}", snapshot.condition());
        for kind in VariableKind::ALL {
            if let Some(value) = snapshot.get(kind) {
                println!("  {:<14} {:>7.1} {}", kind.name(), value, kind.unit());
            }
        }
    }
    Ok(())
}
