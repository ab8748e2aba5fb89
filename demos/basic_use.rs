// demos/basic_use.rs
use vaderappen::{LatLon, VaderError, Vaderappen};

#[tokio::main]
async fn main() -> Result<(), VaderError> {
    // Set RUST_LOG=info (or debug) to see requests and storage activity
    env_logger::init();

    let client = Vaderappen::new().await?;

    // Stockholm, Gamla stan
    let location = LatLon(59.3251, 18.0711);
    let forecast = client.forecast(location).await?;

    println!("Forecast for {} (updated {})", location, forecast.updated_at);
    for day in &forecast.days {
        let first = &day.entries[0];
        println!(
            "{:<14} {:>2} entries, first at {}: {:.1} {} {}",
            day.label,
            day.entries.len(),
            first.time.format("%H:%M"),
            first.instant().air_temperature,
            day.units.air_temperature,
            first
                .symbol()
                .map(|symbol| symbol.description())
                .unwrap_or("-"),
        );
    }

    Ok(())
}
