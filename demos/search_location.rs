// demos/search_location.rs
use vaderappen::{FixedPosition, Language, LatLon, VaderError, Vaderappen};

#[tokio::main]
async fn main() -> Result<(), VaderError> {
    env_logger::init();

    let client = Vaderappen::configure()
        .language(Language::Swedish)
        .call()
        .await?;

    let hits = client
        .search_locations()
        .query("Göteborg")
        .limit(5)
        .call()
        .await?;
    for hit in &hits {
        println!("{} -> {}", hit.name, hit.full_name);
    }

    // Reverse geocode a position the way a GPS fix would be handled
    let here = client
        .resolve_location(&FixedPosition(LatLon(57.7072, 11.9668)))
        .await?;
    println!("You are in {} ({})", here.name, here.lat_lon());

    let forecast = client.forecast(here.lat_lon()).await?;
    if let Some(today) = forecast.days.first() {
        for entry in today.entries.iter().take(6) {
            println!(
                "{}  {:>5.1}  {}",
                entry.time.format("%H:%M"),
                entry.instant().air_temperature,
                entry.precipitation()
            );
        }
    }
    Ok(())
}
