// demos/favorites.rs
use std::path::PathBuf;
use vaderappen::{ForecastView, NoPosition, VaderError, Vaderappen};

#[tokio::main]
async fn main() -> Result<(), VaderError> {
    env_logger::init();

    // Keep demo state out of the real data folder
    let folder = PathBuf::from("target/demo-data");
    let mut client = Vaderappen::with_data_folder(folder).await?;

    for query in ["Abisko", "Visby"] {
        let hits = client.search_locations().query(query).limit(1).call().await?;
        if let Some(place) = hits.into_iter().next() {
            client.set_favorite(&place, true).await?;
            println!("Saved {}", place.full_name);
        }
    }

    let favorites: Vec<_> = client.favorites().cloned().collect();
    println!("{} favorites", favorites.len());

    if let Some(first) = favorites.into_iter().next() {
        client.select_location(first, false).await?;
    }

    // Without GPS the saved location is used
    let location = client.resolve_location(&NoPosition).await?;
    let mut view = ForecastView::new();
    let state = client.refresh_view(&mut view, location.lat_lon(), false).await?;
    if let Some(forecast) = state.forecast() {
        println!("{}: {} days", location.name, forecast.days.len());
    }
    // Same location again: served from the view, no request
    client.refresh_view(&mut view, location.lat_lon(), false).await?;

    Ok(())
}
