pub mod language;
pub mod lat_lon;
pub mod location;
pub mod precipitation;
pub mod weather_symbol;
