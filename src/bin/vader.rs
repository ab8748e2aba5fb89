use chrono::Local;
use clap::builder::{styling::AnsiColor, Styles};
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::PathBuf;
use vaderappen::{Day, FixedPosition, Language, LatLon, Location, TimeseriesEntry, Vaderappen};

const ABOUT: &str = "Weather forecasts from MET Norway in the terminal";

const LONG_ABOUT: &str = "
Shows the MET Norway forecast for a place, grouped by day.

Places are found through OpenStreetMap Nominatim. The selected place and your favorites are
saved, so later runs of `vader forecast` show the same place unless a device position is given
with --lat/--lon and GPS use is switched on.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles = STYLES, about = ABOUT, long_about = LONG_ABOUT)]
struct Args {
    /// Folder for favorites and preferences (defaults to the platform data folder)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Language for day labels: en or sv
    #[arg(long = "lang", global = true, default_value = "en")]
    language: Language,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the forecast for the saved place or the given position
    Forecast {
        /// Device latitude, used together with --lon
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Device longitude, used together with --lat
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Number of days to show
        #[arg(long, default_value_t = 3)]
        days: usize,
        /// Print every timeseries entry instead of one line per day
        #[arg(long)]
        hourly: bool,
    },
    /// Search for places by name
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Add the best match for a query to the favorites
    Favorite {
        query: String,
        /// Remove it from the favorites instead
        #[arg(long)]
        remove: bool,
    },
    /// List the favorites
    Favorites,
    /// Make the best match for a query the saved place
    Select {
        query: String,
        /// Let a device position override the saved place
        #[arg(long)]
        gps: bool,
    },
    /// Switch use of the device position on or off
    Gps { state: Switch },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Switch {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut client = Vaderappen::configure()
        .maybe_data_folder(args.data_dir)
        .language(args.language)
        .call()
        .await?;

    match args.command {
        Command::Forecast {
            lat,
            lon,
            days,
            hourly,
        } => {
            let position = lat.zip(lon).map(|(lat, lon)| FixedPosition(LatLon(lat, lon)));
            let location = client.resolve_location(&position).await?;
            let forecast = client.forecast(location.lat_lon()).await?;

            println!("{}", describe(&location));
            println!(
                "Updated {}",
                forecast.updated_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            );
            for day in forecast.days.iter().take(days) {
                if hourly {
                    print_hourly(day);
                } else {
                    print_daily(day);
                }
            }
        }
        Command::Search { query, limit } => {
            let hits = client
                .search_locations()
                .query(&query)
                .limit(limit)
                .call()
                .await?;
            if hits.is_empty() {
                println!("No places found for '{}'", query);
            }
            for hit in &hits {
                println!("{}", describe(hit));
            }
        }
        Command::Favorite { query, remove } => {
            let location = best_match(&client, &query).await?;
            client.set_favorite(&location, !remove).await?;
            let verb = if remove { "Removed" } else { "Saved" };
            println!("{} {}", verb, location.full_name);
        }
        Command::Favorites => {
            let mut any = false;
            for favorite in client.favorites() {
                any = true;
                println!("{}", describe(favorite));
            }
            if !any {
                println!("No favorites yet");
            }
        }
        Command::Select { query, gps } => {
            let location = best_match(&client, &query).await?;
            println!("Selected {}", location.full_name);
            client.select_location(location, gps).await?;
        }
        Command::Gps { state } => {
            let on = matches!(state, Switch::On);
            client.set_use_gps(on).await?;
            println!("GPS {}", if on { "on" } else { "off" });
        }
    }
    Ok(())
}

async fn best_match(client: &Vaderappen, query: &str) -> Result<Location, Box<dyn Error>> {
    client
        .search_locations()
        .query(query)
        .limit(1)
        .call()
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| format!("No place found for '{}'", query).into())
}

fn describe(location: &Location) -> String {
    let star = if location.is_faved { "★ " } else { "" };
    format!("{}{} ({})", star, location.full_name, location.lat_lon())
}

fn print_daily(day: &Day) {
    let temperatures = day
        .temperature_range()
        .map(|(lo, hi)| format!("{:.0}..{:.0} {}", lo, hi, unit_symbol(&day.units.air_temperature)))
        .unwrap_or_default();
    let symbol = day
        .entries
        .iter()
        .find_map(TimeseriesEntry::symbol)
        .map(|symbol| symbol.description())
        .unwrap_or("");
    println!("{:<12} {:<12} {}", day.label, temperatures, symbol);
}

fn print_hourly(day: &Day) {
    println!("{}", day.label);
    for entry in &day.entries {
        let instant = entry.instant();
        let symbol = entry.symbol().map(|s| s.description()).unwrap_or("");
        println!(
            "  {}  {:>5.1} {}  {:>4.1} {}  {:<22} {}",
            entry.local_time(&Local).format("%H:%M"),
            instant.air_temperature,
            unit_symbol(&day.units.air_temperature),
            instant.wind_speed,
            day.units.wind_speed,
            symbol,
            entry.precipitation()
        );
    }
}

fn unit_symbol(unit: &str) -> &str {
    match unit {
        "celsius" => "°C",
        "fahrenheit" => "°F",
        other => other,
    }
}
