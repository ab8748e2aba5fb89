mod error;
mod forecast;
mod geocoding;
mod position;
mod storage;
mod types;
mod utils;
mod vaderappen;
mod view;

pub use error::VaderError;
pub use vaderappen::*;

pub use forecast::decoder::{
    decode, EntryData, Geometry, Instant, InstantDetails, Meta, Properties, RawForecast,
    Summary, SummaryWindow, TimeseriesEntry, Units, WindowDetails, WindowSpan,
};
pub use forecast::error::ForecastError;
pub use forecast::fetcher::{
    ForecastFetcher, ForecastProduct, DEFAULT_FORECAST_BASE_URL, DEFAULT_TIMEOUT,
};
pub use forecast::normalizer::{day_label, normalize, Day, Forecast};

pub use geocoding::error::GeocodeError;
pub use geocoding::nominatim::{
    unknown_location, NominatimGeocoder, DEFAULT_GEOCODING_BASE_URL, UNKNOWN_FULL_NAME,
    UNKNOWN_NAME,
};

pub use storage::error::StorageError;
pub use storage::favorites::{FavoritesStore, FAVORITES_FILE_NAME};
pub use storage::preferences::{Preferences, PreferencesStore, PREFERENCES_FILE_NAME};

pub use position::{FixedPosition, NoPosition, PositionProvider};
pub use view::{ForecastSource, ForecastState, ForecastView};

pub use types::language::{Language, UnknownLanguage};
pub use types::lat_lon::LatLon;
pub use types::location::Location;
pub use types::precipitation::Precipitation;
pub use types::weather_symbol::{Condition, SymbolVariant, WeatherSymbol};

pub use utils::{get_data_dir, DEFAULT_USER_AGENT};
