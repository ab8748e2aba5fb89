//! This module provides the main entry point of the crate.
//! It ties together forecast fetching, place search, favorites and the saved
//! location preference behind a single [`Vaderappen`] client.

use crate::error::VaderError;
use crate::forecast::decoder::RawForecast;
use crate::forecast::fetcher::{ForecastFetcher, ForecastProduct};
use crate::forecast::normalizer::{normalize, Forecast};
use crate::geocoding::nominatim::NominatimGeocoder;
use crate::position::PositionProvider;
use crate::storage::favorites::FavoritesStore;
use crate::storage::preferences::{Preferences, PreferencesStore};
use crate::types::language::Language;
use crate::types::lat_lon::LatLon;
use crate::types::location::Location;
use crate::utils::{ensure_data_dir_exists, get_data_dir};
use crate::view::{ForecastState, ForecastView};
use bon::bon;
use chrono::{DateTime, Local, TimeZone};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The main client struct.
///
/// Owns the HTTP clients for MET Norway and Nominatim and the two local stores
/// (favorites and preferences) kept in the data folder.
///
/// Create an instance using [`Vaderappen::new()`] for the default data folder,
/// [`Vaderappen::with_data_folder()`] for a custom one, or
/// [`Vaderappen::configure()`] to override endpoints, user agent and the like.
///
/// # Examples
///
/// ```no_run
/// # use vaderappen::{Vaderappen, VaderError, LatLon};
/// # async fn run() -> Result<(), VaderError> {
/// let client = Vaderappen::new().await?;
/// let forecast = client.forecast(LatLon(59.3293, 18.0686)).await?;
/// for day in &forecast.days {
///     println!("{}: {} entries", day.label, day.entries.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Vaderappen {
    fetcher: ForecastFetcher,
    geocoder: NominatimGeocoder,
    favorites: FavoritesStore,
    preferences: PreferencesStore,
    language: Language,
    data_folder: PathBuf,
}

#[bon]
impl Vaderappen {
    /// Creates a client with full control over its configuration.
    ///
    /// Every setter is optional:
    ///
    /// * `.data_folder(PathBuf)`: where favorites and preferences are kept. Defaults to
    ///   the platform data directory (e.g. `~/.local/share/vaderappen` on Linux).
    /// * `.user_agent(String)`: sent to both upstream services. Defaults to `vaderappen/<version>`.
    /// * `.forecast_base_url(String)`: defaults to `https://api.met.no`.
    /// * `.geocoding_base_url(String)`: defaults to `https://nominatim.openstreetmap.org`.
    /// * `.timeout(Duration)`: per request. Defaults to 10 seconds.
    /// * `.product(ForecastProduct)`: defaults to [`ForecastProduct::Complete`].
    /// * `.language(Language)`: for day labels. Defaults to English.
    ///
    /// # Errors
    ///
    /// * [`VaderError::DataDirResolution`] if no data folder was given and the platform has none.
    /// * [`VaderError::DataDirCreation`] if the folder cannot be created or is a file.
    /// * [`VaderError::Storage`] if existing favorites or preferences cannot be read.
    /// * [`VaderError::Forecast`] or [`VaderError::Geocode`] if an HTTP client cannot be built.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use vaderappen::{Vaderappen, VaderError, Language, ForecastProduct};
    /// # use std::time::Duration;
    /// # async fn run() -> Result<(), VaderError> {
    /// let client = Vaderappen::configure()
    ///     .user_agent("my-weather-board/1.0 me@example.com".to_string())
    ///     .language(Language::Swedish)
    ///     .product(ForecastProduct::Compact)
    ///     .timeout(Duration::from_secs(5))
    ///     .call()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn configure(
        data_folder: Option<PathBuf>,
        user_agent: Option<String>,
        forecast_base_url: Option<String>,
        geocoding_base_url: Option<String>,
        timeout: Option<Duration>,
        product: Option<ForecastProduct>,
        language: Option<Language>,
    ) -> Result<Self, VaderError> {
        let data_folder = match data_folder {
            Some(folder) => folder,
            None => get_data_dir().map_err(VaderError::DataDirResolution)?,
        };
        ensure_data_dir_exists(&data_folder)
            .await
            .map_err(|e| VaderError::DataDirCreation(data_folder.clone(), e))?;

        let fetcher = ForecastFetcher::builder()
            .maybe_base_url(forecast_base_url)
            .maybe_user_agent(user_agent.clone())
            .maybe_timeout(timeout)
            .maybe_product(product)
            .build()?;
        let geocoder = NominatimGeocoder::builder()
            .maybe_base_url(geocoding_base_url)
            .maybe_user_agent(user_agent)
            .maybe_timeout(timeout)
            .build()?;

        Ok(Self {
            fetcher,
            geocoder,
            favorites: FavoritesStore::open(&data_folder).await?,
            preferences: PreferencesStore::open(&data_folder).await?,
            language: language.unwrap_or_default(),
            data_folder,
        })
    }

    /// Creates a client that keeps its state in `data_folder`, with all other
    /// settings at their defaults. The folder is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// See [`Vaderappen::configure()`].
    pub async fn with_data_folder(data_folder: PathBuf) -> Result<Self, VaderError> {
        Self::configure().data_folder(data_folder).call().await
    }

    /// Creates a client using the default data folder and default settings.
    ///
    /// # Errors
    ///
    /// See [`Vaderappen::configure()`].
    pub async fn new() -> Result<Self, VaderError> {
        Self::configure().call().await
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn fetcher(&self) -> &ForecastFetcher {
        &self.fetcher
    }

    // --- Forecasts ---

    /// Fetches the forecast for `location` and buckets it by day in the local
    /// time zone.
    ///
    /// # Errors
    ///
    /// Returns [`VaderError::Forecast`] if the request or decoding fails.
    pub async fn forecast(&self, location: LatLon) -> Result<Forecast, VaderError> {
        self.forecast_at(location, &Local::now()).await
    }

    /// Like [`Vaderappen::forecast()`], but days are grouped in `now`'s time zone
    /// and labelled relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns [`VaderError::Forecast`] if the request or decoding fails.
    pub async fn forecast_at<Tz: TimeZone>(
        &self,
        location: LatLon,
        now: &DateTime<Tz>,
    ) -> Result<Forecast, VaderError> {
        let raw = self.raw_forecast(location).await?;
        Ok(normalize(raw, now, self.language))
    }

    /// The decoded provider payload, without day bucketing.
    pub async fn raw_forecast(&self, location: LatLon) -> Result<RawForecast, VaderError> {
        Ok(self.fetcher.fetch(location).await?)
    }

    /// Refreshes `view` for `location` in the local time zone, going to the network
    /// only when the location changed or `force` is set.
    pub async fn refresh_view<'v>(
        &self,
        view: &'v mut ForecastView,
        location: LatLon,
        force: bool,
    ) -> Result<&'v ForecastState, VaderError> {
        Ok(view
            .refresh(&self.fetcher, location, &Local::now(), self.language, force)
            .await?)
    }

    // --- Places ---

    /// Searches for places by name. Results that are saved favorites come back
    /// with `is_faved` set.
    ///
    /// * `.query(&str)`: **Required.** Free text, e.g. `"Lund"`.
    /// * `.limit(usize)`: Optional. Maximum number of hits to ask Nominatim for.
    ///
    /// # Errors
    ///
    /// Returns [`VaderError::Geocode`] if the search request fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use vaderappen::{Vaderappen, VaderError};
    /// # async fn run() -> Result<(), VaderError> {
    /// let client = Vaderappen::new().await?;
    /// let hits = client.search_locations().query("Kiruna").limit(5).call().await?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn search_locations(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Location>, VaderError> {
        let hits = self.geocoder.search(query, limit).await?;
        Ok(hits.into_iter().map(|hit| self.mark_faved(hit)).collect())
    }

    /// Looks up the place at `position`, flagged as a favorite if it is one.
    /// Positions with no known place give the "Unknown" location.
    pub async fn reverse_geocode(&self, position: LatLon) -> Result<Location, VaderError> {
        let location = self.geocoder.reverse(position).await?;
        Ok(self.mark_faved(location))
    }

    fn mark_faved(&self, location: Location) -> Location {
        let faved = self.favorites.is_favorite(&location.full_name);
        location.with_faved(faved)
    }

    // --- Favorites & preferences ---

    pub fn favorites(&self) -> impl Iterator<Item = &Location> {
        self.favorites.favorites()
    }

    /// Adds `location` to the favorites, or removes it when `faved` is false.
    /// A selected location naming the same place gets its flag updated too.
    pub async fn set_favorite(
        &mut self,
        location: &Location,
        faved: bool,
    ) -> Result<(), VaderError> {
        self.favorites.set_favorite(location, faved).await?;
        let selected = self
            .preferences
            .location()
            .filter(|selected| selected.same_place(location) && selected.is_faved != faved)
            .cloned();
        if let Some(selected) = selected {
            let use_gps = self.preferences.use_gps();
            self.preferences
                .save_location(selected.with_faved(faved), use_gps)
                .await?;
        }
        info!(
            "{} '{}'",
            if faved { "Saved favorite" } else { "Removed favorite" },
            location.full_name
        );
        Ok(())
    }

    /// Makes `location` the saved location and sets whether GPS overrides it.
    pub async fn select_location(
        &mut self,
        location: Location,
        use_gps: bool,
    ) -> Result<(), VaderError> {
        let location = self.mark_faved(location);
        info!("Selected '{}' (use GPS: {})", location.full_name, use_gps);
        Ok(self.preferences.save_location(location, use_gps).await?)
    }

    pub async fn set_use_gps(&mut self, use_gps: bool) -> Result<(), VaderError> {
        Ok(self.preferences.set_use_gps(use_gps).await?)
    }

    pub fn preferences(&self) -> &Preferences {
        self.preferences.preferences()
    }

    /// Decides which location to show.
    ///
    /// The device position wins when there is no saved location or GPS use is
    /// enabled; it is reverse geocoded to a named place. Without a fix the saved
    /// location is used.
    ///
    /// # Errors
    ///
    /// * [`VaderError::NoLocation`] if there is neither a saved location nor a position.
    /// * [`VaderError::Geocode`] if reverse geocoding the position fails.
    pub async fn resolve_location<P: PositionProvider>(
        &self,
        position_provider: &P,
    ) -> Result<Location, VaderError> {
        let saved = self.preferences.location().cloned();
        if saved.is_none() || self.preferences.use_gps() {
            if let Some(position) = position_provider.current_position().await {
                info!("Resolving location from device position {}", position);
                return self.reverse_geocode(position).await;
            }
            warn!("No device position available, falling back to the saved location");
        }
        saved
            .map(|location| self.mark_faved(location))
            .ok_or(VaderError::NoLocation)
    }
}
