//! Pull-based forecast view for front ends.
//!
//! A front end owns a [`ForecastView`] and calls [`ForecastView::refresh`] whenever
//! the selected location may have changed or the user asks for fresh data. The view
//! only goes to the network when the location differs from the last one or when
//! forced.

use crate::forecast::decoder::RawForecast;
use crate::forecast::error::ForecastError;
use crate::forecast::fetcher::ForecastFetcher;
use crate::forecast::normalizer::{normalize, Forecast};
use crate::types::language::Language;
use crate::types::lat_lon::LatLon;
use chrono::{DateTime, TimeZone};
use log::{debug, warn};
use std::future::Future;

/// Where raw forecasts come from. [`ForecastFetcher`] is the production source.
pub trait ForecastSource {
    fn fetch_forecast(
        &self,
        location: LatLon,
    ) -> impl Future<Output = Result<RawForecast, ForecastError>> + Send;
}

impl ForecastSource for ForecastFetcher {
    fn fetch_forecast(
        &self,
        location: LatLon,
    ) -> impl Future<Output = Result<RawForecast, ForecastError>> + Send {
        self.fetch(location)
    }
}

/// What a renderer should show.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ForecastState {
    /// Nothing usable yet, or the last fetch failed.
    #[default]
    Loading,
    Ready(Forecast),
}

impl ForecastState {
    pub fn forecast(&self) -> Option<&Forecast> {
        match self {
            ForecastState::Ready(forecast) => Some(forecast),
            ForecastState::Loading => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForecastView {
    location: Option<LatLon>,
    state: ForecastState,
}

impl ForecastView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ForecastState {
        &self.state
    }

    /// The location of the last refresh attempt.
    pub fn location(&self) -> Option<LatLon> {
        self.location
    }

    pub fn needs_refresh(&self, location: LatLon) -> bool {
        !matches!(self.state, ForecastState::Ready(_)) || self.location != Some(location)
    }

    /// Recomputes the forecast for `location` if it changed, if the view holds no
    /// forecast yet, or if `force` is set. Otherwise the current state is returned
    /// untouched.
    ///
    /// # Errors
    ///
    /// Propagates the source's [`ForecastError`]. The view is reset to
    /// [`ForecastState::Loading`] first, so a renderer never shows a forecast for
    /// the previous location.
    pub async fn refresh<S, Tz>(
        &mut self,
        source: &S,
        location: LatLon,
        now: &DateTime<Tz>,
        language: Language,
        force: bool,
    ) -> Result<&ForecastState, ForecastError>
    where
        S: ForecastSource,
        Tz: TimeZone,
    {
        if !force && !self.needs_refresh(location) {
            debug!("Forecast for {} is current", location);
            return Ok(&self.state);
        }

        self.location = Some(location);
        match source.fetch_forecast(location).await {
            Ok(raw) => {
                self.state = ForecastState::Ready(normalize(raw, now, language));
                Ok(&self.state)
            }
            Err(e) => {
                warn!("Forecast refresh for {} failed: {}", location, e);
                self.state = ForecastState::Loading;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::decoder::decode;
    use crate::forecast::decoder::tests::SAMPLE;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct StubSource {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl StubSource {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ForecastSource for StubSource {
        fn fetch_forecast(
            &self,
            _location: LatLon,
        ) -> impl Future<Output = Result<RawForecast, ForecastError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let body = if self.failing.load(Ordering::SeqCst) {
                "{}"
            } else {
                SAMPLE
            };
            let result =
                decode(body.as_bytes()).map_err(|e| ForecastError::Decode("stub".to_string(), e));
            async move { result }
        }
    }

    const STOCKHOLM: LatLon = LatLon(59.3293, 18.0686);
    const GOTHENBURG: LatLon = LatLon(57.7089, 11.9746);

    #[tokio::test]
    async fn test_refreshes_only_on_change_or_force() -> Result<(), ForecastError> {
        let source = StubSource::default();
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 17, 30, 0).unwrap();
        let mut view = ForecastView::new();
        assert!(view.needs_refresh(STOCKHOLM));

        let state = view.refresh(&source, STOCKHOLM, &now, Language::English, false).await?;
        assert_eq!(state.forecast().map(|f| f.days.len()), Some(4));
        assert_eq!(source.calls(), 1);

        view.refresh(&source, STOCKHOLM, &now, Language::English, false).await?;
        assert_eq!(source.calls(), 1);
        assert!(!view.needs_refresh(STOCKHOLM));

        view.refresh(&source, STOCKHOLM, &now, Language::English, true).await?;
        assert_eq!(source.calls(), 2);

        assert!(view.needs_refresh(GOTHENBURG));
        view.refresh(&source, GOTHENBURG, &now, Language::English, false).await?;
        assert_eq!(source.calls(), 3);
        assert_eq!(view.location(), Some(GOTHENBURG));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_refresh_resets_to_loading() -> Result<(), ForecastError> {
        let source = StubSource::default();
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 17, 30, 0).unwrap();
        let mut view = ForecastView::new();
        view.refresh(&source, STOCKHOLM, &now, Language::English, false).await?;

        source.failing.store(true, Ordering::SeqCst);
        let result = view.refresh(&source, GOTHENBURG, &now, Language::English, false).await;
        assert!(matches!(result, Err(ForecastError::Decode(_, _))));
        assert_eq!(view.state(), &ForecastState::Loading);

        // Still not ready, so the next pull retries even for the same location.
        assert!(view.needs_refresh(GOTHENBURG));
        source.failing.store(false, Ordering::SeqCst);
        view.refresh(&source, GOTHENBURG, &now, Language::English, false).await?;
        assert_eq!(source.calls(), 3);
        assert!(view.state().forecast().is_some());
        Ok(())
    }
}
