//! HTTP client for the MET Norway Locationforecast 2.0 API.

use crate::forecast::decoder::{decode, RawForecast};
use crate::forecast::error::ForecastError;
use crate::types::lat_lon::LatLon;
use crate::utils::{build_http_client, DEFAULT_USER_AGENT};
use bon::bon;
use log::{info, warn};
use reqwest::Client;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_FORECAST_BASE_URL: &str = "https://api.met.no";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Which Locationforecast variant to request.
///
/// `Complete` adds percentiles, gusts, dew point and min/max precipitation; the
/// precipitation ranges shown to users only exist there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ForecastProduct {
    Compact,
    #[default]
    Complete,
}

impl ForecastProduct {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ForecastProduct::Compact => "compact",
            ForecastProduct::Complete => "complete",
        }
    }
}

impl fmt::Display for ForecastProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

impl FromStr for ForecastProduct {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(ForecastProduct::Compact),
            "complete" => Ok(ForecastProduct::Complete),
            other => Err(format!("Unknown forecast product '{}'", other)),
        }
    }
}

/// Downloads and decodes Locationforecast payloads.
///
/// Every request carries the configured `User-Agent`; MET Norway blocks
/// anonymous clients.
#[derive(Debug, Clone)]
pub struct ForecastFetcher {
    client: Client,
    base_url: String,
    product: ForecastProduct,
}

#[bon]
impl ForecastFetcher {
    /// Creates a fetcher. Every argument is optional and falls back to the
    /// public MET Norway endpoint, the crate user agent, a 10 second timeout
    /// and the `complete` product.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::ClientBuild`] if the HTTP client cannot be
    /// constructed (e.g. the user agent is not a valid header value).
    #[builder]
    pub fn new(
        base_url: Option<String>,
        user_agent: Option<String>,
        timeout: Option<Duration>,
        product: Option<ForecastProduct>,
    ) -> Result<Self, ForecastError> {
        let user_agent = user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let client = build_http_client(&user_agent, timeout.unwrap_or(DEFAULT_TIMEOUT))
            .map_err(ForecastError::ClientBuild)?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_FORECAST_BASE_URL.to_string());
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            product: product.unwrap_or_default(),
        })
    }

    pub fn product(&self) -> ForecastProduct {
        self.product
    }

    /// The request URL for `location`, coordinates rounded to four decimals.
    pub fn url_for(&self, location: LatLon) -> String {
        let rounded = location.rounded(4);
        format!(
            "{}/weatherapi/locationforecast/2.0/{}?lat={}&lon={}",
            self.base_url,
            self.product.path_segment(),
            rounded.latitude(),
            rounded.longitude()
        )
    }

    /// Fetches and decodes the forecast for `location`. No retry is attempted.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::NetworkRequest`] if the request could not be sent or the body not read.
    /// * [`ForecastError::HttpStatus`] for any non-success status.
    /// * [`ForecastError::Decode`] if the body is not a valid Locationforecast payload.
    pub async fn fetch(&self, location: LatLon) -> Result<RawForecast, ForecastError> {
        let url = self.url_for(location);
        info!("Fetching forecast from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ForecastError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    ForecastError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ForecastError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| ForecastError::NetworkRequest(url.clone(), e))?;
        let raw = decode(&body).map_err(|e| ForecastError::Decode(url.clone(), e))?;
        info!(
            "Decoded {} timeseries entries from {}",
            raw.timeseries().len(),
            url
        );
        Ok(raw)
    }
}
