//! Serde model of the MET Norway Locationforecast 2.0 GeoJSON payload.
//!
//! Only fields the crate uses are declared; unknown fields are ignored. Fields the
//! provider always sends are required, so a truncated or foreign payload fails here
//! before any normalization runs.

use crate::types::lat_lon::LatLon;
use crate::types::precipitation::Precipitation;
use crate::types::weather_symbol::WeatherSymbol;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The decoded top-level Locationforecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecast {
    pub geometry: Geometry,
    pub properties: Properties,
}

impl RawForecast {
    pub fn timeseries(&self) -> &[TimeseriesEntry] {
        &self.properties.timeseries
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude, altitude?]`, GeoJSON order.
    pub coordinates: Vec<f64>,
}

impl Geometry {
    pub fn lat_lon(&self) -> Option<LatLon> {
        match self.coordinates.as_slice() {
            [lon, lat, ..] => Some(LatLon(*lat, *lon)),
            _ => None,
        }
    }

    pub fn altitude(&self) -> Option<f64> {
        self.coordinates.get(2).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub meta: Meta,
    pub timeseries: Vec<TimeseriesEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub updated_at: DateTime<Utc>,
    pub units: Units,
}

/// Unit strings for every measurement, as declared by the provider (e.g. `"celsius"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Units {
    pub air_pressure_at_sea_level: String,
    pub air_temperature: String,
    pub cloud_area_fraction: String,
    pub precipitation_amount: String,
    pub relative_humidity: String,
    pub wind_from_direction: String,
    pub wind_speed: String,
    #[serde(default)]
    pub wind_speed_of_gust: Option<String>,
    #[serde(default)]
    pub probability_of_precipitation: Option<String>,
    #[serde(default)]
    pub ultraviolet_index_clear_sky: Option<String>,
}

/// One timestamped forecast record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesEntry {
    pub time: DateTime<FixedOffset>,
    pub data: EntryData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryData {
    pub instant: Instant,
    #[serde(default)]
    pub next_1_hours: Option<SummaryWindow>,
    #[serde(default)]
    pub next_6_hours: Option<SummaryWindow>,
    #[serde(default)]
    pub next_12_hours: Option<SummaryWindow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instant {
    pub details: InstantDetails,
}

/// Measurements valid at the entry's timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstantDetails {
    pub air_pressure_at_sea_level: f64,
    pub air_temperature: f64,
    pub cloud_area_fraction: f64,
    pub relative_humidity: f64,
    pub wind_from_direction: f64,
    pub wind_speed: f64,
    // The rest is only sent by the "complete" product.
    #[serde(default)]
    pub air_temperature_percentile_10: Option<f64>,
    #[serde(default)]
    pub air_temperature_percentile_90: Option<f64>,
    #[serde(default)]
    pub dew_point_temperature: Option<f64>,
    #[serde(default)]
    pub fog_area_fraction: Option<f64>,
    #[serde(default)]
    pub wind_speed_of_gust: Option<f64>,
    #[serde(default)]
    pub ultraviolet_index_clear_sky: Option<f64>,
}

/// A forward-looking aggregate over the next 1, 6 or 12 hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryWindow {
    pub summary: Summary,
    #[serde(default)]
    pub details: WindowDetails,
}

impl SummaryWindow {
    pub fn symbol(&self) -> Option<WeatherSymbol> {
        WeatherSymbol::from_code(&self.summary.symbol_code)
    }

    /// Picks the best precipitation estimate this window offers.
    ///
    /// A min/max range wins when both bounds are present and the max is positive,
    /// then a positive single amount. Anything else, including an amount of exactly
    /// zero, is [`Precipitation::Absent`].
    pub fn precipitation(&self) -> Precipitation {
        let details = &self.details;
        let probability = details.probability_of_precipitation;
        match (
            details.precipitation_amount_min,
            details.precipitation_amount_max,
            details.precipitation_amount,
        ) {
            (Some(min), Some(max), _) if max > 0.0 => Precipitation::Range {
                min,
                max,
                probability,
            },
            (_, _, Some(amount)) if amount > 0.0 => Precipitation::Amount {
                amount,
                probability,
            },
            _ => Precipitation::Absent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub symbol_code: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowDetails {
    #[serde(default)]
    pub precipitation_amount: Option<f64>,
    #[serde(default)]
    pub precipitation_amount_min: Option<f64>,
    #[serde(default)]
    pub precipitation_amount_max: Option<f64>,
    #[serde(default)]
    pub probability_of_precipitation: Option<f64>,
    #[serde(default)]
    pub probability_of_thunder: Option<f64>,
    #[serde(default)]
    pub air_temperature_min: Option<f64>,
    #[serde(default)]
    pub air_temperature_max: Option<f64>,
    #[serde(default)]
    pub ultraviolet_index_clear_sky_max: Option<f64>,
}

/// The summary windows in order of preference: shorter windows are more precise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowSpan {
    OneHour,
    SixHours,
    TwelveHours,
}

impl WindowSpan {
    pub const PREFERENCE: [WindowSpan; 3] = [
        WindowSpan::OneHour,
        WindowSpan::SixHours,
        WindowSpan::TwelveHours,
    ];

    pub fn hours(&self) -> u32 {
        match self {
            WindowSpan::OneHour => 1,
            WindowSpan::SixHours => 6,
            WindowSpan::TwelveHours => 12,
        }
    }
}

impl TimeseriesEntry {
    pub fn instant(&self) -> &InstantDetails {
        &self.data.instant.details
    }

    pub fn window(&self, span: WindowSpan) -> Option<&SummaryWindow> {
        match span {
            WindowSpan::OneHour => self.data.next_1_hours.as_ref(),
            WindowSpan::SixHours => self.data.next_6_hours.as_ref(),
            WindowSpan::TwelveHours => self.data.next_12_hours.as_ref(),
        }
    }

    /// The most precise window present, with its span.
    pub fn best_window(&self) -> Option<(WindowSpan, &SummaryWindow)> {
        WindowSpan::PREFERENCE
            .into_iter()
            .find_map(|span| self.window(span).map(|window| (span, window)))
    }

    /// Symbol of the most precise window present.
    pub fn symbol(&self) -> Option<WeatherSymbol> {
        self.best_window().and_then(|(_, window)| window.symbol())
    }

    /// Precipitation of the most precise window present. Once a window is chosen a
    /// coarser one is never consulted, even when the chosen one has no figure.
    pub fn precipitation(&self) -> Precipitation {
        self.best_window()
            .map(|(_, window)| window.precipitation())
            .unwrap_or(Precipitation::Absent)
    }

    pub fn local_time<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        self.time.with_timezone(tz)
    }
}

/// Decodes a Locationforecast response body.
pub fn decode(bytes: &[u8]) -> Result<RawForecast, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::weather_symbol::Condition;
    use serde_json::json;

    pub(crate) const SAMPLE: &str = include_str!("../../data/locationforecast_sample.json");

    pub(crate) fn instant_json() -> serde_json::Value {
        json!({
            "details": {
                "air_pressure_at_sea_level": 1012.3,
                "air_temperature": 11.4,
                "cloud_area_fraction": 75.0,
                "relative_humidity": 81.2,
                "wind_from_direction": 210.5,
                "wind_speed": 4.1
            }
        })
    }

    pub(crate) fn entry(time: &str, data: serde_json::Value) -> TimeseriesEntry {
        let mut data = data;
        data["instant"] = instant_json();
        serde_json::from_value(json!({ "time": time, "data": data }))
            .expect("test entry should decode")
    }

    #[test]
    fn test_decode_sample() -> Result<(), serde_json::Error> {
        let forecast = decode(SAMPLE.as_bytes())?;
        assert_eq!(forecast.geometry.lat_lon(), Some(LatLon(59.3293, 18.0686)));
        assert_eq!(forecast.geometry.altitude(), Some(28.0));
        assert_eq!(forecast.properties.meta.units.air_temperature, "celsius");
        assert_eq!(forecast.timeseries().len(), 8);

        let first = &forecast.timeseries()[0];
        assert_eq!(first.time.to_rfc3339(), "2026-10-15T18:00:00+00:00");
        assert_eq!(first.instant().air_temperature, 9.8);
        assert_eq!(first.instant().wind_speed_of_gust, Some(7.9));
        Ok(())
    }

    #[test]
    fn test_missing_required_instant_field_fails() {
        let payload = SAMPLE.replacen("\"air_temperature\": 9.8,", "", 1);
        assert!(decode(payload.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_timeseries_fails() {
        let payload = json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [18.0, 59.0, 10.0] },
            "properties": {
                "meta": {
                    "updated_at": "2026-10-15T17:00:00Z",
                    "units": {
                        "air_pressure_at_sea_level": "hPa",
                        "air_temperature": "celsius",
                        "cloud_area_fraction": "%",
                        "precipitation_amount": "mm",
                        "relative_humidity": "%",
                        "wind_from_direction": "degrees",
                        "wind_speed": "m/s"
                    }
                }
            }
        });
        assert!(serde_json::from_value::<RawForecast>(payload).is_err());
    }

    #[test]
    fn test_window_without_details_decodes() {
        let entry = entry(
            "2026-10-20T00:00:00Z",
            json!({ "next_12_hours": { "summary": { "symbol_code": "cloudy" } } }),
        );
        let window = entry.window(WindowSpan::TwelveHours).unwrap();
        assert_eq!(window.details, WindowDetails::default());
        assert_eq!(entry.precipitation(), Precipitation::Absent);
        assert_eq!(entry.symbol().map(|s| s.condition), Some(Condition::Cloudy));
    }

    #[test]
    fn test_no_windows_means_no_symbol_and_no_precipitation() {
        let entry = entry("2026-10-25T00:00:00Z", json!({}));
        assert!(entry.best_window().is_none());
        assert_eq!(entry.symbol(), None);
        assert!(entry.precipitation().is_absent());
    }

    #[test]
    fn test_only_six_hour_window_is_used() {
        let entry = entry(
            "2026-10-18T06:00:00Z",
            json!({
                "next_6_hours": {
                    "summary": { "symbol_code": "lightrain" },
                    "details": { "precipitation_amount": 1.6, "probability_of_precipitation": 55.0 }
                }
            }),
        );
        let (span, _) = entry.best_window().unwrap();
        assert_eq!(span, WindowSpan::SixHours);
        assert_eq!(span.hours(), 6);
        assert_eq!(entry.symbol().map(|s| s.condition), Some(Condition::LightRain));
        assert_eq!(
            entry.precipitation(),
            Precipitation::Amount {
                amount: 1.6,
                probability: Some(55.0)
            }
        );
    }

    #[test]
    fn test_one_hour_window_wins_over_coarser_windows() {
        let entry = entry(
            "2026-10-15T19:00:00Z",
            json!({
                "next_1_hours": {
                    "summary": { "symbol_code": "cloudy" },
                    "details": { "precipitation_amount": 0.0 }
                },
                "next_6_hours": {
                    "summary": { "symbol_code": "heavyrain" },
                    "details": { "precipitation_amount": 9.0 }
                }
            }),
        );
        assert_eq!(entry.symbol().map(|s| s.condition), Some(Condition::Cloudy));
        // The chosen 1h window reports zero, which is "no data", not a fallback to 6h.
        assert_eq!(entry.precipitation(), Precipitation::Absent);
    }

    #[test]
    fn test_range_preferred_over_amount() {
        let entry = entry(
            "2026-10-15T20:00:00Z",
            json!({
                "next_1_hours": {
                    "summary": { "symbol_code": "rain" },
                    "details": {
                        "precipitation_amount": 1.1,
                        "precipitation_amount_min": 0.5,
                        "precipitation_amount_max": 2.0,
                        "probability_of_precipitation": 30.0
                    }
                }
            }),
        );
        let precipitation = entry.precipitation();
        assert_eq!(
            precipitation,
            Precipitation::Range {
                min: 0.5,
                max: 2.0,
                probability: Some(30.0)
            }
        );
        assert_eq!(precipitation.to_string(), "0.5–2.0 (30%)");
    }

    #[test]
    fn test_zero_max_range_falls_back_to_amount() {
        let entry = entry(
            "2026-10-15T21:00:00Z",
            json!({
                "next_1_hours": {
                    "summary": { "symbol_code": "cloudy" },
                    "details": {
                        "precipitation_amount": 0.3,
                        "precipitation_amount_min": 0.0,
                        "precipitation_amount_max": 0.0
                    }
                }
            }),
        );
        assert_eq!(
            entry.precipitation(),
            Precipitation::Amount {
                amount: 0.3,
                probability: None
            }
        );
    }

    #[test]
    fn test_unknown_symbol_code_is_not_a_decode_error() {
        let entry = entry(
            "2026-10-15T22:00:00Z",
            json!({ "next_1_hours": { "summary": { "symbol_code": "volcanicash_day" } } }),
        );
        assert_eq!(entry.symbol(), None);
    }
}
