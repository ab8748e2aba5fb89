//! Place search and reverse geocoding against Nominatim (OpenStreetMap).

use crate::geocoding::error::GeocodeError;
use crate::types::lat_lon::LatLon;
use crate::types::location::Location;
use crate::utils::{build_http_client, DEFAULT_USER_AGENT};
use bon::bon;
use log::{debug, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const REVERSE_ZOOM: &str = "15";

/// Name and full name used when a position cannot be reverse geocoded.
pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_FULL_NAME: &str = "Could not find location";

// --- Wire format (GeoJSON output of /search and /reverse) ---

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: PointGeometry,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    #[serde(default)]
    name: Option<String>,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    coordinates: Vec<f64>,
}

// `/reverse` answers 200 with `{"error": "Unable to geocode"}` over open sea.
// The error shape must be tried first: a collection without features also
// accepts it.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Failed { error: String },
    Found(FeatureCollection),
}

impl Feature {
    fn into_location(self) -> Option<Location> {
        let (longitude, latitude) = match self.geometry.coordinates.as_slice() {
            [lon, lat, ..] => (*lon, *lat),
            _ => return None,
        };
        let full_name = self.properties.display_name;
        let name = self
            .properties
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| full_name.clone());
        Some(Location::new(name, full_name, latitude, longitude))
    }
}

/// The location reported for a position no place could be found for.
pub fn unknown_location(position: LatLon) -> Location {
    Location::new(
        UNKNOWN_NAME,
        UNKNOWN_FULL_NAME,
        position.latitude(),
        position.longitude(),
    )
}

/// Nominatim client for free-text search and reverse lookups.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

#[bon]
impl NominatimGeocoder {
    /// Creates a geocoder. Defaults to the public Nominatim instance, the crate
    /// user agent and a 10 second timeout.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::ClientBuild`] if the HTTP client cannot be constructed.
    #[builder]
    pub fn new(
        base_url: Option<String>,
        user_agent: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GeocodeError> {
        let user_agent = user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let client = build_http_client(&user_agent, timeout.unwrap_or(Duration::from_secs(10)))
            .map_err(GeocodeError::ClientBuild)?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_GEOCODING_BASE_URL.to_string());
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Searches for places matching `query`.
    ///
    /// Results keep Nominatim's ranking; later hits with an already seen full name
    /// are dropped. No match is an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`GeocodeError`] on transport failure, a non-success status or an
    /// undecodable body.
    pub async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Location>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "geojson".to_string()),
        ];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let collection: FeatureCollection = self.get_json(url, &params).await?;
        let mut seen = HashSet::new();
        let locations: Vec<Location> = collection
            .features
            .into_iter()
            .filter_map(Feature::into_location)
            .filter(|location| seen.insert(location.full_name.clone()))
            .collect();
        info!("Search for '{}' returned {} locations", query, locations.len());
        Ok(locations)
    }

    /// Finds the place at `position`.
    ///
    /// When Nominatim has nothing there, the result is [`unknown_location`] at the
    /// queried coordinates rather than an error.
    ///
    /// # Errors
    ///
    /// Returns a [`GeocodeError`] on transport failure, a non-success status or an
    /// undecodable body.
    pub async fn reverse(&self, position: LatLon) -> Result<Location, GeocodeError> {
        let url = format!("{}/reverse", self.base_url);
        let params = [
            ("format", "geojson".to_string()),
            ("lat", position.latitude().to_string()),
            ("lon", position.longitude().to_string()),
            ("zoom", REVERSE_ZOOM.to_string()),
        ];

        let response: ReverseResponse = self.get_json(url, &params).await?;
        let found = match response {
            ReverseResponse::Failed { error } => {
                warn!("Reverse geocoding {} failed: {}", position, error);
                None
            }
            ReverseResponse::Found(collection) => collection
                .features
                .into_iter()
                .next()
                .and_then(Feature::into_location),
        };
        Ok(found.unwrap_or_else(|| {
            debug!("No place found at {}, using fallback", position);
            unknown_location(position)
        }))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        params: &[(&str, String)],
    ) -> Result<T, GeocodeError> {
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| GeocodeError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    GeocodeError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    GeocodeError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| GeocodeError::NetworkRequest(url.clone(), e))?;
        serde_json::from_slice(&body).map_err(|e| GeocodeError::Decode(url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SEARCH_SAMPLE: &str = include_str!("../../data/nominatim_search_sample.json");

    fn geocoder_for(server: &MockServer) -> Result<NominatimGeocoder, GeocodeError> {
        NominatimGeocoder::builder().base_url(server.uri()).build()
    }

    #[tokio::test]
    async fn test_search_maps_and_deduplicates() -> Result<(), GeocodeError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Stockholm"))
            .and(query_param("format", "geojson"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_SAMPLE))
            .expect(1)
            .mount(&server)
            .await;

        let results = geocoder_for(&server)?.search("Stockholm", None).await?;
        let full_names: Vec<&str> = results.iter().map(|l| l.full_name.as_str()).collect();
        assert_eq!(
            full_names,
            [
                "Stockholm, Stockholms kommun, Stockholms län, Sverige",
                "Stockholms län, Sverige",
                "Stockholm, Marshall County, South Dakota, United States",
            ]
        );
        assert_eq!(results[0].name, "Stockholm");
        assert_eq!(results[0].latitude, 59.3251172);
        assert_eq!(results[0].longitude, 18.0710935);
        // Empty name falls back to the display name.
        assert_eq!(results[1].name, "Stockholms län, Sverige");
        assert!(results.iter().all(|l| !l.is_faved));
        Ok(())
    }

    #[tokio::test]
    async fn test_search_passes_limit() -> Result<(), GeocodeError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Lund"))
            .and(query_param("limit", "3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "type": "FeatureCollection", "features": [] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let results = geocoder_for(&server)?.search("Lund", Some(3)).await?;
        assert!(results.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_search_http_error() -> Result<(), GeocodeError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = geocoder_for(&server)?.search("Lund", None).await;
        assert!(matches!(
            result,
            Err(GeocodeError::HttpStatus { status, .. }) if status.as_u16() == 429
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_reverse_uses_first_feature() -> Result<(), GeocodeError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("format", "geojson"))
            .and(query_param("lat", "59.3326"))
            .and(query_param("lon", "18.0649"))
            .and(query_param("zoom", "15"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "type": "FeatureCollection",
                "licence": "Data © OpenStreetMap contributors",
                "features": [{
                    "type": "Feature",
                    "properties": {
                        "name": "Norrmalm",
                        "display_name": "Norrmalm, Stockholm, Stockholms kommun, Sverige"
                    },
                    "bbox": [18.04, 59.32, 18.09, 59.35],
                    "geometry": { "type": "Point", "coordinates": [18.0631, 59.3345] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let location = geocoder_for(&server)?
            .reverse(LatLon(59.3326, 18.0649))
            .await?;
        assert_eq!(location.name, "Norrmalm");
        assert_eq!(location.lat_lon(), LatLon(59.3345, 18.0631));
        Ok(())
    }

    #[tokio::test]
    async fn test_reverse_error_body_falls_back() -> Result<(), GeocodeError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "error": "Unable to geocode" })),
            )
            .mount(&server)
            .await;

        let position = LatLon(57.0, 1.5);
        let location = geocoder_for(&server)?.reverse(position).await?;
        assert_eq!(location, unknown_location(position));
        assert_eq!(location.name, "Unknown");
        assert_eq!(location.full_name, "Could not find location");
        Ok(())
    }

    #[tokio::test]
    async fn test_reverse_empty_collection_falls_back() -> Result<(), GeocodeError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "type": "FeatureCollection", "features": [] })),
            )
            .mount(&server)
            .await;

        let location = geocoder_for(&server)?.reverse(LatLon(0.0, 0.0)).await?;
        assert_eq!(location.full_name, UNKNOWN_FULL_NAME);
        Ok(())
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() -> Result<(), GeocodeError> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let result = geocoder_for(&server)?.search("Lund", None).await;
        assert!(matches!(result, Err(GeocodeError::Decode(_, _))));
        Ok(())
    }
}
