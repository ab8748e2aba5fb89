//! The user-facing location record shared by search, favorites and preferences.

use crate::types::lat_lon::LatLon;
use serde::{Deserialize, Serialize};

/// A named place the forecast can be shown for.
///
/// `full_name` is the unique key: two search hits with the same full name are
/// the same place, and the favorites store is keyed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Short display name (e.g. "Stockholm").
    pub name: String,
    /// Full display name as returned by the geocoder
    /// (e.g. "Stockholm, Stockholms kommun, Stockholms län, Sverige").
    pub full_name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Whether the user has marked this place as a favorite.
    pub is_faved: bool,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        full_name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            latitude,
            longitude,
            is_faved: false,
        }
    }

    pub fn lat_lon(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }

    /// Returns a copy with the favorite flag set to `is_faved`.
    pub fn with_faved(mut self, is_faved: bool) -> Self {
        self.is_faved = is_faved;
        self
    }

    /// Two locations name the same place when their full names match.
    pub fn same_place(&self, other: &Location) -> bool {
        self.full_name == other.full_name
    }
}
