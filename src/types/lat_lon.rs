//! Geographic coordinate pair used by every request in the crate.

use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use vaderappen::LatLon;
///
/// let stockholm = LatLon(59.3293, 18.0686);
/// assert_eq!(stockholm.0, 59.3293); // Latitude
/// assert_eq!(stockholm.1, 18.0686); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Rounds both components to `decimals` decimal places.
    ///
    /// MET Norway rejects requests with more than four decimals, and rounding
    /// also lets nearby positions share the same upstream response.
    ///
    /// ```
    /// use vaderappen::LatLon;
    ///
    /// let precise = LatLon(59.329_312_7, 18.068_581_1);
    /// assert_eq!(precise.rounded(4), LatLon(59.3293, 18.0686));
    /// ```
    pub fn rounded(&self, decimals: u32) -> LatLon {
        let factor = 10f64.powi(decimals as i32);
        LatLon(
            (self.0 * factor).round() / factor,
            (self.1 * factor).round() / factor,
        )
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.0, self.1)
    }
}
