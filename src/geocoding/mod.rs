pub mod error;
pub mod nominatim;
