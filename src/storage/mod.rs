pub mod error;
pub mod favorites;
pub mod preferences;
