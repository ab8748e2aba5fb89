//! The device-position seam used by location resolution.

use crate::types::lat_lon::LatLon;
use std::future::Future;

/// Something that may know where the device is right now.
///
/// Returning `None` is normal (no fix, no permission, no hardware) and makes
/// resolution fall back to the saved location.
pub trait PositionProvider {
    fn current_position(&self) -> impl Future<Output = Option<LatLon>> + Send;
}

/// Always reports the same position. Used by the CLI's `--lat/--lon` flags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub LatLon);

impl PositionProvider for FixedPosition {
    fn current_position(&self) -> impl Future<Output = Option<LatLon>> + Send {
        let position = self.0;
        async move { Some(position) }
    }
}

/// A device without positioning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPosition;

impl PositionProvider for NoPosition {
    fn current_position(&self) -> impl Future<Output = Option<LatLon>> + Send {
        async { None }
    }
}

impl<P: PositionProvider + Sync> PositionProvider for Option<P> {
    fn current_position(&self) -> impl Future<Output = Option<LatLon>> + Send {
        async move {
            match self {
                Some(provider) => provider.current_position().await,
                None => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_providers() {
        let here = LatLon(60.1282, 18.6435);
        assert_eq!(FixedPosition(here).current_position().await, Some(here));
        assert_eq!(NoPosition.current_position().await, None);
        assert_eq!(Some(FixedPosition(here)).current_position().await, Some(here));
        assert_eq!(None::<FixedPosition>.current_position().await, None);
    }
}
