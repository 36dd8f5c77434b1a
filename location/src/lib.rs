//! One-shot current-position queries.
//!
//! This crate provides a single asynchronous "where am I right now" query
//! backed by the browser Geolocation API when compiled for `wasm32`, and an
//! always-unsupported stub everywhere else.

#![warn(missing_docs)]

use futures::future::LocalBoxFuture;

/// Platform-specific implementations.
pub mod sys;

/// A geographic location with coordinates and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
    /// Altitude in meters above sea level, if available.
    pub altitude: Option<f64>,
    /// Horizontal accuracy in meters, if available.
    pub horizontal_accuracy: Option<f64>,
    /// Vertical accuracy in meters, if available.
    pub vertical_accuracy: Option<f64>,
    /// Timestamp as Unix epoch milliseconds.
    pub timestamp: u64,
}

impl Location {
    /// Create a location from bare coordinates, with no metadata.
    #[must_use]
    pub const fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            horizontal_accuracy: None,
            vertical_accuracy: None,
            timestamp: 0,
        }
    }
}

/// Errors that can occur when querying the current position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// Location permission was not granted.
    #[error("location permission denied")]
    PermissionDenied,
    /// The device could not determine its position.
    #[error("position unavailable")]
    PositionUnavailable,
    /// Location request timed out.
    #[error("location request timed out")]
    Timeout,
    /// This platform exposes no geolocation capability at all.
    #[error("geolocation not supported")]
    NotSupported,
    /// An unknown error occurred.
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl LocationError {
    /// Map a W3C `GeolocationPositionError.code` to an error.
    ///
    /// Codes outside the three the standard defines keep the browser message.
    #[must_use]
    pub fn from_code(code: u16, message: impl Into<String>) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            _ => Self::Unknown(message.into()),
        }
    }
}

/// Convenience alias for location results.
pub type LocationResult<T> = Result<T, LocationError>;

/// A source of one-shot position fixes.
///
/// Futures are not `Send`: the browser backend lives on the main thread.
pub trait Geolocator {
    /// Whether the platform exposes a geolocation capability at all.
    fn is_supported(&self) -> bool;

    /// Ask for the current position.
    ///
    /// Resolves exactly once, with either a fix or the reason there is none.
    fn current_position(&self) -> LocalBoxFuture<'static, LocationResult<Location>>;
}

/// Manager for accessing device location.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationManager;

impl LocationManager {
    /// Get the current device location.
    ///
    /// On the web, the permission prompt is part of the query itself.
    ///
    /// # Errors
    /// Returns a `LocationError` if no fix could be obtained.
    pub async fn get_location() -> LocationResult<Location> {
        if !sys::is_supported() {
            return Err(LocationError::NotSupported);
        }
        sys::get_location().await
    }
}

impl Geolocator for LocationManager {
    fn is_supported(&self) -> bool {
        sys::is_supported()
    }

    fn current_position(&self) -> LocalBoxFuture<'static, LocationResult<Location>> {
        Box::pin(Self::get_location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_error_codes_map_to_variants() {
        assert_eq!(
            LocationError::from_code(1, "User denied Geolocation"),
            LocationError::PermissionDenied
        );
        assert_eq!(
            LocationError::from_code(2, ""),
            LocationError::PositionUnavailable
        );
        assert_eq!(LocationError::from_code(3, ""), LocationError::Timeout);
        assert_eq!(
            LocationError::from_code(9, "weird"),
            LocationError::Unknown("weird".into())
        );
    }

    #[test]
    fn from_coordinates_has_no_metadata() {
        let location = Location::from_coordinates(-23.68411, -46.602_738);
        assert_eq!(location.altitude, None);
        assert_eq!(location.horizontal_accuracy, None);
        assert_eq!(location.timestamp, 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn host_build_reports_unsupported() {
        let manager = LocationManager;
        assert!(!manager.is_supported());
        let result = futures::executor::block_on(manager.current_position());
        assert_eq!(result, Err(LocationError::NotSupported));
    }
}
