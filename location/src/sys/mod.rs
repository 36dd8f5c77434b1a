//! Platform-specific location implementations.

cfg_if::cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        mod web;
        pub(crate) use web::{get_location, is_supported};
    } else {
        // No native backend: the finder only ships to browsers.
        pub(crate) const fn is_supported() -> bool {
            false
        }

        pub(crate) async fn get_location() -> Result<crate::Location, crate::LocationError> {
            Err(crate::LocationError::NotSupported)
        }
    }
}
