//! "Find the nearest Ecoponto" button.
//!
//! One click asks the browser for the user's position and opens a Google Maps
//! search for Ecopontos centred on it: same-tab on phones, a new tab on
//! desktops. Failures fall back to a fixed regional map, and browsers without
//! geolocation get an explanatory message.
//!
//! The flow lives in [`LocationController`], which only talks to the browser
//! through the [`Page`] and [`Geolocator`] traits. On `wasm32` the `web`
//! module provides the DOM-backed [`Page`] and the `#[wasm_bindgen(start)]`
//! entry point.

#![warn(missing_docs)]

mod config;
mod controller;
mod device;
mod error;
mod page;
mod url;
mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{
    DEFAULT_FALLBACK_URL, DEFAULT_MAPS_BASE, DEFAULT_SEARCH_TERM, DEFAULT_STATUS_ID,
    DEFAULT_TRIGGER_ID, FinderConfig,
};
pub use controller::{LocationController, Phase};
pub use device::DeviceClass;
pub use ecoponto_location::{Geolocator, Location, LocationError, LocationManager};
pub use error::{FinderError, PageError, SetupError};
pub use page::{Page, PageExit};
pub use url::{MapLinks, format_coordinate};
pub use view::{StatusView, escape};
