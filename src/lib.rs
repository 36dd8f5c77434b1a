//! # Ecoponto
//!
//! A "find the nearest Ecoponto" button for the web, written in Rust and
//! compiled to WebAssembly.
//!
//! One click asks the browser for the user's position and opens a Google Maps
//! search for Ecopontos (recycling drop-off points) centred on it. Phones are
//! redirected in place so the native maps app can take over; desktops get a new
//! tab. Denied or failed lookups open a fixed map of the ABC region instead.
//!
//! ## Features
//!
//! - `location`: one-shot current-position queries.
//! - `finder`: the button controller and its DOM binding (implies `location`).
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! ecoponto = { version = "0.1", features = ["finder"] }
//! ```
//!
//! ```rust
//! # #[cfg(feature = "finder")]
//! # {
//! use ecoponto::finder::{Location, MapLinks};
//!
//! let url = MapLinks::default().search_url(&Location::from_coordinates(-23.68411, -46.602738));
//! assert_eq!(url, "https://www.google.com/maps/search/Ecoponto/@-23.684110,-46.602738");
//! # }
//! ```

#[cfg(feature = "finder")]
pub use ecoponto_finder as finder;

#[cfg(feature = "location")]
pub use ecoponto_location as location;
