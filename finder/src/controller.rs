//! The click → locate → navigate flow.
//!
//! ```text
//! Idle → Searching → Success(Mobile)    (terminal, page navigates away)
//!                  → Success(Desktop) → Idle
//!                  → Error            → Idle
//!                  → Unsupported      (terminal)
//! ```

use std::cell::Cell;
use std::fmt;

use ecoponto_location::{Geolocator, Location, LocationError};
use log::{debug, info, warn};

use crate::{DeviceClass, FinderConfig, MapLinks, Page, SetupError, StatusView};

/// Where the controller is in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a click.
    Idle,
    /// A position query is in flight.
    Searching,
    /// A fix was obtained and the map was opened for this device class.
    Success(DeviceClass),
    /// The position query failed.
    Error,
    /// The browser has no geolocation.
    Unsupported,
}

impl Phase {
    /// Phases after which no click is served for the rest of the page load.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success(DeviceClass::Mobile) | Self::Unsupported)
    }
}

/// Owns the page surface and the location source for one page load.
pub struct LocationController<P, G> {
    page: P,
    geolocator: G,
    config: FinderConfig,
    links: MapLinks,
    phase: Cell<Phase>,
    in_flight: Cell<bool>,
}

impl<P, G> fmt::Debug for LocationController<P, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationController")
            .field("config", &self.config)
            .field("phase", &self.phase.get())
            .field("in_flight", &self.in_flight.get())
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag when a click's future completes or is dropped.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<P: Page, G: Geolocator> LocationController<P, G> {
    /// Wire a controller to `page`.
    ///
    /// # Errors
    /// Returns [`SetupError::MissingElement`] if the status container or the
    /// trigger button is absent; no controller exists in that case.
    pub fn mount(page: P, geolocator: G, config: FinderConfig) -> Result<Self, SetupError> {
        for id in [&config.status_id, &config.trigger_id] {
            if !page.has_element(id) {
                return Err(SetupError::MissingElement { id: id.clone() });
            }
        }

        let links = MapLinks::from_config(&config);
        Ok(Self {
            page,
            geolocator,
            config,
            links,
            phase: Cell::new(Phase::Idle),
            in_flight: Cell::new(false),
        })
    }

    /// Attach the click handler to the initial trigger button.
    pub fn arm(&self) -> bool {
        self.page.rebind_trigger()
    }

    /// The page surface.
    pub const fn page(&self) -> &P {
        &self.page
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    /// Whether a position query is outstanding.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Serve one click on the trigger.
    ///
    /// Returns the phase the click ended in, or `None` if the click was
    /// ignored because a query is already in flight or the flow is over.
    pub async fn on_button_click(&self) -> Option<Phase> {
        if self.phase().is_terminal() {
            debug!("ignoring click in terminal phase {:?}", self.phase());
            return None;
        }
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            debug!("ignoring click while a location request is in flight");
            return None;
        };

        self.enter(Phase::Searching, &StatusView::Searching);

        if !self.geolocator.is_supported() {
            info!("geolocation is not available in this browser");
            self.enter(Phase::Unsupported, &StatusView::Unsupported);
            return Some(Phase::Unsupported);
        }

        let outcome = match self.geolocator.current_position().await {
            Ok(location) => self.on_position(&location),
            Err(LocationError::NotSupported) => {
                info!("geolocation disappeared before the query ran");
                self.enter(Phase::Unsupported, &StatusView::Unsupported);
                Phase::Unsupported
            }
            Err(err) => self.on_failure(&err),
        };
        Some(outcome)
    }

    fn on_position(&self, location: &Location) -> Phase {
        let url = self.links.search_url(location);
        let device = DeviceClass::from_user_agent(&self.page.user_agent());
        info!("position found, opening {url} for {device:?}");

        let (opened, view) = if device.is_mobile() {
            (self.page.navigate(&url), StatusView::Redirecting { url })
        } else {
            (self.page.open_in_new_tab(&url), StatusView::Opened)
        };
        if let Err(err) = opened {
            warn!("{err}");
        }
        self.enter(Phase::Success(device), &view);
        Phase::Success(device)
    }

    fn on_failure(&self, err: &LocationError) -> Phase {
        warn!("location request failed: {err}");
        let fallback = self.links.fallback_url().to_owned();

        if let Err(err) = self.page.open_in_new_tab(&fallback) {
            warn!("{err}");
        }
        self.enter(Phase::Error, &StatusView::Denied { fallback });
        Phase::Error
    }

    /// Render `view`; views that bring a new trigger also rebind it and
    /// return the controller to `Idle`.
    fn enter(&self, phase: Phase, view: &StatusView) {
        self.phase.set(phase);
        self.page.render_status(&view.render(&self.config));
        if view.offers_trigger() {
            self.rearm();
        }
    }

    fn rearm(&self) {
        if !self.page.rebind_trigger() {
            warn!(
                "trigger `#{}` missing after re-render; retry is unavailable",
                self.config.trigger_id
            );
        }
        self.phase.set(Phase::Idle);
    }
}
