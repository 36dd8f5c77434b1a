use crate::PageError;

/// The browser surface the controller drives.
///
/// The `web` module implements this over the DOM; tests use recording fakes.
pub trait Page {
    /// Whether an element with `id` is currently in the document.
    fn has_element(&self, id: &str) -> bool;

    /// The browser's user-agent string, empty if unavailable.
    fn user_agent(&self) -> String;

    /// Replace the status container's content.
    fn render_status(&self, markup: &str);

    /// Navigate the current browsing context to `url`.
    ///
    /// # Errors
    /// Returns [`PageError::Navigation`] if the browser refuses.
    fn navigate(&self, url: &str) -> Result<(), PageError>;

    /// Open `url` in a new browsing context.
    ///
    /// # Errors
    /// Returns a [`PageError`] if the browser refuses or blocks the popup.
    fn open_in_new_tab(&self, url: &str) -> Result<(), PageError>;

    /// Attach the click handler to whatever element now carries the trigger
    /// id. Returns `false` if there is no such element.
    fn rebind_trigger(&self) -> bool;
}

/// How the browser is leaving the page, from `pagehide`'s `persisted` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageExit {
    /// Stored in the back/forward cache. The DOM and its listeners come back
    /// unchanged when the user returns.
    Cached,
    /// Unloaded for good.
    Discarded,
}

impl PageExit {
    /// Classify a `pagehide` event.
    #[must_use]
    pub const fn from_persisted(persisted: bool) -> Self {
        if persisted { Self::Cached } else { Self::Discarded }
    }

    /// Whether the controller should be torn down.
    #[must_use]
    pub const fn releases_controller(self) -> bool {
        matches!(self, Self::Discarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_pages_keep_their_controller() {
        assert_eq!(PageExit::from_persisted(true), PageExit::Cached);
        assert!(!PageExit::from_persisted(true).releases_controller());
    }

    #[test]
    fn discarded_pages_release_their_controller() {
        assert_eq!(PageExit::from_persisted(false), PageExit::Discarded);
        assert!(PageExit::from_persisted(false).releases_controller());
    }
}
