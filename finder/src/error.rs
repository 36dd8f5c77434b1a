use thiserror::Error;

/// Errors raised while reading finder configuration.
#[derive(Error, Debug)]
pub enum FinderError {
    /// The JSON config block could not be parsed.
    #[error("invalid finder config: {0}")]
    Config(#[from] serde_json::Error),

    /// The config names a log level `log` does not know.
    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),
}

/// Fatal errors while wiring the controller to the page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// A required element is absent from the document.
    #[error("map instruction element `#{id}` not found")]
    MissingElement {
        /// Id that was looked up.
        id: String,
    },
}

/// Failures of a navigation side effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The browser refused to navigate.
    #[error("navigation to {url} failed: {reason}")]
    Navigation {
        /// Target URL.
        url: String,
        /// Browser-supplied reason.
        reason: String,
    },

    /// `window.open` returned no window, usually a popup blocker.
    #[error("new tab for {url} was blocked")]
    PopupBlocked {
        /// Target URL.
        url: String,
    },
}
