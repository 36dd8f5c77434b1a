use log::LevelFilter;
use serde::Deserialize;

use crate::FinderError;

/// Default id of the element whose content tracks the flow.
pub const DEFAULT_STATUS_ID: &str = "map-simulation-box";
/// Default id of the "find me" button.
pub const DEFAULT_TRIGGER_ID: &str = "simulate-location-btn";
/// Default Google Maps root.
pub const DEFAULT_MAPS_BASE: &str = "https://www.google.com/maps";
/// Default search term.
pub const DEFAULT_SEARCH_TERM: &str = "Ecoponto";
/// Embedded map of the ABC region (Santo André, SP), shown when no fix is available.
pub const DEFAULT_FALLBACK_URL: &str = "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d117075.76019550742!2d-46.6027376!3d-23.6841103!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x94ce43d1f053503f%3A0x676790e729a738a0!2sSanto%20Andr%C3%A9%2C%20SP!5e0!3m2!1spt-BR!2sbr!4v1700000000000!5m2!1spt-BR!2sbr";

/// Page-level settings for the finder.
///
/// Every field has a default, so a page only needs to override what differs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinderConfig {
    /// Id of the status container.
    pub status_id: String,
    /// Id of the trigger button.
    pub trigger_id: String,
    /// Maps root URL, without a trailing slash.
    pub maps_base: String,
    /// What to search for around the user.
    pub search_term: String,
    /// Map opened when the position query fails.
    pub fallback_url: String,
    /// Browsing context name used for new tabs.
    pub new_tab_target: String,
    /// Console log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            status_id: DEFAULT_STATUS_ID.into(),
            trigger_id: DEFAULT_TRIGGER_ID.into(),
            maps_base: DEFAULT_MAPS_BASE.into(),
            search_term: DEFAULT_SEARCH_TERM.into(),
            fallback_url: DEFAULT_FALLBACK_URL.into(),
            new_tab_target: "_blank".into(),
            log_level: "info".into(),
        }
    }
}

impl FinderConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns [`FinderError::Config`] if the JSON is malformed, has unknown
    /// fields, or names an unknown log level.
    pub fn from_json(json: &str) -> Result<Self, FinderError> {
        let config: Self = serde_json::from_str(json)?;
        config.log_level_filter()?;
        Ok(config)
    }

    /// The configured log level.
    ///
    /// # Errors
    /// Returns [`FinderError::InvalidLogLevel`] for an unrecognised level.
    pub fn log_level_filter(&self) -> Result<LevelFilter, FinderError> {
        self.log_level
            .parse()
            .map_err(|_| FinderError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(FinderConfig::from_json("{}").unwrap(), FinderConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            FinderConfig::from_json(r#"{"search_term": "Ponto de Entrega", "log_level": "debug"}"#)
                .unwrap();
        assert_eq!(config.search_term, "Ponto de Entrega");
        assert_eq!(config.status_id, DEFAULT_STATUS_ID);
        assert_eq!(config.log_level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            FinderConfig::from_json("{\"status_id\": "),
            Err(FinderError::Config(_))
        ));
        assert!(matches!(
            FinderConfig::from_json(r#"{"statusId": "x"}"#),
            Err(FinderError::Config(_))
        ));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(matches!(
            FinderConfig::from_json(r#"{"log_level": "loud"}"#),
            Err(FinderError::InvalidLogLevel(level)) if level == "loud"
        ));
    }
}
