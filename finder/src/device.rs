use std::sync::LazyLock;

use regex::Regex;

static MOBILE_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile user-agent pattern is valid")
});

/// Coarse device class, used to pick how the map is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    /// Phones and tablets. The map replaces the current page so the OS can
    /// hand the link to a native maps app.
    Mobile,
    /// Everything else. The map opens in a new tab.
    Desktop,
}

impl DeviceClass {
    /// Classify a browser from its user-agent string.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        if MOBILE_AGENT.is_match(user_agent) {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Returns `true` for [`DeviceClass::Mobile`].
    #[must_use]
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phones_and_tablets_are_mobile() {
        let agents = [
            "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/126.0 Mobile Safari/537.36",
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148",
            "Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X) AppleWebKit/605.1.15",
            "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80 (S60; SymbOS; Opera Mobi/23.348; U; en) Presto/2.5.25",
            "BlackBerry9700/5.0.0.862 Profile/MIDP-2.1",
        ];
        for agent in agents {
            assert_eq!(DeviceClass::from_user_agent(agent), DeviceClass::Mobile, "{agent}");
        }
    }

    #[test]
    fn match_is_case_insensitive() {
        assert!(DeviceClass::from_user_agent("custom-shell ANDROID build").is_mobile());
        assert!(DeviceClass::from_user_agent("embedded iphone webview").is_mobile());
    }

    #[test]
    fn desktop_browsers_are_desktop() {
        let agents = [
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/126.0 Safari/537.36",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 Version/17.5 Safari/605.1.15",
            "Mozilla/5.0 (X11; Linux x86_64; rv:127.0) Gecko/20100101 Firefox/127.0",
            "",
        ];
        for agent in agents {
            assert_eq!(DeviceClass::from_user_agent(agent), DeviceClass::Desktop, "{agent}");
        }
    }
}
