use ecoponto_location::Location;

use crate::FinderConfig;

/// Format one coordinate with exactly six fraction digits.
///
/// Matches JavaScript's `toFixed(6)`: exact ties round away from zero and
/// negative zero prints without a sign.
#[must_use]
pub fn format_coordinate(degrees: f64) -> String {
    if degrees == 0.0 {
        return "0.000000".to_owned();
    }
    if !is_seventh_digit_tie(degrees) {
        return format!("{degrees:.6}");
    }

    // A tie has exactly seven fraction digits, so `{:.7}` is exact and ends in 5.
    let mut digits: Vec<char> = format!("{:.7}", degrees.abs()).chars().collect();
    digits.pop();
    let mut carry = true;
    for digit in digits.iter_mut().rev() {
        match *digit {
            '.' => {}
            '9' => *digit = '0',
            d => {
                *digit = char::from_digit(d.to_digit(10).unwrap_or(0) + 1, 10).unwrap_or('0');
                carry = false;
                break;
            }
        }
    }
    if carry {
        digits.insert(0, '1');
    }

    let sign = if degrees < 0.0 { "-" } else { "" };
    format!("{sign}{}", digits.into_iter().collect::<String>())
}

// `x * 1e6` lands exactly on a half iff `x * 128` is an odd integer.
fn is_seventh_digit_tie(degrees: f64) -> bool {
    let scaled = degrees * 128.0;
    scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 != 0.0
}

/// Builds the map links the finder navigates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLinks {
    base: String,
    search_segment: String,
    fallback: String,
}

impl MapLinks {
    /// Derive links from a config.
    #[must_use]
    pub fn from_config(config: &FinderConfig) -> Self {
        Self {
            base: config.maps_base.trim_end_matches('/').to_owned(),
            search_segment: search_segment(&config.search_term),
            fallback: config.fallback_url.clone(),
        }
    }

    /// Search URL centred on `location`, e.g.
    /// `https://www.google.com/maps/search/Ecoponto/@-23.684110,-46.602738`.
    #[must_use]
    pub fn search_url(&self, location: &Location) -> String {
        format!(
            "{}/search/{}/@{},{}",
            self.base,
            self.search_segment,
            format_coordinate(location.latitude),
            format_coordinate(location.longitude)
        )
    }

    /// Fixed map shown when there is no position to centre on.
    #[must_use]
    pub fn fallback_url(&self) -> &str {
        &self.fallback
    }
}

impl Default for MapLinks {
    fn default() -> Self {
        Self::from_config(&FinderConfig::default())
    }
}

// Maps joins search words with `+`.
fn search_segment(term: &str) -> String {
    term.split_whitespace().collect::<Vec<_>>().join("+")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FALLBACK_URL;
    use proptest::prelude::*;
    use regex::Regex;
    use std::sync::LazyLock;

    static SEARCH_URL: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^https://www\.google\.com/maps/search/Ecoponto/@-?\d+\.\d{6},-?\d+\.\d{6}$")
            .unwrap()
    });

    #[test]
    fn coordinates_always_have_six_digits() {
        assert_eq!(format_coordinate(-23.684_11), "-23.684110");
        assert_eq!(format_coordinate(0.0), "0.000000");
        assert_eq!(format_coordinate(10.0), "10.000000");
        assert_eq!(format_coordinate(-46.602_737_6), "-46.602738");
        assert_eq!(format_coordinate(179.999_999_9), "180.000000");
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(format_coordinate(-23.507_812_5), "-23.507813");
        assert_eq!(format_coordinate(0.007_812_5), "0.007813");
        assert_eq!(format_coordinate(0.992_187_5), "0.992188");
        assert_eq!(format_coordinate(-0.007_812_5), "-0.007813");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(format_coordinate(-0.0), "0.000000");
    }

    proptest! {
        #[test]
        fn search_url_has_six_digit_coordinates(
            latitude in -90.0f64..=90.0,
            longitude in -180.0f64..=180.0,
        ) {
            let url = MapLinks::default().search_url(&Location::from_coordinates(latitude, longitude));
            prop_assert!(SEARCH_URL.is_match(&url), "{}", url);
        }

        #[test]
        fn formatted_coordinate_stays_within_half_a_micro_degree(degrees in -180.0f64..=180.0) {
            let formatted = format_coordinate(degrees);
            let parsed: f64 = formatted.parse().unwrap();
            prop_assert!((parsed - degrees).abs() <= 5.000_001e-7, "{} -> {}", degrees, formatted);
        }
    }

    #[test]
    fn search_url_embeds_both_coordinates() {
        let links = MapLinks::default();
        let url = links.search_url(&Location::from_coordinates(-23.684_11, -46.602_738));
        assert_eq!(
            url,
            "https://www.google.com/maps/search/Ecoponto/@-23.684110,-46.602738"
        );
    }

    #[test]
    fn configured_base_and_term_are_normalised() {
        let config = FinderConfig {
            maps_base: "https://maps.example.test/".into(),
            search_term: "  Ponto de   Entrega ".into(),
            ..FinderConfig::default()
        };
        let links = MapLinks::from_config(&config);
        assert_eq!(
            links.search_url(&Location::from_coordinates(1.5, 2.25)),
            "https://maps.example.test/search/Ponto+de+Entrega/@1.500000,2.250000"
        );
    }

    #[test]
    fn fallback_is_the_abc_embed() {
        assert_eq!(MapLinks::default().fallback_url(), DEFAULT_FALLBACK_URL);
        assert!(DEFAULT_FALLBACK_URL.contains("Santo%20Andr%C3%A9"));
    }
}
