use std::env;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_DATE_ANCHOR: &str = "2025-05-09";
pub const DEFAULT_FLASH_DISMISS_SECONDS: u64 = 8;
pub const DEFAULT_FLASH_FADE_MILLIS: u64 = 500;

/// Which calendar window a booking date must fall into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "policy")]
pub enum DateWindowPolicy {
    /// Today through today plus one year.
    #[default]
    Rolling,
    /// A fixed anchor date through one year after it.
    Fixed { anchor: NaiveDate },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_base_url: String,
    pub date_window: DateWindowPolicy,
    pub flash_dismiss_after: Duration,
    pub flash_fade: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_base_url: DEFAULT_BASE_URL.to_string(),
            date_window: DateWindowPolicy::Rolling,
            flash_dismiss_after: Duration::from_secs(DEFAULT_FLASH_DISMISS_SECONDS),
            flash_fade: Duration::from_millis(DEFAULT_FLASH_FADE_MILLIS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Unset or
    /// malformed values fall back to their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_base_url = lookup("BOOKING_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| {
                warn!("BOOKING_BASE_URL not set, using default");
                DEFAULT_BASE_URL.to_string()
            });

        let date_window = match lookup("BOOKING_DATE_WINDOW").as_deref() {
            None | Some("rolling") => DateWindowPolicy::Rolling,
            Some("fixed") => {
                let anchor = lookup("BOOKING_DATE_ANCHOR")
                    .and_then(|raw| match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                        Ok(date) => Some(date),
                        Err(_) => {
                            warn!("BOOKING_DATE_ANCHOR '{}' is not a YYYY-MM-DD date, using default", raw);
                            None
                        }
                    })
                    .unwrap_or_else(default_anchor);
                DateWindowPolicy::Fixed { anchor }
            }
            Some(other) => {
                warn!("Unknown BOOKING_DATE_WINDOW '{}', using rolling window", other);
                DateWindowPolicy::Rolling
            }
        };

        let flash_dismiss_after = Duration::from_secs(parse_or_default(
            &lookup,
            "FLASH_DISMISS_SECONDS",
            DEFAULT_FLASH_DISMISS_SECONDS,
        ));
        let flash_fade = Duration::from_millis(parse_or_default(
            &lookup,
            "FLASH_FADE_MILLIS",
            DEFAULT_FLASH_FADE_MILLIS,
        ));

        let config = Self {
            backend_base_url,
            date_window,
            flash_dismiss_after,
            flash_fade,
        };

        if !config.is_configured() {
            warn!("Booking backend URL is not usable - requests will fail");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        self.backend_base_url.starts_with("http://") || self.backend_base_url.starts_with("https://")
    }
}

fn default_anchor() -> NaiveDate {
    NaiveDate::parse_from_str(DEFAULT_DATE_ANCHOR, "%Y-%m-%d").unwrap_or_default()
}

fn parse_or_default<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} '{}' is not a number, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.backend_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.date_window, DateWindowPolicy::Rolling);
        assert_eq!(config.flash_dismiss_after, Duration::from_secs(8));
        assert_eq!(config.flash_fade, Duration::from_millis(500));
        assert!(config.is_configured());
    }

    #[test]
    fn test_fixed_window_with_anchor() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BOOKING_DATE_WINDOW", "fixed"),
            ("BOOKING_DATE_ANCHOR", "2025-01-15"),
        ]));
        assert_eq!(
            config.date_window,
            DateWindowPolicy::Fixed { anchor: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap() }
        );
    }

    #[test]
    fn test_fixed_window_bad_anchor_falls_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BOOKING_DATE_WINDOW", "fixed"),
            ("BOOKING_DATE_ANCHOR", "09/05/2025"),
        ]));
        assert_eq!(
            config.date_window,
            DateWindowPolicy::Fixed { anchor: NaiveDate::from_ymd_opt(2025, 5, 9).unwrap() }
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = AppConfig::from_lookup(lookup_from(&[("BOOKING_BASE_URL", "http://clinic.local/")]));
        assert_eq!(config.backend_base_url, "http://clinic.local");
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("FLASH_DISMISS_SECONDS", "soon"),
            ("FLASH_FADE_MILLIS", "250"),
        ]));
        assert_eq!(config.flash_dismiss_after, Duration::from_secs(8));
        assert_eq!(config.flash_fade, Duration::from_millis(250));
    }

    #[test]
    fn test_unusable_base_url() {
        let config = AppConfig::from_lookup(lookup_from(&[("BOOKING_BASE_URL", "clinic.local")]));
        assert!(!config.is_configured());
    }
}
