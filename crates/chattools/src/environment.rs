//! User environment reporting
//!
//! Locale and time zone are explicit call-time values with documented
//! fallbacks to the process environment, rather than process-wide state.

use crate::types::EnvironmentInfo;
use chrono::{DateTime, Local, TimeZone};
use std::fmt;

/// Configuration for [`user_environment`]
#[derive(Debug, Clone, Default)]
pub struct EnvironmentOptions {
    /// Preferred language tag; falls back to `LC_ALL`/`LC_TIME`/`LANG`,
    /// then to [`FALLBACK_LOCALE`]
    pub locale: Option<String>,

    /// Time zone name; falls back to `TZ`, then to the local UTC offset
    pub time_zone: Option<String>,
}

/// Locale reported when neither the options nor the environment name one
pub const FALLBACK_LOCALE: &str = "en-US";

/// Report the user's locale, local date and time, and time zone.
pub fn user_environment(options: &EnvironmentOptions) -> EnvironmentInfo {
    environment_at(Local::now(), options)
}

fn environment_at<Tz: TimeZone>(now: DateTime<Tz>, options: &EnvironmentOptions) -> EnvironmentInfo
where
    Tz::Offset: fmt::Display,
{
    let locale = options
        .locale
        .clone()
        .or_else(system_locale)
        .unwrap_or_else(|| FALLBACK_LOCALE.to_string());

    let time_zone = options
        .time_zone
        .clone()
        .or_else(|| std::env::var("TZ").ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| now.format("%:z").to_string());

    EnvironmentInfo {
        locale,
        local_date: now.format("%A, %B %-d, %Y").to_string(),
        local_time: now.format("%H:%M:%S").to_string(),
        time_zone,
    }
}

/// First usable locale from the POSIX environment, as a language tag.
fn system_locale() -> Option<String> {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_posix_locale(&value))
}

/// Normalize a POSIX locale string to a language tag
/// ("en_US.UTF-8" -> "en-US"). The C and POSIX locales carry no language
/// information and are treated as unset.
fn normalize_posix_locale(value: &str) -> Option<String> {
    let tag = value.split('.').next().unwrap_or("").replace('_', "-");
    if tag.is_empty() || tag == "C" || tag == "POSIX" {
        return None;
    }
    Some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn fixed_now() -> DateTime<FixedOffset> {
        // 2024-03-01 09:05:07 +02:00, a Friday
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 9, 5, 7)
            .unwrap()
    }

    #[test]
    fn test_explicit_options_win() {
        let options = EnvironmentOptions {
            locale: Some("de-DE".to_string()),
            time_zone: Some("Europe/Berlin".to_string()),
        };
        let info = environment_at(fixed_now(), &options);
        assert_eq!(info.locale, "de-DE");
        assert_eq!(info.time_zone, "Europe/Berlin");
    }

    #[test]
    fn test_date_and_time_rendering() {
        let info = environment_at(fixed_now(), &EnvironmentOptions::default());
        assert_eq!(info.local_date, "Friday, March 1, 2024");
        assert_eq!(info.local_time, "09:05:07");
    }

    #[test]
    fn test_time_zone_offset_fallback() {
        // With no explicit zone and no TZ, the rendered UTC offset is used
        let options = EnvironmentOptions::default();
        let info = environment_at(fixed_now(), &options);
        if std::env::var("TZ").map(|v| v.is_empty()).unwrap_or(true) {
            assert_eq!(info.time_zone, "+02:00");
        }
    }

    #[test]
    fn test_normalize_posix_locale() {
        assert_eq!(
            normalize_posix_locale("en_US.UTF-8"),
            Some("en-US".to_string())
        );
        assert_eq!(normalize_posix_locale("fr-FR"), Some("fr-FR".to_string()));
        assert_eq!(normalize_posix_locale("C"), None);
        assert_eq!(normalize_posix_locale("C.UTF-8"), None);
        assert_eq!(normalize_posix_locale("POSIX"), None);
        assert_eq!(normalize_posix_locale(""), None);
    }
}
