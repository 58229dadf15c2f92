//! Environment-driven property-test tuning.
//!
//! `PROGTEST_CASES` overrides the number of cases per property and
//! `SPANWISE_PBT_FORK` toggles running each case in a forked process.
//! Malformed overrides are logged and ignored.

use std::env;

/// Case-count override.
pub const CASES_ENV: &str = "PROGTEST_CASES";
/// Fork toggle.
pub const FORK_ENV: &str = "SPANWISE_PBT_FORK";

/// Resolved property-test settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PropertyProfile {
    cases: u32,
    fork: bool,
}

impl PropertyProfile {
    /// Reads the profile, falling back to `default_cases` and no forking.
    ///
    /// # Examples
    /// ```
    /// use spanwise_test_support::profile::PropertyProfile;
    ///
    /// let profile = PropertyProfile::from_env(32);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn from_env(default_cases: u32) -> Self {
        Self {
            cases: read(CASES_ENV, default_cases, parse_cases),
            fork: read(FORK_ENV, false, parse_switch),
        }
    }

    /// Number of cases per property.
    #[must_use]
    #[rustfmt::skip]
    pub fn cases(&self) -> u32 { self.cases }

    /// Whether each case runs in a forked process.
    #[must_use]
    #[rustfmt::skip]
    pub fn fork(&self) -> bool { self.fork }
}

fn read<T>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(raw.trim()).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring malformed property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|cases| *cases > 0)
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
