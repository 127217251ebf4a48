//! Date-token pattern formatting
//!
//! The configuration speaks a PHP-style `date()` token syntax (`Y-m-d`,
//! `Y-m-d H:i:s`). `DatePattern` translates that syntax to a chrono
//! strftime string once and formats timestamps with it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A date/time pattern in configuration token syntax.
///
/// Supported tokens: `Y`/`y` (4/2-digit year), `m`/`n` (padded/unpadded
/// month), `d`/`j` (padded/unpadded day), `H`/`G` (padded/unpadded 24h
/// hour), `i` (minutes), `s` (seconds). A backslash escapes the following
/// character; anything else passes through literally.
///
/// # Examples
///
/// ```
/// use log_pipeline::core::DatePattern;
/// use chrono::{TimeZone, Utc};
///
/// let pattern = DatePattern::new("Y-m-d");
/// let date = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(pattern.format(&date), "2025-01-08");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePattern(String);

impl DatePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// The raw token pattern as configured
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Translate the token pattern to a chrono strftime string
    #[must_use]
    pub fn to_strftime(&self) -> String {
        let mut out = String::with_capacity(self.0.len() * 2);
        let mut chars = self.0.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                'Y' => out.push_str("%Y"),
                'y' => out.push_str("%y"),
                'm' => out.push_str("%m"),
                'n' => out.push_str("%-m"),
                'd' => out.push_str("%d"),
                'j' => out.push_str("%-d"),
                'H' => out.push_str("%H"),
                'G' => out.push_str("%-H"),
                'i' => out.push_str("%M"),
                's' => out.push_str("%S"),
                '%' => out.push_str("%%"),
                other => out.push(other),
            }
        }
        out
    }

    /// Format a timestamp according to this pattern
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        datetime.format(&self.to_strftime()).to_string()
    }

    /// Format the current time according to this pattern
    #[must_use]
    pub fn format_now(&self) -> String {
        self.format(&Utc::now())
    }
}

impl Default for DatePattern {
    fn default() -> Self {
        Self::new("Y-m-d H:i:s")
    }
}

impl std::fmt::Display for DatePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
