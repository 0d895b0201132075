//! Date normalization for noisy clinical date tokens.
//!
//! Reports mix `mm/dd/yyyy`, `mm/dd`, `mm/yy`, dashed forms and prose dates.
//! Every failure degrades to `None`: callers aggregate over many candidates
//! and vote bad parses away.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use medex_core::DateConfig;

#[expect(clippy::expect_used, reason = "literal pattern is always valid")]
static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("ordinal pattern is valid"));

/// Prose layouts tried in order after whitespace and comma cleanup.
const PROSE_FORMATS: &[&str] = &[
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%Y/%m/%d",
    "%Y.%m.%d",
];

/// Reason a token did not resolve to a calendar date.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("non-numeric date component {0:?}")]
    Component(String),

    #[error("no such date: {year:04}-{month:02}-{day:02}")]
    OutOfRange { year: i32, month: u32, day: u32 },

    #[error("unrecognized date format {0:?}")]
    Unrecognized(String),
}

#[derive(Debug, Clone, Copy)]
pub struct DateNormalizer {
    config: DateConfig,
    current_year: i32,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new(DateConfig::default())
    }
}

impl DateNormalizer {
    /// Normalizer whose "current year" is the local calendar year.
    #[must_use]
    pub fn new(config: DateConfig) -> Self {
        Self {
            config,
            current_year: Local::now().year(),
        }
    }

    /// Pin the year used for `mm/dd` tokens.
    #[must_use]
    pub const fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    /// Resolve a token to a calendar date, or `None` if it cannot be read.
    #[must_use]
    pub fn normalize(&self, token: &str) -> Option<NaiveDate> {
        match self.try_normalize(token) {
            Ok(date) => Some(date),
            Err(e) => {
                debug!("Dropping date candidate {token:?}: {e}");
                None
            }
        }
    }

    /// Resolve a token, reporting why it failed.
    ///
    /// # Errors
    /// Returns a [`DateError`] for non-numeric components, impossible dates and
    /// unrecognized layouts.
    pub fn try_normalize(&self, token: &str) -> Result<NaiveDate, DateError> {
        let token = token.trim();
        let parts: Vec<&str> = token.split('/').collect();

        match parts.as_slice() {
            [month, day, year] => {
                let month = component(month)?;
                let day = component(day)?;
                let year = self.expand_year(year)?;
                ymd(year, month, day)
            }
            [first, second] => {
                let first = component(first)?;
                let second_value = component(second)?;
                if second_value <= 12 {
                    ymd(self.current_year, first, second_value)
                } else {
                    let year = self.expand_year(second)?;
                    ymd(year, first, self.config.unknown_day)
                }
            }
            _ => self.parse_general(token),
        }
    }

    /// Expand a year token; one or two digits go through the century pivot.
    ///
    /// # Errors
    /// Returns [`DateError::Component`] if the token is not a number.
    pub fn expand_year(&self, token: &str) -> Result<i32, DateError> {
        let token = token.trim();
        let value = component(token)?;
        let year = if token.len() <= 2 {
            if value < self.config.century_pivot {
                2000 + value
            } else {
                1900 + value
            }
        } else {
            value
        };
        i32::try_from(year).map_err(|_| DateError::Component(token.to_string()))
    }

    /// Dashed numerics and prose dates.
    fn parse_general(&self, token: &str) -> Result<NaiveDate, DateError> {
        let dashed: Vec<&str> = token.split('-').collect();
        if let [a, b, c] = dashed.as_slice() {
            if [a, b, c].iter().all(|p| is_numeric(p)) {
                return if a.len() == 4 {
                    ymd(self.expand_year(a)?, component(b)?, component(c)?)
                } else {
                    ymd(self.expand_year(c)?, component(a)?, component(b)?)
                };
            }
        }

        let cleaned = clean_prose(token);
        for format in PROSE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
                return Ok(date);
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("1 {cleaned}"), "%d %B %Y") {
            return Ok(date);
        }
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d") {
            return Ok(date);
        }

        Err(DateError::Unrecognized(token.to_string()))
    }
}

fn is_numeric(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
}

fn component(part: &str) -> Result<u32, DateError> {
    let part = part.trim();
    if !is_numeric(part) {
        return Err(DateError::Component(part.to_string()));
    }
    part.parse()
        .map_err(|_| DateError::Component(part.to_string()))
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, DateError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(DateError::OutOfRange { year, month, day })
}

/// Collapse whitespace, drop ordinal suffixes, a trailing period and spaces
/// before commas (NER spans arrive as space-joined tokens: `june 3 , 2019`).
fn clean_prose(token: &str) -> String {
    let collapsed = token.split_whitespace().collect::<Vec<_>>().join(" ");
    let without_ordinals = ORDINAL_SUFFIX.replace_all(&collapsed, "$1");
    without_ordinals
        .trim_end_matches('.')
        .replace(" ,", ",")
}

/// Drop candidates wholly contained in a longer candidate.
///
/// Exact repeats are kept; only strictly longer containers suppress.
#[must_use]
pub fn remove_partial_duplicates(candidates: &[String]) -> Vec<String> {
    candidates
        .iter()
        .filter(|candidate| {
            !candidates
                .iter()
                .any(|other| other.len() > candidate.len() && other.contains(candidate.as_str()))
        })
        .cloned()
        .collect()
}
