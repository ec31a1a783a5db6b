//! Canonical course identifiers
//!
//! Catalog pages and schedule pages disagree on spacing, case and
//! zero-padding (`"MAE 02"` vs `"MAE 2"`, `"ECE121A"` vs `"ECE 121 A"`), so every
//! identifier is normalized into a [`CourseCode`] before it is compared.

use crate::core::error::{PrereqError, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// A department run followed by a number run and an optional single-letter
/// suffix, searched for inside longer text. The department must be
/// uppercase there so that prose such as `"at least 90 units"` is not read
/// as a code, and a separated suffix must be uppercase so that
/// `"ECE 15 a grade of C"` does not become `ECE 15A`.
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{2,})\s*(\d+)(?:([A-Za-z])\b|\s([A-Z])\b)?")
        .expect("course code pattern is valid")
});

/// A fragment that is nothing but a code, in any case (`"ece 121 a"`)
static WHOLE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]{2,})\s*(\d+)(?:\s*([A-Za-z]))?$")
        .expect("whole code pattern is valid")
});

/// A canonical course identifier such as `ECE 121A`
///
/// Ordering follows catalog order: department, then the numeric value of
/// the number, then the letter suffix (`ECE 9 < ECE 15 < ECE 121 < ECE 121A`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseCode {
    dept: String,
    number: u32,
    suffix: Option<char>,
}

impl CourseCode {
    /// Normalize a raw token into a course code
    ///
    /// A token that is only a code may be in any case. Inside longer text the
    /// first code with an uppercase department is taken.
    ///
    /// # Arguments
    /// * `raw` - A token such as `"ECE121A"`, `"MAE 02"` or `"ECE 121 A"`
    ///
    /// # Errors
    /// Returns [`PrereqError::MalformedCode`] when no department run followed
    /// by a number run can be located, or the number does not fit in a `u32`.
    pub fn parse(raw: &str) -> Result<Self> {
        let malformed = || PrereqError::MalformedCode(raw.trim().to_string());

        if let Some(caps) = WHOLE_CODE.captures(raw.trim()) {
            return Self::from_captures(&caps).ok_or_else(malformed);
        }
        CODE_PATTERN
            .captures(raw)
            .and_then(|caps| Self::from_captures(&caps))
            .ok_or_else(malformed)
    }

    /// Every code mentioned in `text`, in order of appearance
    ///
    /// `"ECE 15, ECE 25"` yields both codes. Prose yields nothing.
    #[must_use]
    pub fn scan(text: &str) -> Vec<Self> {
        if let Some(caps) = WHOLE_CODE.captures(text.trim()) {
            return Self::from_captures(&caps).into_iter().collect();
        }
        CODE_PATTERN
            .captures_iter(text)
            .filter_map(|caps| Self::from_captures(&caps))
            .collect()
    }

    /// Build from department, number and suffix groups (suffix in 3 or 4)
    fn from_captures(caps: &Captures<'_>) -> Option<Self> {
        let number = caps[2].parse::<u32>().ok()?;
        let suffix = caps
            .get(3)
            .or_else(|| caps.get(4))
            .and_then(|m| m.as_str().chars().next())
            .map(|c| c.to_ascii_uppercase());

        Some(Self {
            dept: caps[1].to_ascii_uppercase(),
            number,
            suffix,
        })
    }

    /// Department token (e.g., `"ECE"`)
    #[must_use]
    pub fn dept(&self) -> &str {
        &self.dept
    }

    /// Numeric value of the number token, used for level filtering
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Canonical number token with suffix and without leading zeros (e.g., `"121A"`)
    #[must_use]
    pub fn num(&self) -> String {
        self.suffix.map_or_else(
            || self.number.to_string(),
            |suffix| format!("{}{suffix}", self.number),
        )
    }

    /// Whether this course belongs to `dept` (case-insensitive)
    #[must_use]
    pub fn in_department(&self, dept: &str) -> bool {
        self.dept.eq_ignore_ascii_case(dept)
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.dept, self.number)?;
        if let Some(suffix) = self.suffix {
            write!(f, "{suffix}")?;
        }
        Ok(())
    }
}

impl FromStr for CourseCode {
    type Err = PrereqError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for CourseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CourseCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
