//! Catalog listing keys such as `"ECE 123. Antennas. (4)"`

use crate::core::error::{PrereqError, Result};
use crate::core::models::CourseCode;
use regex::Regex;
use std::sync::LazyLock;

static TRAILING_UNITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)\s*$").expect("units pattern is valid"));

/// The pieces of a catalog listing key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// Course code before the first period
    pub code: CourseCode,
    /// Title between the code and the unit count
    pub title: String,
    /// Unit count inside the trailing parentheses, if present
    pub units: Option<String>,
}

/// Split a listing key into code, title and units
///
/// # Errors
/// Returns [`PrereqError::MalformedListing`] if the part before the first
/// period is not a course code.
pub fn parse_listing(key: &str) -> Result<Listing> {
    let (head, rest) = key.split_once('.').unwrap_or((key, ""));
    let code = CourseCode::parse(head).map_err(|_| PrereqError::MalformedListing(key.to_string()))?;

    let (title_part, units) = TRAILING_UNITS.captures(rest).map_or((rest, None), |caps| {
        let start = caps.get(0).map_or(rest.len(), |m| m.start());
        (&rest[..start], Some(caps[1].trim().to_string()))
    });

    let title = title_part.trim().trim_end_matches('.').trim().to_string();

    Ok(Listing { code, title, units })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_listing() {
        let listing = parse_listing("ECE 121A. Power Systems Analysis and Fundamentals. (4)")
            .expect("valid listing");
        assert_eq!(listing.code.to_string(), "ECE 121A");
        assert_eq!(listing.title, "Power Systems Analysis and Fundamentals");
        assert_eq!(listing.units.as_deref(), Some("4"));
    }

    #[test]
    fn test_unit_range() {
        let listing = parse_listing("ECE 199. Independent Study. (2-4)").expect("valid listing");
        assert_eq!(listing.units.as_deref(), Some("2-4"));
    }

    #[test]
    fn test_title_with_periods() {
        let listing = parse_listing("MAE 3. Intro. to Eng. Graphics. (4)").expect("valid listing");
        assert_eq!(listing.code.to_string(), "MAE 3");
        assert_eq!(listing.title, "Intro. to Eng. Graphics");
    }

    #[test]
    fn test_code_only() {
        let listing = parse_listing("ECE 5").expect("valid listing");
        assert_eq!(listing.code.to_string(), "ECE 5");
        assert!(listing.title.is_empty());
        assert!(listing.units.is_none());
    }

    #[test]
    fn test_malformed_listing() {
        assert!(matches!(
            parse_listing("Seminar. Topics. (1)"),
            Err(PrereqError::MalformedListing(_))
        ));
    }
}
