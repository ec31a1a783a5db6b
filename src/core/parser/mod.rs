//! Parsers for scraped catalog text

pub mod cleanup;
pub mod listing;
pub mod requirement;

pub use cleanup::clean_prerequisite_text;
pub use listing::{parse_listing, Listing};
pub use requirement::{parse_requirement, DroppedFragment, ParsedRequirement};
