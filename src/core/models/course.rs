//! Course model

use super::CourseCode;
use serde::Serialize;

/// One catalog entry as handed over by the catalog fetcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    /// Canonical code parsed from the listing key
    pub code: CourseCode,

    /// Course title (e.g., "Introduction to Computer Engineering")
    pub title: String,

    /// Unit count as printed in the listing (e.g., "4", "2-4")
    pub units: Option<String>,

    /// Catalog description text
    pub description: String,

    /// Raw prerequisite text; `None` when the source had no prerequisite box
    pub raw_prerequisites: Option<String>,
}

impl Course {
    /// Create a course with no title, units, description or prerequisites
    ///
    /// # Arguments
    /// * `code` - Canonical course code
    #[must_use]
    pub const fn new(code: CourseCode) -> Self {
        Self {
            code,
            title: String::new(),
            units: None,
            description: String::new(),
            raw_prerequisites: None,
        }
    }

    /// Set the raw prerequisite text
    #[must_use]
    pub fn with_prerequisites(mut self, text: impl Into<String>) -> Self {
        self.raw_prerequisites = Some(text.into());
        self
    }

    /// Set the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
