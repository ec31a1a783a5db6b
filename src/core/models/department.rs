//! Department model

use super::{Course, CourseCode};
use std::collections::{BTreeMap, BTreeSet};

/// The catalog of one department, plus the set of courses offered this term
#[derive(Debug, Clone)]
pub struct Department {
    /// Department token (e.g., "ECE")
    pub name: String,

    /// Term the offerings belong to (e.g., "WI20"), if known
    pub term: Option<String>,

    /// Courses indexed by code, kept in catalog order
    courses: BTreeMap<CourseCode, Course>,

    /// Courses offered this term; `None` means every course counts as offered
    offered: Option<BTreeSet<CourseCode>>,
}

impl Department {
    /// Create an empty department
    ///
    /// # Arguments
    /// * `name` - Department token
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            term: None,
            courses: BTreeMap::new(),
            offered: None,
        }
    }

    /// Add a course to the department
    ///
    /// # Returns
    /// `true` if the course was added, `false` if a course with that code already exists
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.courses.contains_key(&course.code) {
            return false;
        }
        self.courses.insert(course.code.clone(), course);
        true
    }

    /// Get a course by code
    #[must_use]
    pub fn get_course(&self, code: &CourseCode) -> Option<&Course> {
        self.courses.get(code)
    }

    /// All courses in catalog order
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Number of catalog entries
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Replace the offered set
    pub fn set_offered(&mut self, offered: BTreeSet<CourseCode>) {
        self.offered = Some(offered);
    }

    /// The offered set, if one was supplied
    #[must_use]
    pub const fn offered(&self) -> Option<&BTreeSet<CourseCode>> {
        self.offered.as_ref()
    }
}
