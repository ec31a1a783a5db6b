//! AND-of-OR requirement expressions

use super::CourseCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A set of interchangeable alternatives; satisfying any one satisfies the group
///
/// Codes keep their source order and are never duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrGroup {
    codes: Vec<CourseCode>,
}

impl OrGroup {
    /// Create an empty group
    #[must_use]
    pub const fn new() -> Self {
        Self { codes: Vec::new() }
    }

    /// Add an alternative; duplicates are ignored
    pub fn push(&mut self, code: CourseCode) {
        if !self.codes.contains(&code) {
            self.codes.push(code);
        }
    }

    /// The alternatives in source order
    #[must_use]
    pub fn codes(&self) -> &[CourseCode] {
        &self.codes
    }

    /// Number of alternatives
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the group has no alternatives
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Whether `code` is one of the alternatives
    #[must_use]
    pub fn contains(&self, code: &CourseCode) -> bool {
        self.codes.contains(code)
    }

    /// Keep only the alternatives matching `keep`
    #[must_use]
    pub fn filtered<F>(&self, keep: F) -> Self
    where
        F: Fn(&CourseCode) -> bool,
    {
        Self {
            codes: self.codes.iter().filter(|c| keep(c)).cloned().collect(),
        }
    }
}

impl FromIterator<CourseCode> for OrGroup {
    fn from_iter<I: IntoIterator<Item = CourseCode>>(iter: I) -> Self {
        let mut group = Self::new();
        for code in iter {
            group.push(code);
        }
        group
    }
}

impl fmt::Display for OrGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.codes.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" or "))
    }
}

/// A course's prerequisite logic: every group must be satisfied
///
/// An expression with no groups means "text was present but nothing in it
/// survived parsing"; a course with no text at all has no expression.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementExpr {
    groups: Vec<OrGroup>,
}

impl RequirementExpr {
    /// Create an expression from its groups, dropping empty ones
    #[must_use]
    pub fn new(groups: Vec<OrGroup>) -> Self {
        Self {
            groups: groups.into_iter().filter(|g| !g.is_empty()).collect(),
        }
    }

    /// The OR-groups, implicitly AND-ed
    #[must_use]
    pub fn groups(&self) -> &[OrGroup] {
        &self.groups
    }

    /// Whether no group survived
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Whether some single group lists both `a` and `b` as alternatives
    #[must_use]
    pub fn are_alternatives(&self, a: &CourseCode, b: &CourseCode) -> bool {
        self.groups.iter().any(|g| g.contains(a) && g.contains(b))
    }

    /// Every code mentioned by any group, in source order
    pub fn codes(&self) -> impl Iterator<Item = &CourseCode> {
        self.groups.iter().flat_map(|g| g.codes().iter())
    }
}

impl fmt::Display for RequirementExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.groups.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(" and "))
    }
}
