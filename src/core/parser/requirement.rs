//! Requirement parser: raw prerequisite text to an AND-of-OR expression

use super::cleanup::clean_prerequisite_text;
use crate::core::error::PrereqError;
use crate::core::models::{CourseCode, OrGroup, RequirementExpr};
use crate::debug;
use regex::Regex;
use std::sync::LazyLock;

static AND_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\band\b").expect("and pattern is valid"));

static OR_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bor\b").expect("or pattern is valid"));

/// A fragment that could not be turned into a course code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFragment {
    /// Course whose requirement text contained the fragment
    pub course: CourseCode,
    /// The fragment after cleanup
    pub fragment: String,
    /// Whether dropping it emptied its whole OR-group
    pub emptied_group: bool,
}

/// Outcome of parsing one course's requirement text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRequirement {
    /// The expression, or `None` when the course had no requirement text
    pub expr: Option<RequirementExpr>,
    /// Fragments dropped on the way
    pub dropped: Vec<DroppedFragment>,
}

impl ParsedRequirement {
    /// Whether every fragment of the text became a code
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Parse the prerequisite text of one course
///
/// The text is split on `and` into OR-groups and each group on `or` into
/// candidate codes, in any case. Codes from every department are kept;
/// filtering by department is a graph-building decision.
///
/// A fragment naming several codes (`"ECE 15, ECE 25"`) extends the list it
/// sits in: inside an `or` list its codes are further alternatives,
/// otherwise each is required on its own.
///
/// A fragment without a code is dropped from its group and reported; a group
/// left empty by that is dropped too. Parsing never fails as a whole.
///
/// # Arguments
/// * `owner` - The course the text belongs to, used for diagnostics
/// * `text` - Raw requirement text, possibly with markup; `None` if absent
#[must_use]
pub fn parse_requirement(owner: &CourseCode, text: Option<&str>) -> ParsedRequirement {
    let Some(raw) = text else {
        return ParsedRequirement::default();
    };

    let cleaned = clean_prerequisite_text(raw);
    if cleaned.is_empty() {
        return ParsedRequirement::default();
    }

    let mut groups = Vec::new();
    let mut dropped = Vec::new();

    for conjunct in AND_SPLIT.split(&cleaned) {
        let fragments: Vec<&str> = OR_SPLIT
            .split(conjunct)
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        let is_choice = fragments.len() > 1;

        let mut group = OrGroup::new();
        let mut listed = Vec::new();
        let mut rejected = Vec::new();

        for fragment in fragments {
            let codes = CourseCode::scan(fragment);
            if codes.is_empty() {
                debug!("{owner}: {}", PrereqError::MalformedCode(fragment.to_string()));
                rejected.push(fragment.to_string());
            } else if is_choice {
                for code in codes {
                    group.push(code);
                }
            } else {
                listed.extend(
                    codes
                        .into_iter()
                        .map(|code| std::iter::once(code).collect::<OrGroup>()),
                );
            }
        }

        let emptied_group = group.is_empty() && listed.is_empty();
        dropped.extend(rejected.into_iter().map(|fragment| DroppedFragment {
            course: owner.clone(),
            fragment,
            emptied_group,
        }));

        if !group.is_empty() {
            groups.push(group);
        }
        groups.extend(listed);
    }

    ParsedRequirement {
        expr: Some(RequirementExpr::new(groups)),
        dropped,
    }
}
