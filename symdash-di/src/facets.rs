//! Faceted checkbox filters for the image and candidate views
//!
//! [REQ-DI-F-070]: Options are derived from the distinct values present in
//! the current record set. A category with no checked option imposes no
//! constraint; otherwise matching is OR within a category and AND across
//! categories.
//!
//! The image and candidate builders deliberately differ in their initial
//! checked state: the image view starts with not-found ("missing") images
//! excluded, the candidate view starts unconstrained.

use serde::{Deserialize, Serialize};

use symdash_common::candidates::Candidate;
use symdash_common::status::ImageStatus;

/// One checkbox option within a facet category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    /// Option identifier (a status id or source id)
    pub id: String,
    /// Initial checked state; user toggles live in the browser
    pub is_checked: bool,
}

/// Distinct values in first-encounter order
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|v| v == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

/// Status facet options for the image list.
///
/// When `missing` images are present, every other status starts checked so
/// not-found images are excluded by default; otherwise nothing is checked
/// and the category imposes no constraint.
pub fn image_status_options(statuses: &[ImageStatus]) -> Vec<FacetOption> {
    let ids = distinct(statuses.iter().map(|s| s.as_str()));
    let has_missing = ids.iter().any(|id| id == ImageStatus::Missing.as_str());
    ids.into_iter()
        .map(|id| {
            let is_checked = has_missing && id != ImageStatus::Missing.as_str();
            FacetOption { id, is_checked }
        })
        .collect()
}

/// Status facet options for the candidate list: everything starts unchecked
pub fn candidate_status_options(candidates: &[Candidate]) -> Vec<FacetOption> {
    distinct(candidates.iter().map(|c| c.download.status_id()))
        .into_iter()
        .map(|id| FacetOption {
            id,
            is_checked: false,
        })
        .collect()
}

/// Source facet options for the candidate list: everything starts unchecked
pub fn candidate_source_options(candidates: &[Candidate]) -> Vec<FacetOption> {
    distinct(candidates.iter().map(|c| c.source.as_str()))
        .into_iter()
        .map(|id| FacetOption {
            id,
            is_checked: false,
        })
        .collect()
}

/// The checked ids of an option set (its initial constraint)
pub fn checked_ids(options: &[FacetOption]) -> Vec<String> {
    options
        .iter()
        .filter(|o| o.is_checked)
        .map(|o| o.id.clone())
        .collect()
}

/// Does `value` pass one facet category's constraint?
///
/// An empty checked set means the category is inactive.
pub fn category_matches(checked: &[String], value: &str) -> bool {
    checked.is_empty() || checked.iter().any(|id| id == value)
}

/// Parse a facet query parameter: absent means "initial state", present
/// (even empty) is the explicit checked set.
pub fn parse_checked_param(param: Option<&str>) -> Option<Vec<String>> {
    param.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
}
