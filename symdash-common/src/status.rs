//! Image status vocabulary and the combined-status classifier
//!
//! [REQ-DI-F-010]: Per-image display status derived from the debug-info and
//! unwind-info sub-statuses via a fixed weight order.

use serde::{Deserialize, Serialize};

/// Per-image classification of whether symbolication inputs were found.
///
/// The server supplies this as an open-ended string; values outside the
/// known vocabulary are preserved verbatim in `Unknown` so they remain a
/// typed, testable case instead of a silent fallthrough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImageStatus {
    /// Debug information was found and applied
    Found,
    /// No debug information could be located
    Missing,
    /// A debug file was located but could not be parsed
    Malformed,
    /// Download from a symbol source failed
    FetchingFailed,
    /// Symbol source did not respond in time
    Timeout,
    /// Image was not referenced by any frame; nothing was fetched
    Unused,
    /// Catch-all reported by the server
    Other,
    /// Unrecognized server value, preserved verbatim
    Unknown(String),
}

impl ImageStatus {
    /// Wire/display identifier for this status
    pub fn as_str(&self) -> &str {
        match self {
            ImageStatus::Found => "found",
            ImageStatus::Missing => "missing",
            ImageStatus::Malformed => "malformed",
            ImageStatus::FetchingFailed => "fetching_failed",
            ImageStatus::Timeout => "timeout",
            ImageStatus::Unused => "unused",
            ImageStatus::Other => "other",
            ImageStatus::Unknown(raw) => raw,
        }
    }
}

impl From<String> for ImageStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "found" => ImageStatus::Found,
            "missing" => ImageStatus::Missing,
            "malformed" => ImageStatus::Malformed,
            "fetching_failed" => ImageStatus::FetchingFailed,
            "timeout" => ImageStatus::Timeout,
            "unused" => ImageStatus::Unused,
            "other" => ImageStatus::Other,
            _ => {
                tracing::warn!(raw = %value, "Unrecognized image status from server");
                ImageStatus::Unknown(value)
            }
        }
    }
}

impl From<ImageStatus> for String {
    fn from(status: ImageStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Weight order for status combination: absent/unused < found < problems.
///
/// A higher weight means "worse / more informative for the user".
fn weight(status: Option<&ImageStatus>) -> u8 {
    match status {
        None | Some(ImageStatus::Unused) => 0,
        Some(ImageStatus::Found) => 1,
        Some(_) => 2,
    }
}

/// Combine the debug-info and unwind-info statuses into one display status.
///
/// Returns whichever input achieved the higher weight; the debug status wins
/// ties. Both absent yields `Unused`. Total function, never fails.
///
/// [REQ-DI-F-010]
pub fn combine_status(
    debug_status: Option<&ImageStatus>,
    unwind_status: Option<&ImageStatus>,
) -> ImageStatus {
    if weight(debug_status) >= weight(unwind_status) {
        debug_status.cloned().unwrap_or(ImageStatus::Unused)
    } else {
        unwind_status.cloned().unwrap_or(ImageStatus::Unused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_absent_is_unused() {
        assert_eq!(combine_status(None, None), ImageStatus::Unused);
    }

    #[test]
    fn test_found_beats_unused() {
        assert_eq!(
            combine_status(Some(&ImageStatus::Found), Some(&ImageStatus::Unused)),
            ImageStatus::Found
        );
        assert_eq!(
            combine_status(Some(&ImageStatus::Unused), Some(&ImageStatus::Found)),
            ImageStatus::Found
        );
    }

    #[test]
    fn test_problem_beats_found() {
        assert_eq!(
            combine_status(Some(&ImageStatus::Malformed), Some(&ImageStatus::Found)),
            ImageStatus::Malformed
        );
        assert_eq!(
            combine_status(Some(&ImageStatus::Found), Some(&ImageStatus::Timeout)),
            ImageStatus::Timeout
        );
    }

    #[test]
    fn test_debug_status_wins_ties() {
        // Equal weights at every tier: the debug side is reported
        assert_eq!(
            combine_status(Some(&ImageStatus::Missing), Some(&ImageStatus::Malformed)),
            ImageStatus::Missing
        );
        assert_eq!(
            combine_status(Some(&ImageStatus::Found), Some(&ImageStatus::Found)),
            ImageStatus::Found
        );
        assert_eq!(
            combine_status(Some(&ImageStatus::Unused), None),
            ImageStatus::Unused
        );
    }

    #[test]
    fn test_absent_debug_with_problem_unwind() {
        assert_eq!(
            combine_status(None, Some(&ImageStatus::FetchingFailed)),
            ImageStatus::FetchingFailed
        );
    }

    #[test]
    fn test_unknown_status_weighs_as_problem() {
        let unknown = ImageStatus::Unknown("quarantined".to_string());
        assert_eq!(
            combine_status(Some(&ImageStatus::Found), Some(&unknown)),
            unknown
        );
    }

    #[test]
    fn test_unknown_status_round_trips_raw_value() {
        let status: ImageStatus = serde_json::from_str("\"quarantined\"").unwrap();
        assert_eq!(status, ImageStatus::Unknown("quarantined".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"quarantined\"");
    }

    #[test]
    fn test_known_status_parses() {
        let status: ImageStatus = serde_json::from_str("\"fetching_failed\"").unwrap();
        assert_eq!(status, ImageStatus::FetchingFailed);
    }
}
