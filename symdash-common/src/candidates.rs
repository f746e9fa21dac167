//! Download candidates: one attempt to locate a debug file for an image
//! from one symbol source.
//!
//! [REQ-DI-F-020]: Candidate records carry a tagged `download` variant so
//! per-status fields (features, processing info, details) only exist under
//! the matching tag.

use serde::{Deserialize, Serialize};

/// Source identifier for the product's own debug-file store, as opposed to
/// third-party or public symbol servers.
pub const INTERNAL_SOURCE: &str = "internal";

/// Location prefix marking a candidate that points at an internal store
/// debug file. The suffix is the bare debug-file id.
pub const INTERNAL_LOCATION_PREFIX: &str = "internal://debug-file/";

/// One attempt to locate a debug file for an image from one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Source identifier (e.g. "internal", "microsoft", a custom store key)
    pub source: String,
    /// Human-readable source name, when the server resolved one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    /// URI or path probed at that source. Required unless the download
    /// status is `unapplied`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Outcome of the download attempt
    pub download: Download,
}

impl Candidate {
    /// True if this candidate points at the internal debug-file store
    pub fn is_internal(&self) -> bool {
        self.source == INTERNAL_SOURCE
    }

    /// The bare internal debug-file id, if this candidate's location is an
    /// internal store reference (prefixed or already bare).
    pub fn internal_file_id(&self) -> Option<&str> {
        if !self.is_internal() {
            return None;
        }
        let location = self.location.as_deref()?;
        Some(location.strip_prefix(INTERNAL_LOCATION_PREFIX).unwrap_or(location))
    }
}

/// Outcome of one download attempt, tagged by `status`.
///
/// Only `Ok` carries the feature flags and processing sub-statuses;
/// `Malformed`/`NotFound`/`NoPermission`/`Error` carry optional details.
/// Unrecognized server statuses deserialize as `Unknown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Download {
    Ok {
        #[serde(default)]
        features: CandidateFeatures,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        debug: Option<ProcessingInfo>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unwind: Option<ProcessingInfo>,
    },
    Malformed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    NotFound {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    NoPermission {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Deleted,
    Unapplied,
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    /// Open-ended server vocabulary: anything we do not recognize
    #[serde(other)]
    Unknown,
}

impl Download {
    /// Wire/display identifier of the status tag
    pub fn status_id(&self) -> &'static str {
        match self {
            Download::Ok { .. } => "ok",
            Download::Malformed { .. } => "malformed",
            Download::NotFound { .. } => "not_found",
            Download::NoPermission { .. } => "no_permission",
            Download::Deleted => "deleted",
            Download::Unapplied => "unapplied",
            Download::Error { .. } => "error",
            Download::Unknown => "unknown",
        }
    }
}

/// Feature flags reported for a successfully downloaded debug file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFeatures {
    #[serde(default)]
    pub has_debug_info: bool,
    #[serde(default)]
    pub has_sources: bool,
    #[serde(default)]
    pub has_symbols: bool,
    #[serde(default)]
    pub has_unwind_info: bool,
}

/// Post-download processing outcome for one concern (debug or unwind info)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingInfo {
    pub status: ProcessingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Processing status vocabulary; unrecognized values preserved verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProcessingStatus {
    Ok,
    Error,
    Malformed,
    Unknown(String),
}

impl From<String> for ProcessingStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ok" => ProcessingStatus::Ok,
            "error" => ProcessingStatus::Error,
            "malformed" => ProcessingStatus::Malformed,
            _ => ProcessingStatus::Unknown(value),
        }
    }
}

impl From<ProcessingStatus> for String {
    fn from(status: ProcessingStatus) -> Self {
        match status {
            ProcessingStatus::Ok => "ok".to_string(),
            ProcessingStatus::Error => "error".to_string(),
            ProcessingStatus::Malformed => "malformed".to_string(),
            ProcessingStatus::Unknown(raw) => raw,
        }
    }
}
