//! Upstream symbol-store record types
//!
//! These mirror the JSON shapes returned by the symbol store's REST API
//! (camelCase field names are the upstream's, not ours).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded debug artifact, independent of any specific event.
///
/// Used to reconcile candidates whose source is the internal store:
/// files uploaded after the event was processed become UNAPPLIED
/// candidates, and OK candidates whose file has since been removed
/// become DELETED.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugFile {
    /// Store-assigned debug file id
    pub id: String,
    /// Uploaded object name (display name)
    pub object_name: String,
    /// Upload timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    /// Size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Debug format (e.g. "elf", "pdb", "macho")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_type: Option<String>,
    /// File kind within the format (e.g. "debug", "code", "sources")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    /// CPU architecture the file applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_name: Option<String>,
}

/// A preconfigured, vendor-provided symbol server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuiltinSymbolSource {
    /// Source identifier matching `Candidate::source`
    pub id: String,
    /// Display name
    pub name: String,
    /// Hidden sources exist in the catalog but are not offered in settings
    #[serde(default)]
    pub hidden: bool,
}
