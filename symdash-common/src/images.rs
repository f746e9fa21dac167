//! Debug images: native binaries/libraries referenced by a crash report
//!
//! [REQ-DI-F-030]: Images arrive embedded in the event payload pushed by the
//! host application and are immutable for the lifetime of a view session.
//! Display status is derived via [`crate::combine_status`], never stored.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::candidates::Candidate;
use crate::status::ImageStatus;

/// One loaded native binary/library from a crash report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Debug identifier (breakpad/PDB style, may contain dashes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_id: Option<String>,
    /// Code identifier (build id / PE timestamp+size)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_id: Option<String>,
    /// Path of the executable/library on the crashed host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_file: Option<String>,
    /// Path of the debug companion file, when distinct
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_file: Option<String>,
    /// CPU architecture string (e.g. "x86_64", "arm64")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
    /// Load address as a hex string (e.g. "0x7f8a2c000000")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_addr: Option<String>,
    /// Mapped size in bytes; absent when the SDK did not report it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<u64>,
    /// Server classification of the debug-info lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_status: Option<ImageStatus>,
    /// Server classification of the unwind-info lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unwind_status: Option<ImageStatus>,
    /// Download candidates recorded when the event was processed
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl Image {
    /// Derived display status per the weight classifier
    pub fn status(&self) -> ImageStatus {
        crate::combine_status(self.debug_status.as_ref(), self.unwind_status.as_ref())
    }

    /// Parsed load address, if `image_addr` is a valid hex string
    pub fn start_address(&self) -> Option<u64> {
        parse_hex_addr(self.image_addr.as_deref()?)
    }

    /// Covered address range `[start, end)`.
    ///
    /// The end is `start + image_size`; when the size is absent the next
    /// image's base address bounds the range (images are assumed
    /// non-overlapping once sorted by address). With neither available the
    /// range is empty.
    pub fn address_range(&self, next_start: Option<u64>) -> Option<(u64, u64)> {
        let start = self.start_address()?;
        let end = match self.image_size {
            Some(size) => start.saturating_add(size),
            None => next_start.unwrap_or(start),
        };
        Some((start, end))
    }
}

/// Parse a `0x`-prefixed (or bare) hex address string
pub fn parse_hex_addr(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

/// Crash event payload pushed by the host application.
///
/// Replaces the current view session wholesale; nothing outlives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    /// Event identifier in the host application
    pub event_id: Uuid,
    /// Images loaded in the crashed process
    #[serde(default)]
    pub images: Vec<Image>,
}
