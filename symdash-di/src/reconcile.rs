//! Candidate reconciliation against the upstream symbol store
//!
//! [REQ-DI-F-040]: The event payload embeds the candidate list as it looked
//! when the event was processed. The store is the source of truth now:
//! files uploaded since become UNAPPLIED candidates, files removed since
//! turn OK candidates into DELETED ones.

use std::collections::HashSet;

use symdash_common::candidates::{Candidate, Download, INTERNAL_LOCATION_PREFIX, INTERNAL_SOURCE};
use symdash_common::debug_files::DebugFile;

/// Reconciliation output: adjusted originals plus synthesized UNAPPLIED
/// entries, kept apart so the sorter can bucket them explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    /// Event-embedded candidates, normalized and with DELETED rewrites
    pub candidates: Vec<Candidate>,
    /// Synthesized candidates for store files the event never saw
    pub unapplied: Vec<Candidate>,
}

impl Reconciled {
    /// Sorted, flat view list (see [`crate::sort::sort_candidates`])
    pub fn into_sorted(self) -> Vec<Candidate> {
        crate::sort::sort_candidates(self.candidates, self.unapplied)
    }
}

/// Reconcile the event-embedded candidates with the debug files currently
/// in the store.
///
/// `debug_files` is `None` while the store fetch is outstanding or has
/// failed; reconciliation is then skipped, not failed, and the embedded
/// list passes through unchanged.
///
/// Steps, in order:
/// 1. Normalize internal-store locations to bare debug-file ids.
/// 2. Collect the set of locations already represented.
/// 3. Synthesize an UNAPPLIED candidate per store file not in that set.
/// 4. Rewrite internal OK candidates whose file is gone to DELETED.
pub fn reconcile_candidates(
    raw_candidates: Vec<Candidate>,
    debug_files: Option<&[DebugFile]>,
) -> Reconciled {
    let Some(files) = debug_files else {
        return Reconciled {
            candidates: raw_candidates,
            unapplied: Vec::new(),
        };
    };

    // Step 1: normalize internal locations to bare ids
    let mut candidates: Vec<Candidate> = raw_candidates
        .into_iter()
        .map(|mut candidate| {
            if candidate.source == INTERNAL_SOURCE {
                if let Some(location) = candidate.location.take() {
                    let bare = location
                        .strip_prefix(INTERNAL_LOCATION_PREFIX)
                        .map(str::to_string)
                        .unwrap_or(location);
                    candidate.location = Some(bare);
                }
            }
            candidate
        })
        .collect();

    // Step 2: locations already represented among the candidates
    let existing_locations: HashSet<&str> = candidates
        .iter()
        .filter_map(|c| c.location.as_deref())
        .collect();

    // Step 3: files uploaded after the event was processed
    let unapplied: Vec<Candidate> = files
        .iter()
        .filter(|file| !existing_locations.contains(file.id.as_str()))
        .map(|file| Candidate {
            source: INTERNAL_SOURCE.to_string(),
            source_name: Some(file.object_name.clone()),
            location: Some(format!("{INTERNAL_LOCATION_PREFIX}{}", file.id)),
            download: Download::Unapplied,
        })
        .collect();

    // Step 4: OK candidates whose file has since been removed
    let file_ids: HashSet<&str> = files.iter().map(|f| f.id.as_str()).collect();
    for candidate in &mut candidates {
        if candidate.source != INTERNAL_SOURCE {
            continue;
        }
        if !matches!(candidate.download, Download::Ok { .. }) {
            continue;
        }
        let gone = candidate
            .location
            .as_deref()
            .map(|id| !file_ids.contains(id))
            .unwrap_or(false);
        if gone {
            candidate.download = Download::Deleted;
        }
    }

    Reconciled {
        candidates,
        unapplied,
    }
}
