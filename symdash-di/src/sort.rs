//! Candidate priority sorting
//!
//! [REQ-DI-F-050]: Actionable problems surface first (permission errors,
//! malformed files, errors), then successes, then deleted files; unapplied
//! and not-found entries trail since they require no action on the current
//! event.

use symdash_common::candidates::{Candidate, Download};

/// Number of priority buckets (see [`bucket_index`])
const BUCKET_COUNT: usize = 7;

/// Fixed bucket priority for a candidate's download status
fn bucket_index(download: &Download) -> usize {
    match download {
        Download::NoPermission { .. } => 0,
        Download::Malformed { .. } => 1,
        Download::Error { .. } => 2,
        Download::Ok { .. } => 3,
        Download::Deleted => 4,
        Download::Unapplied => 5,
        // NOT_FOUND and anything unrecognized trail
        Download::NotFound { .. } | Download::Unknown => 6,
    }
}

/// Bucket-internal ordering: ascending (source_name, location), absent
/// values first (`Option`'s ordering: None < Some).
fn bucket_key(candidate: &Candidate) -> (Option<String>, Option<String>) {
    (candidate.source_name.clone(), candidate.location.clone())
}

/// Sort candidates into seven ordered status buckets.
///
/// `unapplied` is the separately synthesized list from reconciliation; it
/// joins the UNAPPLIED bucket together with any candidate whose own status
/// is already `unapplied`, which keeps reconcile-then-sort stable under
/// repeated application.
pub fn sort_candidates(candidates: Vec<Candidate>, unapplied: Vec<Candidate>) -> Vec<Candidate> {
    let mut buckets: [Vec<Candidate>; BUCKET_COUNT] = Default::default();

    for candidate in candidates {
        let index = bucket_index(&candidate.download);
        buckets[index].push(candidate);
    }
    buckets[5].extend(unapplied);

    let mut sorted = Vec::with_capacity(buckets.iter().map(Vec::len).sum());
    for bucket in &mut buckets {
        bucket.sort_by_key(bucket_key);
        sorted.append(bucket);
    }
    sorted
}
