//! Candidate list view for one image: reconciled against the symbol store,
//! priority-sorted, searched, facet-filtered, paginated.
//!
//! [REQ-DI-F-040] reconciliation, [REQ-DI-F-050] sorting,
//! [REQ-DI-F-060]/[REQ-DI-F-070] search and facets.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use symdash_common::candidates::Candidate;
use symdash_common::images::Image;

use crate::error::ApiError;
use crate::facets::{self, FacetOption};
use crate::pagination::{page_slice, PAGE_SIZE};
use crate::reconcile::reconcile_candidates;
use crate::search::{self, normalize_id};
use crate::AppState;

/// Query parameters for the candidate list view
#[derive(Debug, Deserialize)]
pub struct CandidateListQuery {
    /// Free-text search term (source name or location fragment)
    #[serde(default)]
    pub query: Option<String>,

    /// Comma-separated checked status ids; absent means initial state
    #[serde(default)]
    pub status: Option<String>,

    /// Comma-separated checked source ids; absent means initial state
    #[serde(default)]
    pub source: Option<String>,

    /// Optional upstream file-format filter, passed through verbatim
    #[serde(default)]
    pub file_formats: Option<String>,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// Candidate list response with results, facet options, and pagination
#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub event_id: Uuid,
    pub debug_id: String,
    /// False when the store fetch failed and the embedded candidate list is
    /// served unreconciled
    pub reconciled: bool,
    pub total_results: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub status_options: Vec<FacetOption>,
    pub source_options: Vec<FacetOption>,
    pub candidates: Vec<Candidate>,
}

fn identifier_matches(id: Option<&str>, needle: &str) -> bool {
    id.map(|raw| normalize_id(raw) == needle).unwrap_or(false)
}

/// GET /api/images/:debug_id/candidates
///
/// Looks up the image by debug or code identifier, reconciles its embedded
/// candidates against the symbol store (degrading to the unreconciled list
/// if the store is unreachable), then sorts, filters, and paginates.
pub async fn list_candidates(
    State(state): State<AppState>,
    Path(debug_id): Path<String>,
    Query(query): Query<CandidateListQuery>,
) -> Result<Json<CandidateListResponse>, ApiError> {
    // Clone what we need out of the session lock before awaiting upstream
    let (event_id, image): (Uuid, Image) = {
        let session = state.session.read().await;
        let Some(event) = session.as_ref() else {
            return Err(ApiError::NotFound("No event loaded".to_string()));
        };
        let needle = normalize_id(&debug_id);
        let image = event
            .images
            .iter()
            .find(|img| {
                identifier_matches(img.debug_id.as_deref(), &needle)
                    || identifier_matches(img.code_id.as_deref(), &needle)
            })
            .cloned()
            .ok_or_else(|| {
                ApiError::NotFound(format!("No image with identifier {debug_id}"))
            })?;
        (event.event_id, image)
    };

    // Authoritative debug files; a failed fetch degrades to the embedded
    // list rather than failing the view.
    let debug_files = match image.debug_id.as_deref() {
        Some(id) => match state
            .store
            .list_debug_files(id, query.file_formats.as_deref())
            .await
        {
            Ok(files) => Some(files),
            Err(e) => {
                warn!(debug_id = %id, error = %e, "Debug file fetch failed; serving unreconciled candidates");
                None
            }
        },
        None => None,
    };
    let reconciled = debug_files.is_some();

    let sorted = reconcile_candidates(image.candidates, debug_files.as_deref()).into_sorted();

    // Facet options from the full sorted set, before search/filtering
    let status_options = facets::candidate_status_options(&sorted);
    let source_options = facets::candidate_source_options(&sorted);
    let checked_status = facets::parse_checked_param(query.status.as_deref())
        .unwrap_or_else(|| facets::checked_ids(&status_options));
    let checked_source = facets::parse_checked_param(query.source.as_deref())
        .unwrap_or_else(|| facets::checked_ids(&source_options));

    let term = query.query.unwrap_or_default();
    let filtered: Vec<Candidate> = sorted
        .into_iter()
        .filter(|c| facets::category_matches(&checked_status, c.download.status_id()))
        .filter(|c| facets::category_matches(&checked_source, &c.source))
        .filter(|c| search::candidate_matches_query(c, &term))
        .collect();

    let (page_items, p) = page_slice(&filtered, query.page);

    Ok(Json(CandidateListResponse {
        event_id,
        debug_id,
        reconciled,
        total_results: filtered.len() as i64,
        page: p.page,
        page_size: PAGE_SIZE,
        total_pages: p.total_pages,
        status_options,
        source_options,
        candidates: page_items.to_vec(),
    }))
}
