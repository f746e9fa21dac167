//! Image list view: classified, searched, facet-filtered, paginated
//!
//! [REQ-DI-F-010] status classification, [REQ-DI-F-060] text search,
//! [REQ-DI-F-070] faceted filtering, [REQ-DI-F-090] pagination.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use symdash_common::images::Image;
use symdash_common::status::ImageStatus;

use crate::error::ApiError;
use crate::facets::{self, FacetOption};
use crate::pagination::{page_slice, PAGE_SIZE};
use crate::{search, AppState};

/// Query parameters for the image list view
#[derive(Debug, Deserialize)]
pub struct ImageListQuery {
    /// Free-text search term (address, identifier prefix, or path fragment)
    #[serde(default)]
    pub query: Option<String>,

    /// Comma-separated checked status ids. Absent means "initial state"
    /// (the builder's default checked set); present-but-empty means no
    /// constraint.
    #[serde(default)]
    pub status: Option<String>,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// One image row with its derived display status
#[derive(Debug, Clone, Serialize)]
pub struct ImageView {
    pub status: ImageStatus,
    pub candidate_count: usize,
    #[serde(flatten)]
    pub image: Image,
}

/// Image list response with results, facet options, and pagination metadata
#[derive(Debug, Serialize)]
pub struct ImageListResponse {
    pub event_id: Uuid,
    pub total_results: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub status_options: Vec<FacetOption>,
    pub images: Vec<ImageView>,
}

/// GET /api/images
///
/// Returns the event's images ordered by load address, classified via the
/// status combiner, filtered by search term and status facet, paginated.
pub async fn list_images(
    State(state): State<AppState>,
    Query(query): Query<ImageListQuery>,
) -> Result<Json<ImageListResponse>, ApiError> {
    let session = state.session.read().await;
    let Some(event) = session.as_ref() else {
        return Err(ApiError::NotFound("No event loaded".to_string()));
    };

    // Order by load address; images without a parseable address trail.
    // Address ranges need the neighbor's base to bound sizeless images.
    let mut images: Vec<&Image> = event.images.iter().collect();
    images.sort_by_key(|img| img.start_address().unwrap_or(u64::MAX));

    let starts: Vec<Option<u64>> = images.iter().map(|img| img.start_address()).collect();
    let entries: Vec<(&Image, ImageStatus, Option<(u64, u64)>)> = images
        .iter()
        .enumerate()
        .map(|(idx, img)| {
            let next_start = starts.get(idx + 1).copied().flatten();
            (*img, img.status(), img.address_range(next_start))
        })
        .collect();

    // Facet options come from the full classified set, before any filtering
    let statuses: Vec<ImageStatus> = entries.iter().map(|(_, s, _)| s.clone()).collect();
    let status_options = facets::image_status_options(&statuses);
    let checked_status = facets::parse_checked_param(query.status.as_deref())
        .unwrap_or_else(|| facets::checked_ids(&status_options));

    let term = query.query.unwrap_or_default();
    let filtered: Vec<ImageView> = entries
        .into_iter()
        .filter(|(_, status, _)| facets::category_matches(&checked_status, status.as_str()))
        .filter(|(image, _, range)| search::image_matches_query(image, *range, &term))
        .map(|(image, status, _)| ImageView {
            status,
            candidate_count: image.candidates.len(),
            image: image.clone(),
        })
        .collect();

    let (page_items, p) = page_slice(&filtered, query.page);

    Ok(Json(ImageListResponse {
        event_id: event.event_id,
        total_results: filtered.len() as i64,
        page: p.page,
        page_size: PAGE_SIZE,
        total_pages: p.total_pages,
        status_options,
        images: page_items.to_vec(),
    }))
}
