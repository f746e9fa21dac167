//! Debug-file delete proxy
//!
//! [REQ-DI-F-080]: Deleting is the one mutation SYMDASH performs, and it is
//! proxied straight to the symbol store. Open views refetch after the
//! response (or on the broadcast event); nothing is deleted locally.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;

use symdash_common::events::SymdashEvent;

use crate::error::ApiError;
use crate::AppState;

/// DELETE /api/debug-files/:id
///
/// Proxies the delete to the symbol store. Upstream failure maps to 502
/// and no local state changes; success broadcasts `DebugFilesChanged` so
/// connected dashboards refetch their candidate views.
pub async fn delete_debug_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_debug_file(&id).await?;

    info!(id = %id, "Debug file deleted; notifying dashboards");
    let _ = state.events.send(SymdashEvent::DebugFilesChanged {
        debug_file_id: id,
        timestamp: Utc::now(),
    });

    Ok(StatusCode::NO_CONTENT)
}
