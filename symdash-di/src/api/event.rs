//! View session management: the host application pushes the crash event
//! under inspection here.
//!
//! [REQ-DI-F-030]: Each PUT replaces the session wholesale; no state from a
//! previous event survives.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use symdash_common::events::SymdashEvent;
use symdash_common::images::EventPayload;

use crate::error::ApiError;
use crate::AppState;

/// Summary returned after a session replace
#[derive(Debug, Serialize)]
pub struct EventSummary {
    pub event_id: Uuid,
    pub image_count: usize,
}

/// PUT /api/event
///
/// Replace the current view session with a new event payload.
pub async fn put_event(
    State(state): State<AppState>,
    Json(payload): Json<EventPayload>,
) -> Result<Json<EventSummary>, ApiError> {
    let event_id = payload.event_id;
    let image_count = payload.images.len();

    *state.session.write().await = Some(payload);

    info!(event_id = %event_id, images = image_count, "View session replaced");

    // Nobody listening is fine; send() only fails without receivers
    let _ = state.events.send(SymdashEvent::SessionReplaced {
        event_id,
        image_count,
        timestamp: Utc::now(),
    });

    Ok(Json(EventSummary {
        event_id,
        image_count,
    }))
}
