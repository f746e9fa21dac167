//! Server-Sent Events (SSE) stream for connected dashboards
//!
//! Streams events:
//! - ConnectionStatus (initial + heartbeat)
//! - SessionReplaced (a new event payload was pushed)
//! - DebugFilesChanged (a delete went through; candidate views refetch)

use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /api/events - SSE event stream
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    symdash_common::sse::create_event_sse_stream("symdash-di", state.events.subscribe())
}
