//! Server-Sent Events (SSE) utilities
//!
//! Shared SSE implementation for SYMDASH services: a connection-status
//! heartbeat plus fan-out of service events from a broadcast channel.

use axum::response::sse::{Event, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::events::SymdashEvent;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

/// Create an SSE stream carrying service events and a periodic heartbeat.
///
/// # Arguments
/// * `service_name` - Name of the service for logging (e.g., "symdash-di")
/// * `receiver` - Broadcast receiver for service events
///
/// # Example
/// ```rust,ignore
/// pub async fn event_stream(
///     State(state): State<AppState>,
/// ) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
///     symdash_common::sse::create_event_sse_stream("symdash-di", state.events.subscribe())
/// }
/// ```
pub fn create_event_sse_stream(
    service_name: &'static str,
    mut receiver: broadcast::Receiver<SymdashEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("New SSE client connected to {} events", service_name);

    let stream = async_stream::stream! {
        // Send initial connected status
        yield Ok(Event::default()
            .event("ConnectionStatus")
            .data("connected"));

        loop {
            tokio::select! {
                _ = tokio::time::sleep(HEARTBEAT_INTERVAL) => {
                    debug!("SSE: Sending heartbeat");
                    yield Ok(Event::default().comment("heartbeat"));
                }
                received = receiver.recv() => {
                    match received {
                        Ok(event) => {
                            match serde_json::to_string(&event) {
                                Ok(data) => {
                                    yield Ok(Event::default()
                                        .event(event.event_name())
                                        .data(data));
                                }
                                Err(e) => {
                                    warn!("SSE: Failed to serialize event: {}", e);
                                }
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!("SSE: Client lagged, {} events skipped", skipped);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            info!("SSE: {} event channel closed", service_name);
                            break;
                        }
                    }
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(HEARTBEAT_INTERVAL)
            .text("heartbeat"),
    )
}
