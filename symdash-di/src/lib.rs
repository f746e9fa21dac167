//! symdash-di library - Debug Images dashboard module
//!
//! [REQ-DI-NF-010]: On-demand microservice serving the debug-image view of
//! a crash event: candidate reconciliation, status classification, priority
//! sorting, text search, and faceted filtering, all computed server-side
//! over the event payload pushed by the host application.

use std::sync::Arc;

use axum::Router;
use tokio::sync::{broadcast, RwLock};
use tower_http::trace::TraceLayer;

use symdash_common::debug_files::BuiltinSymbolSource;
use symdash_common::events::SymdashEvent;
use symdash_common::images::EventPayload;

pub mod api;
pub mod client;
pub mod error;
pub mod facets;
pub mod pagination;
pub mod reconcile;
pub mod search;
pub mod sort;

use client::SymbolStoreClient;

/// Broadcast channel capacity for service events; slow SSE clients lag
/// rather than block publishers.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Current view session: the crash event under inspection, replaced
    /// wholesale by each PUT /api/event
    pub session: Arc<RwLock<Option<EventPayload>>>,
    /// Upstream symbol-store client
    pub store: Arc<SymbolStoreClient>,
    /// Service event broadcast (SSE fan-out)
    pub events: broadcast::Sender<SymdashEvent>,
    /// Builtin symbol-source catalog, cached after first successful fetch
    pub sources: Arc<RwLock<Option<Vec<BuiltinSymbolSource>>>>,
}

impl AppState {
    /// Create new application state around an upstream client
    pub fn new(store: SymbolStoreClient) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: Arc::new(RwLock::new(None)),
            store: Arc::new(store),
            events,
            sources: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
///
/// [REQ-DI-NF-040]: Health endpoint
/// [REQ-DI-F-100]: View endpoints and the embedded dashboard UI
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, put};

    Router::new()
        .route("/api/event", put(api::put_event))
        .route("/api/images", get(api::list_images))
        .route("/api/images/:debug_id/candidates", get(api::list_candidates))
        .route("/api/debug-files/:id", delete(api::delete_debug_file))
        .route("/api/symbol-sources", get(api::list_symbol_sources))
        .route("/api/events", get(api::event_stream))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
