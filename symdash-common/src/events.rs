//! Event types for the SYMDASH service event stream

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SYMDASH service events, broadcast to connected dashboards via SSE
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SymdashEvent {
    /// A view session was replaced by a new event payload
    SessionReplaced {
        event_id: Uuid,
        image_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// A debug file was deleted from the internal store; open candidate
    /// views should refetch
    DebugFilesChanged {
        debug_file_id: String,
        timestamp: DateTime<Utc>,
    },
}

impl SymdashEvent {
    /// SSE event name for this variant
    pub fn event_name(&self) -> &'static str {
        match self {
            SymdashEvent::SessionReplaced { .. } => "SessionReplaced",
            SymdashEvent::DebugFilesChanged { .. } => "DebugFilesChanged",
        }
    }
}
