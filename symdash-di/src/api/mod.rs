//! HTTP API handlers for symdash-di

pub mod buildinfo;
pub mod candidates;
pub mod debug_files;
pub mod event;
pub mod health;
pub mod images;
pub mod sources;
pub mod sse;
pub mod ui;

pub use buildinfo::get_build_info;
pub use candidates::list_candidates;
pub use debug_files::delete_debug_file;
pub use event::put_event;
pub use health::health_routes;
pub use images::list_images;
pub use sources::list_symbol_sources;
pub use sse::event_stream;
pub use ui::{serve_app_js, serve_index};
