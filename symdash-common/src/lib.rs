//! # SYMDASH Common Library
//!
//! Shared code for the SYMDASH dashboard services including:
//! - Debug-image data model (images, candidates, downloads)
//! - Status vocabulary and the combined-status classifier
//! - Upstream record types (debug files, builtin symbol sources)
//! - Service event types (SymdashEvent enum)
//! - Configuration loading
//! - SSE utilities

pub mod candidates;
pub mod config;
pub mod debug_files;
pub mod error;
pub mod events;
pub mod images;
pub mod sse;
pub mod status;

pub use error::{Error, Result};
pub use status::{combine_status, ImageStatus};
