//! Builtin symbol-source catalog
//!
//! The catalog is static for the lifetime of the upstream deployment, so
//! the first successful fetch is cached for the process lifetime.

use axum::{extract::State, Json};

use symdash_common::debug_files::BuiltinSymbolSource;

use crate::error::ApiError;
use crate::AppState;

/// GET /api/symbol-sources
///
/// Returns the vendor-provided symbol-server catalog, fetched from the
/// symbol store on first use.
pub async fn list_symbol_sources(
    State(state): State<AppState>,
) -> Result<Json<Vec<BuiltinSymbolSource>>, ApiError> {
    if let Some(cached) = state.sources.read().await.as_ref() {
        return Ok(Json(cached.clone()));
    }

    let sources = state.store.list_builtin_sources().await?;
    *state.sources.write().await = Some(sources.clone());

    Ok(Json(sources))
}
