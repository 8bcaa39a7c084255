use axum::{Json, extract::State};

use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::index::ReindexReport;

// ── POST /admin/reindex ──────────────────────────────────────────────────────

pub async fn reindex(State(state): State<AppState>) -> Result<Json<ReindexReport>, CatalogError> {
    let report = state.index_sync().reindex_all(&state.catalog()).await?;
    Ok(Json(report))
}
