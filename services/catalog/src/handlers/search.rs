use axum::{
    Json,
    extract::{Query, State},
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::search::SearchCoursesUseCase;

// ── GET /search?q= ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn search_courses(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<SearchQuery>, CatalogError>,
) -> Result<Json<serde_json::Value>, CatalogError> {
    let usecase = SearchCoursesUseCase {
        index: state.index.clone(),
    };
    Ok(Json(usecase.execute(query.q.as_deref()).await?))
}
