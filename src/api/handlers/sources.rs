use crate::{
    types::{NewsSource, Result},
    AppState,
};
use axum::{extract::State, Json};

/// List the curated news sources, most credible first.
#[utoipa::path(
    get,
    path = "/api/sources",
    responses(
        (status = 200, description = "Curated sources", body = [NewsSource])
    ),
    tag = "sources"
)]
pub async fn list_sources(State(state): State<AppState>) -> Result<Json<Vec<NewsSource>>> {
    let sources = state.sources.list().await?;
    Ok(Json(sources))
}
