use crate::{
    types::{AppError, Result, StatusSnapshot},
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};

/// Read-only progress snapshot for a project.
///
/// Served best-effort at any point in the lifecycle, including for
/// projects that ended in `error`.
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/status",
    responses(
        (status = 200, description = "Project status snapshot", body = StatusSnapshot),
        (status = 404, description = "Project not found")
    ),
    params(("project_id" = String, Path, description = "Project id")),
    tag = "research"
)]
pub async fn project_status(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<StatusSnapshot>> {
    let snapshot = state
        .store
        .status_snapshot(&project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;

    Ok(Json(snapshot))
}
