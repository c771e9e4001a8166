use crate::{
    types::{
        AppError, FinalReport, ProjectDetail, Result, StartResearchRequest, StartResearchResponse,
    },
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// Create a research project and enqueue its workflow.
///
/// The workflow runs on the background worker pool; this handler only
/// returns the project handle.
#[utoipa::path(
    post,
    path = "/api/research",
    request_body = StartResearchRequest,
    responses(
        (status = 200, description = "Research started", body = StartResearchResponse),
        (status = 400, description = "Empty topic")
    ),
    tag = "research"
)]
pub async fn start_research(
    State(state): State<AppState>,
    Json(payload): Json<StartResearchRequest>,
) -> Result<Json<StartResearchResponse>> {
    let topic = payload.topic.trim();
    if topic.is_empty() {
        return Err(AppError::InvalidInput(
            "Research topic must not be empty".to_string(),
        ));
    }

    let project = state.store.create_project(topic).await?;
    state.queue.submit(&project.id).await?;

    tracing::info!(project_id = %project.id, topic, "research project enqueued");

    Ok(Json(StartResearchResponse {
        project_id: project.id,
        status: project.status,
    }))
}

/// Fetch a project with its analysts and interviews.
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}",
    responses(
        (status = 200, description = "Project detail", body = ProjectDetail),
        (status = 404, description = "Project not found")
    ),
    params(("project_id" = String, Path, description = "Project id")),
    tag = "research"
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<ProjectDetail>> {
    let project = state
        .store
        .get_project(&project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;

    let analysts = state.store.list_analysts(&project_id).await?;
    let interviews = state.store.list_interviews(&project_id).await?;

    Ok(Json(ProjectDetail {
        project,
        analysts,
        interviews,
    }))
}

/// Fetch the final report; available once the project completes.
#[utoipa::path(
    get,
    path = "/api/projects/{project_id}/report",
    responses(
        (status = 200, description = "Final report", body = FinalReport),
        (status = 404, description = "Project or report not found")
    ),
    params(("project_id" = String, Path, description = "Project id")),
    tag = "research"
)]
pub async fn get_report(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<Json<FinalReport>> {
    let project = state
        .store
        .get_project(&project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;

    let raw = project.final_report.ok_or_else(|| {
        AppError::NotFound(format!("Report for project {} is not available yet", project_id))
    })?;

    let report: FinalReport = serde_json::from_str(&raw)
        .map_err(|e| AppError::Internal(format!("Stored report is corrupt: {}", e)))?;

    Ok(Json(report))
}

/// Delete a project and everything it owns; shared experts survive.
#[utoipa::path(
    delete,
    path = "/api/projects/{project_id}",
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found")
    ),
    params(("project_id" = String, Path, description = "Project id")),
    tag = "research"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<StatusCode> {
    if !state.store.delete_project(&project_id).await? {
        return Err(AppError::NotFound(format!("Project {}", project_id)));
    }

    tracing::info!(%project_id, "project deleted");
    Ok(StatusCode::NO_CONTENT)
}
