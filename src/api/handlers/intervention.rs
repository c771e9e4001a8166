use crate::{
    types::{
        AppError, InterventionAction, InterventionRequest, InterventionResponse, ProjectStatus,
        Result,
    },
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};

/// Human review actions: approve, modify, or stop a project that is
/// waiting at the review checkpoint.
///
/// These are the only legal external status writes. Outside `reviewing`
/// the request is rejected. Approve moves the project to `completed`
/// (the orchestrator then compiles the report, same as a review
/// timeout); modify records notes and changes nothing else; stop
/// terminates the project without a report.
#[utoipa::path(
    post,
    path = "/api/projects/{project_id}/intervene",
    request_body = InterventionRequest,
    responses(
        (status = 200, description = "Intervention applied", body = InterventionResponse),
        (status = 400, description = "Project is not awaiting review"),
        (status = 404, description = "Project not found")
    ),
    params(("project_id" = String, Path, description = "Project id")),
    tag = "review"
)]
pub async fn intervene(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(payload): Json<InterventionRequest>,
) -> Result<Json<InterventionResponse>> {
    let project = state
        .store
        .get_project(&project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;

    if project.status != ProjectStatus::Reviewing {
        return Err(AppError::InvalidInput(format!(
            "Project {} is not awaiting review (status: {})",
            project_id, project.status
        )));
    }

    if let Some(notes) = payload.notes.as_deref() {
        let notes = notes.trim();
        if !notes.is_empty() {
            // Guarded write; a lost race against the gate is tolerated.
            state.store.set_human_notes(&project_id, notes).await?;
        }
    }

    match payload.action {
        InterventionAction::Approve => {
            let applied = state
                .store
                .transition_project_status(
                    &project_id,
                    ProjectStatus::Reviewing,
                    ProjectStatus::Completed,
                )
                .await?;
            if applied {
                tracing::info!(%project_id, "research approved by reviewer");
            }
        }
        InterventionAction::Modify => {
            // Notes recorded above; the workflow proceeds as if no
            // action was taken.
            tracing::info!(%project_id, "review notes recorded");
        }
        InterventionAction::Stop => {
            let applied = state
                .store
                .transition_project_status(
                    &project_id,
                    ProjectStatus::Reviewing,
                    ProjectStatus::Stopped,
                )
                .await?;
            if applied {
                tracing::info!(%project_id, "research stopped by reviewer");
            }
        }
    }

    let project = state
        .store
        .get_project(&project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;

    Ok(Json(InterventionResponse {
        project_id,
        status: project.status,
    }))
}
