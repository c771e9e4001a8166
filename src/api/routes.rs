use crate::api::handlers;
use crate::api::ApiDoc;
use crate::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use utoipa::OpenApi;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/research", post(handlers::research::start_research))
        .route(
            "/api/projects/{project_id}",
            get(handlers::research::get_project).delete(handlers::research::delete_project),
        )
        .route(
            "/api/projects/{project_id}/status",
            get(handlers::status::project_status),
        )
        .route(
            "/api/projects/{project_id}/report",
            get(handlers::research::get_report),
        )
        .route(
            "/api/projects/{project_id}/intervene",
            post(handlers::intervention::intervene),
        )
        .route("/api/sources", get(handlers::sources::list_sources))
        .route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
