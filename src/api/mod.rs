//! HTTP API handlers and routes.

pub mod handlers;
pub mod routes;

use crate::sources::SourceCredibility;
use crate::types::{
    Analyst, AnalystStatus, FinalReport, Interview, InterventionAction, InterventionRequest,
    InterventionResponse, InterviewStatus, NewsSource, Project, ProjectDetail, ProjectStatus,
    ReportPerspectives, StartResearchRequest, StartResearchResponse, StatusSnapshot,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::research::start_research,
        handlers::research::get_project,
        handlers::research::get_report,
        handlers::research::delete_project,
        handlers::status::project_status,
        handlers::intervention::intervene,
        handlers::sources::list_sources,
    ),
    components(schemas(
        StartResearchRequest,
        StartResearchResponse,
        Project,
        ProjectStatus,
        Analyst,
        AnalystStatus,
        Interview,
        InterviewStatus,
        ProjectDetail,
        InterventionAction,
        InterventionRequest,
        InterventionResponse,
        StatusSnapshot,
        FinalReport,
        ReportPerspectives,
        NewsSource,
        SourceCredibility,
    )),
    tags(
        (name = "research", description = "Research project lifecycle"),
        (name = "review", description = "Human review checkpoint"),
        (name = "sources", description = "Credible source directory"),
    )
)]
pub struct ApiDoc;
