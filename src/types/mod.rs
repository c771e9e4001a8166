#![allow(missing_docs)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= Status Enums =============

/// Lifecycle of a research project.
///
/// Transitions only move forward along
/// `created -> analyzing -> interviewing -> reviewing -> {completed|stopped}`,
/// with `error` reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Created,
    Analyzing,
    Interviewing,
    Reviewing,
    Completed,
    Stopped,
    Error,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Created => "created",
            ProjectStatus::Analyzing => "analyzing",
            ProjectStatus::Interviewing => "interviewing",
            ProjectStatus::Reviewing => "reviewing",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Stopped => "stopped",
            ProjectStatus::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "created" => Some(ProjectStatus::Created),
            "analyzing" => Some(ProjectStatus::Analyzing),
            "interviewing" => Some(ProjectStatus::Interviewing),
            "reviewing" => Some(ProjectStatus::Reviewing),
            "completed" => Some(ProjectStatus::Completed),
            "stopped" => Some(ProjectStatus::Stopped),
            "error" => Some(ProjectStatus::Error),
            _ => None,
        }
    }

    /// Terminal states admit no further automatic transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProjectStatus::Completed | ProjectStatus::Stopped | ProjectStatus::Error
        )
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AnalystStatus {
    Assigned,
    Researching,
    Completed,
}

impl AnalystStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalystStatus::Assigned => "assigned",
            AnalystStatus::Researching => "researching",
            AnalystStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "assigned" => Some(AnalystStatus::Assigned),
            "researching" => Some(AnalystStatus::Researching),
            "completed" => Some(AnalystStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    Scheduled,
    InProgress,
    Completed,
    Error,
}

impl InterviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::InProgress => "in_progress",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Error => "error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(InterviewStatus::Scheduled),
            "in_progress" => Some(InterviewStatus::InProgress),
            "completed" => Some(InterviewStatus::Completed),
            "error" => Some(InterviewStatus::Error),
            _ => None,
        }
    }
}

// ============= Domain Records =============

/// A research project and the state machine the orchestrator drives.
///
/// `final_report` is non-null only once the project reaches `completed`.
/// `human_notes` may only be written by a reviewer while the project is
/// in `reviewing`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: String,
    pub topic: String,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_notes: Option<String>,
    /// Serialized [`FinalReport`], set by the report compiler.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_report: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A generated analyst persona, scoped to one project.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Analyst {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub specialization: String,
    pub research_focus: String,
    pub status: AnalystStatus,
    pub created_at: DateTime<Utc>,
}

/// A generated expert persona. Experts are global and deduplicated by
/// `(name, expertise_area)` so concurrent analysts converge on one row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Expert {
    pub id: String,
    pub name: String,
    pub expertise_area: String,
    pub background: String,
    pub credibility_score: f64,
}

/// One analyst-expert interview cycle. Artifact columns hold serialized
/// structures and stay null until the corresponding stage completes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Interview {
    pub id: String,
    pub project_id: String,
    pub analyst_id: String,
    pub expert_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credibility_assessment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fake_news_flags: Option<String>,
    pub status: InterviewStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A curated news outlet with credibility ratings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsSource {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub credibility_rating: f64,
    pub bias_rating: String,
    pub fact_check_rating: String,
    pub is_verified: bool,
}

// ============= Generation Artifacts =============
//
// Typed shapes for everything that crosses the content generation
// boundary. Missing fields fall back to fixed defaults so a partial
// generation result never aborts a stage.

fn default_analyst_name() -> String {
    "AI Analyst".to_string()
}

fn default_specialization() -> String {
    "General".to_string()
}

fn default_research_focus() -> String {
    "General research".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalystProfile {
    #[serde(default = "default_analyst_name")]
    pub name: String,
    #[serde(default = "default_specialization")]
    pub specialization: String,
    #[serde(default = "default_research_focus")]
    pub research_focus: String,
}

fn default_expert_name() -> String {
    "AI Expert".to_string()
}

fn default_expert_background() -> String {
    "AI-generated expert".to_string()
}

fn default_expert_credibility() -> f64 {
    0.8
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertProfile {
    #[serde(default = "default_expert_name")]
    pub name: String,
    #[serde(default = "default_specialization")]
    pub expertise_area: String,
    #[serde(default = "default_expert_background")]
    pub background: String,
    #[serde(default = "default_expert_credibility")]
    pub credibility_score: f64,
}

/// One answered interview question with its supporting evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewResponse {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub credibility_notes: String,
    #[serde(default)]
    pub misinformation_flags: Vec<String>,
}

/// Credibility verdict over a full interview response set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredibilityAssessment {
    pub overall_credibility: f64,
    #[serde(default)]
    pub credibility_assessment: String,
    #[serde(default)]
    pub fake_news_indicators: Vec<String>,
    #[serde(default)]
    pub verified_facts: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl CredibilityAssessment {
    /// Substitute used when the assessment call fails; an interview is
    /// never aborted over a missing credibility verdict.
    pub fn fallback() -> Self {
        Self {
            overall_credibility: 0.5,
            credibility_assessment: "Unable to assess credibility due to a processing error"
                .to_string(),
            fake_news_indicators: Vec::new(),
            verified_facts: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// Digest persisted alongside the raw responses: every answer, plus the
/// flattened sources and credibility notes across the whole interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewInsights {
    pub key_insights: Vec<String>,
    pub sources: Vec<String>,
    pub credibility_notes: Vec<String>,
}

impl InterviewInsights {
    pub fn from_responses(responses: &[InterviewResponse]) -> Self {
        Self {
            key_insights: responses.iter().map(|r| r.answer.clone()).collect(),
            sources: responses
                .iter()
                .flat_map(|r| r.sources.iter().cloned())
                .collect(),
            credibility_notes: responses
                .iter()
                .map(|r| r.credibility_notes.clone())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReportPerspectives {
    #[serde(default)]
    pub political_perspective: String,
    #[serde(default)]
    pub economic_perspective: String,
    #[serde(default)]
    pub international_perspective: String,
}

fn default_methodology() -> String {
    "Multi-agent analysis with parallel interviews and source verification".to_string()
}

/// The consolidated research report compiled after review.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FinalReport {
    #[serde(default)]
    pub executive_summary: String,
    #[serde(default)]
    pub key_findings: Vec<String>,
    #[serde(default)]
    pub verified_facts: Vec<String>,
    #[serde(default)]
    pub potential_misinformation: Vec<String>,
    #[serde(default)]
    pub source_analysis: String,
    #[serde(default)]
    pub perspectives: ReportPerspectives,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub credibility_score: f64,
    #[serde(default)]
    pub experts_consulted: usize,
    #[serde(default = "default_methodology")]
    pub methodology: String,
}

impl FinalReport {
    /// Fixed substitute persisted when report generation fails, so a
    /// completed project always carries a report artifact.
    pub fn degenerate(experts_consulted: usize) -> Self {
        Self {
            executive_summary: "Report generation failed".to_string(),
            key_findings: Vec::new(),
            verified_facts: Vec::new(),
            potential_misinformation: Vec::new(),
            source_analysis: "Unable to analyze sources".to_string(),
            perspectives: ReportPerspectives::default(),
            recommendations: Vec::new(),
            conclusion: "Report generation failed".to_string(),
            credibility_score: 0.0,
            experts_consulted,
            methodology: default_methodology(),
        }
    }
}

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StartResearchRequest {
    pub topic: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StartResearchResponse {
    pub project_id: String,
    pub status: ProjectStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectDetail {
    pub project: Project,
    pub analysts: Vec<Analyst>,
    pub interviews: Vec<Interview>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InterventionAction {
    Approve,
    Modify,
    Stop,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InterventionRequest {
    pub action: InterventionAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InterventionResponse {
    pub project_id: String,
    pub status: ProjectStatus,
}

/// Read-only progress snapshot; always served best-effort, even for a
/// project mid-failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusSnapshot {
    pub status: ProjectStatus,
    pub analysts_created: u64,
    pub interviews_scheduled: u64,
    pub interviews_completed: u64,
    pub progress: f64,
    pub last_updated: DateTime<Utc>,
}

/// Completed interviews over scheduled interviews, as a percentage
/// clamped to 100. A project without interviews reports zero progress
/// rather than dividing by zero.
pub fn progress_percentage(completed: u64, total: u64) -> f64 {
    (completed as f64 / total.max(1) as f64 * 100.0).min(100.0)
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Database(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Generation(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Configuration(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
