//! Content generation boundary.
//!
//! Everything the workflow asks a language model for goes through the
//! [`ContentGenerator`] trait: analyst rosters, expert rosters, interview
//! questions and answers, credibility assessments, and the final report.
//! Implementations validate model output into the typed artifacts in
//! [`crate::types`] so downstream components never see malformed shapes.
//!
//! Failures surface as `AppError::Generation`; substituting fallbacks is
//! the caller's decision, made per call site by the workflow components.

mod generator;

pub use generator::LlmContentGenerator;

use crate::types::{
    AnalystProfile, CredibilityAssessment, ExpertProfile, FinalReport, InterviewInsights,
    InterviewResponse, Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The corpus handed to the report generation call: every completed
/// interview, the consulted experts, and the reviewer's notes if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportInput {
    pub topic: String,
    pub human_notes: Option<String>,
    pub aggregate_credibility: f64,
    pub experts_consulted: Vec<String>,
    pub interviews: Vec<InterviewSummary>,
}

/// One completed interview flattened for report synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewSummary {
    pub analyst: String,
    pub analyst_specialization: String,
    pub expert: String,
    pub expert_expertise: String,
    pub expert_credibility: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<InterviewInsights>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credibility_analysis: Option<CredibilityAssessment>,
    pub responses: Vec<InterviewResponse>,
}

/// Abstract capability producing structured research artifacts.
///
/// Constructed once at process start and injected into every component
/// that generates content; there is no ambient global client.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate a team of analysts for a topic. An empty roster is a
    /// valid result, not an error.
    async fn analyst_roster(&self, topic: &str, count: usize) -> Result<Vec<AnalystProfile>>;

    /// Generate candidate experts for one analyst's specialization.
    async fn expert_roster(&self, topic: &str, specialization: &str)
        -> Result<Vec<ExpertProfile>>;

    /// Generate interview questions (a handful; an empty list is valid).
    async fn interview_questions(
        &self,
        topic: &str,
        specialization: &str,
        expertise: &str,
    ) -> Result<Vec<String>>;

    /// Answer the questions in the expert's voice, with sources and
    /// misinformation flags per answer.
    async fn interview_answers(
        &self,
        topic: &str,
        expert_background: &str,
        questions: &[String],
    ) -> Result<Vec<InterviewResponse>>;

    /// Assess credibility over a full response set.
    async fn credibility_assessment(
        &self,
        topic: &str,
        responses: &[InterviewResponse],
    ) -> Result<CredibilityAssessment>;

    /// Produce the consolidated final report.
    async fn final_report(&self, input: &ReportInput) -> Result<FinalReport>;
}
