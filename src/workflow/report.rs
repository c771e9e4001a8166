use crate::db::ProjectStore;
use crate::generation::{ContentGenerator, InterviewSummary, ReportInput};
use crate::types::{
    AppError, CredibilityAssessment, FinalReport, InterviewInsights, InterviewResponse, Result,
};
use std::sync::Arc;

/// Aggregate score used when no interview produced a parseable
/// credibility assessment.
pub const FALLBACK_AGGREGATE_CREDIBILITY: f64 = 0.8;

/// Aggregates all completed interviews plus reviewer notes into the
/// final report artifact, and performs the terminal `completed` write.
///
/// Compilation never fails a project: a generator fault or an empty
/// interview corpus both end in a persisted degenerate report.
pub struct ReportCompiler {
    store: Arc<ProjectStore>,
    generator: Arc<dyn ContentGenerator>,
}

impl ReportCompiler {
    pub fn new(store: Arc<ProjectStore>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self { store, generator }
    }

    /// Compile and persist the final report, marking the project
    /// completed. Returns `None` when the project had no completed
    /// interviews; the degenerate report is persisted even then, so a
    /// completed project always carries a report.
    pub async fn compile(&self, project_id: &str) -> Result<Option<FinalReport>> {
        let project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;

        let interviews = self.store.list_completed_interviews(project_id).await?;
        if interviews.is_empty() {
            tracing::warn!(project_id, "no completed interviews, storing degenerate report");
            let report = FinalReport::degenerate(0);
            self.store
                .complete_project_with_report(project_id, &encode(&report)?)
                .await?;
            return Ok(None);
        }

        let mut summaries = Vec::with_capacity(interviews.len());
        let mut experts_consulted = Vec::new();
        let mut scores = Vec::new();

        for interview in &interviews {
            let analyst = self.store.get_analyst(&interview.analyst_id).await?;
            let expert = self.store.get_expert(&interview.expert_id).await?;

            let insights: Option<InterviewInsights> = interview
                .insights
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok());
            let assessment: Option<CredibilityAssessment> = interview
                .credibility_assessment
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok());
            let responses: Vec<InterviewResponse> = interview
                .responses
                .as_deref()
                .and_then(|raw| serde_json::from_str(raw).ok())
                .unwrap_or_default();

            // Only parseable scores enter the aggregate.
            if let Some(assessment) = &assessment {
                scores.push(assessment.overall_credibility);
            }

            let (analyst_name, analyst_specialization) = match &analyst {
                Some(a) => (a.name.clone(), a.specialization.clone()),
                None => ("Unknown".to_string(), "Unknown".to_string()),
            };
            let (expert_name, expert_expertise, expert_credibility) = match &expert {
                Some(e) => (e.name.clone(), e.expertise_area.clone(), e.credibility_score),
                None => ("Unknown".to_string(), "Unknown".to_string(), 0.5),
            };

            if let Some(e) = &expert {
                experts_consulted.push(format!(
                    "{} - {} (credibility: {:.2})",
                    e.name, e.expertise_area, e.credibility_score
                ));
            }

            summaries.push(InterviewSummary {
                analyst: analyst_name,
                analyst_specialization,
                expert: expert_name,
                expert_expertise,
                expert_credibility,
                insights,
                credibility_analysis: assessment,
                responses,
            });
        }

        let input = ReportInput {
            topic: project.topic.clone(),
            human_notes: project.human_notes.clone(),
            aggregate_credibility: aggregate_credibility(&scores),
            experts_consulted,
            interviews: summaries,
        };

        tracing::info!(
            project_id,
            interviews = interviews.len(),
            aggregate = input.aggregate_credibility,
            "compiling final report"
        );

        let report = match self.generator.final_report(&input).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(project_id, error = %e, "report generation failed, storing degenerate report");
                FinalReport::degenerate(input.experts_consulted.len())
            }
        };

        self.store
            .complete_project_with_report(project_id, &encode(&report)?)
            .await?;

        Ok(Some(report))
    }
}

/// Arithmetic mean of the parseable per-interview scores, with a fixed
/// fallback when none parsed. Always lands in [0, 1].
pub(crate) fn aggregate_credibility(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return FALLBACK_AGGREGATE_CREDIBILITY;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    mean.clamp(0.0, 1.0)
}

fn encode(report: &FinalReport) -> Result<String> {
    serde_json::to_string(report)
        .map_err(|e| AppError::Internal(format!("Failed to encode final report: {}", e)))
}
