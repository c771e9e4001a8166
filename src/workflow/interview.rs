use crate::db::ProjectStore;
use crate::generation::ContentGenerator;
use crate::types::{
    AppError, CredibilityAssessment, InterviewInsights, InterviewStatus, Result,
};
use std::sync::Arc;

/// Runs one analyst-expert interview end to end.
///
/// Each run owns its interview row exclusively; the caller never
/// schedules the same interview id twice. A run is idempotent on retry
/// but not concurrency-safe for the same id.
pub struct InterviewExecutor {
    store: Arc<ProjectStore>,
    generator: Arc<dyn ContentGenerator>,
}

impl InterviewExecutor {
    pub fn new(store: Arc<ProjectStore>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self { store, generator }
    }

    /// Execute the interview, absorbing failures: an errored interview is
    /// marked `error` and counts as a finished unit of work, so sibling
    /// interviews and the analyst worker keep going.
    pub async fn run(&self, interview_id: &str) {
        if let Err(e) = self.execute(interview_id).await {
            tracing::error!(interview_id, error = %e, "interview failed");
            if let Err(db_err) = self
                .store
                .update_interview_status(interview_id, InterviewStatus::Error)
                .await
            {
                tracing::error!(interview_id, error = %db_err, "failed to mark interview errored");
            }
        }
    }

    async fn execute(&self, interview_id: &str) -> Result<()> {
        let interview = self
            .store
            .get_interview(interview_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Interview {}", interview_id)))?;
        let project = self
            .store
            .get_project(&interview.project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {}", interview.project_id)))?;
        let analyst = self
            .store
            .get_analyst(&interview.analyst_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Analyst {}", interview.analyst_id)))?;
        let expert = self
            .store
            .get_expert(&interview.expert_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Expert {}", interview.expert_id)))?;

        // Persist in_progress before any generation so a crash mid-run is
        // observable as a stalled interview, not a silently lost one.
        self.store
            .update_interview_status(interview_id, InterviewStatus::InProgress)
            .await?;

        // Empty questions or responses are valid degenerate results; only
        // a generation error aborts the interview.
        let questions = self
            .generator
            .interview_questions(
                &project.topic,
                &analyst.specialization,
                &expert.expertise_area,
            )
            .await?;

        let responses = self
            .generator
            .interview_answers(&project.topic, &expert.background, &questions)
            .await?;

        // Credibility assessment must never abort an interview.
        let assessment = match self
            .generator
            .credibility_assessment(&project.topic, &responses)
            .await
        {
            Ok(assessment) => assessment,
            Err(e) => {
                tracing::warn!(interview_id, error = %e, "credibility assessment failed, using fallback");
                CredibilityAssessment::fallback()
            }
        };

        let insights = InterviewInsights::from_responses(&responses);

        let questions_json = encode(&questions)?;
        let responses_json = encode(&responses)?;
        let insights_json = encode(&insights)?;
        let assessment_json = encode(&assessment)?;
        let flags_json = encode(&assessment.fake_news_indicators)?;

        self.store
            .complete_interview(
                interview_id,
                &questions_json,
                &responses_json,
                &insights_json,
                &assessment_json,
                &flags_json,
            )
            .await?;

        tracing::info!(
            interview_id,
            questions = questions.len(),
            responses = responses.len(),
            "interview completed"
        );
        Ok(())
    }
}

fn encode<T: serde::Serialize>(artifact: &T) -> Result<String> {
    serde_json::to_string(artifact)
        .map_err(|e| AppError::Internal(format!("Failed to encode interview artifact: {}", e)))
}
