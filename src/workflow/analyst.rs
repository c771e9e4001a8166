use crate::db::ProjectStore;
use crate::generation::ContentGenerator;
use crate::types::{AnalystStatus, AppError, Result};
use crate::workflow::interview::InterviewExecutor;
use std::sync::Arc;

/// Drives all interviews for one analyst.
///
/// Workers run concurrently across analysts, but each worker executes
/// its own interviews back to back. A failure here terminates this
/// worker only; it logs and returns so the orchestrator's join always
/// completes structurally.
pub struct AnalystWorker {
    store: Arc<ProjectStore>,
    generator: Arc<dyn ContentGenerator>,
}

impl AnalystWorker {
    pub fn new(store: Arc<ProjectStore>, generator: Arc<dyn ContentGenerator>) -> Self {
        Self { store, generator }
    }

    pub async fn run(&self, project_id: &str, analyst_id: &str) {
        if let Err(e) = self.execute(project_id, analyst_id).await {
            // The analyst keeps its last-known status; it is not forced
            // to completed.
            tracing::error!(project_id, analyst_id, error = %e, "analyst worker aborted");
        }
    }

    async fn execute(&self, project_id: &str, analyst_id: &str) -> Result<()> {
        let analyst = self
            .store
            .get_analyst(analyst_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Analyst {}", analyst_id)))?;
        let project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;

        tracing::info!(project_id, analyst = %analyst.name, "starting interviews");
        self.store
            .update_analyst_status(analyst_id, AnalystStatus::Researching)
            .await?;

        // A roster failure aborts this analyst's run and nothing else.
        let roster = self
            .generator
            .expert_roster(&project.topic, &analyst.specialization)
            .await?;

        let executor = InterviewExecutor::new(Arc::clone(&self.store), Arc::clone(&self.generator));
        for profile in &roster {
            let expert = self.store.get_or_create_expert(profile).await?;
            let interview = self
                .store
                .create_interview(project_id, analyst_id, &expert.id)
                .await?;
            // Created immediately before its single execution, which is
            // what keeps every interview id to at most one run.
            executor.run(&interview.id).await;
        }

        self.store
            .update_analyst_status(analyst_id, AnalystStatus::Completed)
            .await?;
        tracing::info!(project_id, analyst = %analyst.name, experts = roster.len(), "analyst finished");

        Ok(())
    }
}
