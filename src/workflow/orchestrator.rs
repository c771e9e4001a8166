use crate::db::ProjectStore;
use crate::generation::ContentGenerator;
use crate::types::{AppError, ProjectStatus, Result};
use crate::utils::config::WorkflowConfig;
use crate::workflow::analyst::AnalystWorker;
use crate::workflow::report::ReportCompiler;
use crate::workflow::review::ReviewGate;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Owns the project state machine and sequences the whole pipeline:
/// analyst generation, the parallel interview phase, the review
/// checkpoint, and report compilation.
pub struct WorkflowOrchestrator {
    store: Arc<ProjectStore>,
    generator: Arc<dyn ContentGenerator>,
    workflow: WorkflowConfig,
}

impl WorkflowOrchestrator {
    pub fn new(
        store: Arc<ProjectStore>,
        generator: Arc<dyn ContentGenerator>,
        workflow: WorkflowConfig,
    ) -> Self {
        Self {
            store,
            generator,
            workflow,
        }
    }

    /// Entry point for queue workers. Any fatal fault lands the project
    /// in the terminal `error` status; the pipeline never leaves a
    /// project hanging in an intermediate state.
    pub async fn run(&self, project_id: &str) {
        tracing::info!(project_id, "starting research workflow");
        if let Err(e) = self.execute(project_id).await {
            tracing::error!(project_id, error = %e, "research workflow failed");
            if let Err(db_err) = self
                .store
                .update_project_status(project_id, ProjectStatus::Error)
                .await
            {
                tracing::error!(project_id, error = %db_err, "failed to record error status");
            }
        }
    }

    async fn execute(&self, project_id: &str) -> Result<()> {
        let project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;

        // created -> analyzing. A roster failure here is fatal to the
        // whole workflow; an empty roster is not.
        self.store
            .update_project_status(project_id, ProjectStatus::Analyzing)
            .await?;
        let roster = self
            .generator
            .analyst_roster(&project.topic, self.workflow.analyst_count)
            .await?;

        let mut analysts = Vec::with_capacity(roster.len());
        for profile in &roster {
            analysts.push(self.store.create_analyst(project_id, profile).await?);
        }
        tracing::info!(project_id, count = analysts.len(), "analyst team created");

        // analyzing -> interviewing: one concurrent task per analyst,
        // then a barrier. Workers absorb their own failures, so the join
        // is unconditional and the review phase always sees a settled set
        // of interview outcomes.
        self.store
            .update_project_status(project_id, ProjectStatus::Interviewing)
            .await?;

        let mut tasks = JoinSet::new();
        for analyst in &analysts {
            let worker = AnalystWorker::new(Arc::clone(&self.store), Arc::clone(&self.generator));
            let project_id = project_id.to_string();
            let analyst_id = analyst.id.clone();
            tasks.spawn(async move { worker.run(&project_id, &analyst_id).await });
        }
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(project_id, error = %e, "analyst task aborted");
            }
        }

        // interviewing -> reviewing, regardless of how many interviews
        // succeeded.
        self.store
            .update_project_status(project_id, ProjectStatus::Reviewing)
            .await?;

        let gate = ReviewGate::new(
            Arc::clone(&self.store),
            self.workflow.review_poll_interval(),
            self.workflow.review_timeout(),
        );
        gate.wait(project_id).await?;

        let project = self
            .store
            .get_project(project_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;
        if project.status == ProjectStatus::Stopped {
            tracing::info!(project_id, "research stopped during review, skipping report");
            return Ok(());
        }

        // Approval and timeout both end with a compiled report; the
        // compiler performs the terminal completed write.
        let compiler = ReportCompiler::new(Arc::clone(&self.store), Arc::clone(&self.generator));
        compiler.compile(project_id).await?;

        tracing::info!(project_id, "research workflow completed");
        Ok(())
    }
}
