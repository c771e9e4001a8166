use crate::db::ProjectStore;
use crate::types::{AppError, ProjectStatus, Result};
use std::sync::Arc;
use std::time::Duration;

/// The bounded-wait human checkpoint between interviewing and
/// finalization.
///
/// The triggering actor is an external human writing directly to the
/// store, so the gate polls rather than waiting on a notification. It
/// only ever reads: on timeout it returns control to the orchestrator,
/// which owns the forced transition to `completed`. A status write racing
/// the poll loop is fine; the last write before a check wins, and any
/// non-`reviewing` status means exit.
pub struct ReviewGate {
    store: Arc<ProjectStore>,
    poll_interval: Duration,
    timeout: Duration,
}

impl ReviewGate {
    pub fn new(store: Arc<ProjectStore>, poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            store,
            poll_interval,
            timeout,
        }
    }

    /// Block the calling task until the project leaves `reviewing` or the
    /// review window elapses. Timeout is a normal outcome, not an error.
    pub async fn wait(&self, project_id: &str) -> Result<()> {
        let deadline = tokio::time::Instant::now() + self.timeout;

        loop {
            let project = self
                .store
                .get_project(project_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Project {}", project_id)))?;

            if project.status != ProjectStatus::Reviewing {
                tracing::info!(project_id, status = %project.status, "review resolved externally");
                return Ok(());
            }

            if tokio::time::Instant::now() >= deadline {
                tracing::info!(project_id, "review window elapsed, continuing automatically");
                return Ok(());
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
