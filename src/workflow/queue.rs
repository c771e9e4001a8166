use crate::types::{AppError, Result};
use crate::workflow::orchestrator::WorkflowOrchestrator;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// Submission API for research workflows.
///
/// The web layer enqueues a project id and returns immediately; a fixed
/// pool of worker tasks drains the queue and runs one orchestration at a
/// time each. This decouples request latency from workflow duration and
/// bounds how many projects run concurrently.
pub struct WorkflowQueue {
    tx: mpsc::Sender<WorkflowJob>,
}

#[derive(Debug)]
struct WorkflowJob {
    project_id: String,
}

impl WorkflowQueue {
    /// Spawn the worker pool and return the submission handle.
    pub fn start(orchestrator: Arc<WorkflowOrchestrator>, workers: usize, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel::<WorkflowJob>(capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));

        for worker_id in 0..workers.max(1) {
            let rx = Arc::clone(&rx);
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move {
                loop {
                    // Hold the lock only while receiving, so other
                    // workers can pick up jobs during long workflows.
                    let job = { rx.lock().await.recv().await };
                    match job {
                        Some(job) => {
                            tracing::debug!(worker_id, project_id = %job.project_id, "workflow job picked up");
                            orchestrator.run(&job.project_id).await;
                        }
                        None => break,
                    }
                }
            });
        }

        Self { tx }
    }

    /// Enqueue a workflow start; applies backpressure when the queue is
    /// full.
    pub async fn submit(&self, project_id: &str) -> Result<()> {
        self.tx
            .send(WorkflowJob {
                project_id: project_id.to_string(),
            })
            .await
            .map_err(|_| AppError::Internal("Workflow queue is closed".to_string()))
    }
}
