//! The research workflow engine.
//!
//! A project moves through
//! `created -> analyzing -> interviewing -> reviewing -> {completed|stopped|error}`.
//! The [`orchestrator::WorkflowOrchestrator`] owns that state machine and
//! fans out one [`analyst::AnalystWorker`] task per analyst; each worker
//! runs its interviews sequentially through the
//! [`interview::InterviewExecutor`]. After an unconditional join the
//! [`review::ReviewGate`] holds the project open for human intervention,
//! and the [`report::ReportCompiler`] produces the terminal artifact.
//! [`queue::WorkflowQueue`] is the submission API the web layer uses.

pub mod analyst;
pub mod interview;
pub mod orchestrator;
pub mod queue;
pub mod report;
pub mod review;

pub use orchestrator::WorkflowOrchestrator;
pub use queue::WorkflowQueue;
