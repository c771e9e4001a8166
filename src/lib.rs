//! # VERITY - Multi-Agent News Research Server
//!
//! A research orchestration server for news analysis and misinformation
//! detection. Given a topic, VERITY generates a team of analyst
//! personas, runs their expert interviews in parallel, pauses at a
//! bounded human review checkpoint, and compiles a credibility-scored
//! final report.
//!
//! ## Overview
//!
//! VERITY can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `verity-server` binary
//! 2. **As a library** - Import components into your own Rust project
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use verity::db::ProjectStore;
//! use verity::generation::LlmContentGenerator;
//! use verity::llm::Provider;
//! use verity::utils::Config;
//! use verity::workflow::WorkflowOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let store = Arc::new(ProjectStore::new_local(&config.database.path).await?);
//!
//!     let provider = Provider::from_config(&config.llm)?;
//!     let generator = Arc::new(LlmContentGenerator::new(provider.create_client().await?));
//!
//!     let orchestrator =
//!         WorkflowOrchestrator::new(store.clone(), generator, config.workflow.clone());
//!     let project = store.create_project("electric grid misinformation").await?;
//!     orchestrator.run(&project.id).await;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Workflow
//!
//! A project advances through
//! `created -> analyzing -> interviewing -> reviewing -> {completed|stopped|error}`.
//! The interviewing phase fans out one task per analyst and joins all of
//! them before review, so the human checkpoint and the report always see
//! a settled set of interview outcomes.
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`db`] - Project store (libsql)
//! - [`generation`] - Content generation boundary
//! - [`llm`] - LLM provider clients
//! - [`sources`] - Credible source directory
//! - [`workflow`] - Workflow orchestration engine
//! - [`types`] - Common types and error handling

#![warn(missing_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Durable store for projects, analysts, experts, and interviews.
pub mod db;
/// Content generation boundary (analyst rosters, interviews, reports).
pub mod generation;
/// LLM provider clients and abstractions.
pub mod llm;
/// Curated credible source directory.
pub mod sources;
/// Core types (records, artifacts, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;
/// Workflow orchestration engine.
pub mod workflow;

// Re-export commonly used types
pub use db::ProjectStore;
pub use generation::{ContentGenerator, LlmContentGenerator};
pub use llm::{LLMClient, Provider};
pub use types::{AppError, Result};
pub use utils::Config;
pub use workflow::{WorkflowOrchestrator, WorkflowQueue};

use sources::SourceDirectory;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Environment-derived configuration.
    pub config: Arc<Config>,
    /// Project store.
    pub store: Arc<ProjectStore>,
    /// Workflow submission queue.
    pub queue: Arc<WorkflowQueue>,
    /// Credible source directory.
    pub sources: Arc<SourceDirectory>,
}
