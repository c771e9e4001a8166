//! Mock implementations for testing.
//!
//! A scripted content generator that can be used across test files
//! without duplication. Every failure mode the workflow has to absorb is
//! one `failing_*` constructor away.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use verity::generation::{ContentGenerator, ReportInput};
use verity::types::{
    AnalystProfile, AppError, CredibilityAssessment, ExpertProfile, FinalReport,
    InterviewResponse, ReportPerspectives, Result,
};

/// Scripted content generator.
///
/// Produces a fixed number of analysts and experts-per-analyst, with
/// deterministic names so tests can assert attribution. Individual
/// stages can be switched to fail.
#[derive(Clone)]
pub struct MockGenerator {
    analysts: usize,
    experts_per_analyst: usize,
    credibility: f64,
    shared_experts: bool,
    fail_analyst_roster: bool,
    fail_expert_roster_for: Option<String>,
    fail_answers: bool,
    fail_assessment: bool,
    fail_report: bool,
    report_calls: Arc<AtomicUsize>,
}

impl MockGenerator {
    pub fn new(analysts: usize, experts_per_analyst: usize) -> Self {
        Self {
            analysts,
            experts_per_analyst,
            credibility: 0.9,
            shared_experts: false,
            fail_analyst_roster: false,
            fail_expert_roster_for: None,
            fail_answers: false,
            fail_assessment: false,
            fail_report: false,
            report_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every analyst proposes the same expert pool, exercising the
    /// get-or-create convergence path.
    pub fn with_shared_experts(mut self) -> Self {
        self.shared_experts = true;
        self
    }

    pub fn with_credibility(mut self, credibility: f64) -> Self {
        self.credibility = credibility;
        self
    }

    pub fn failing_analyst_roster(mut self) -> Self {
        self.fail_analyst_roster = true;
        self
    }

    /// Fail expert roster generation for analysts whose specialization
    /// contains the given fragment; other analysts are unaffected.
    pub fn failing_expert_roster_for(mut self, specialization_fragment: &str) -> Self {
        self.fail_expert_roster_for = Some(specialization_fragment.to_string());
        self
    }

    pub fn failing_answers(mut self) -> Self {
        self.fail_answers = true;
        self
    }

    pub fn failing_assessment(mut self) -> Self {
        self.fail_assessment = true;
        self
    }

    pub fn failing_report(mut self) -> Self {
        self.fail_report = true;
        self
    }

    /// How many times the final report was requested.
    pub fn report_calls(&self) -> usize {
        self.report_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for MockGenerator {
    async fn analyst_roster(&self, _topic: &str, _count: usize) -> Result<Vec<AnalystProfile>> {
        if self.fail_analyst_roster {
            return Err(AppError::Generation("mock analyst roster failure".to_string()));
        }

        Ok((0..self.analysts)
            .map(|i| AnalystProfile {
                name: format!("Analyst {}", i),
                specialization: format!("Specialization {}", i),
                research_focus: format!("Focus area {}", i),
            })
            .collect())
    }

    async fn expert_roster(
        &self,
        _topic: &str,
        specialization: &str,
    ) -> Result<Vec<ExpertProfile>> {
        if let Some(fragment) = &self.fail_expert_roster_for {
            if specialization.contains(fragment.as_str()) {
                return Err(AppError::Generation(format!(
                    "mock expert roster failure for {}",
                    specialization
                )));
            }
        }

        Ok((0..self.experts_per_analyst)
            .map(|j| {
                let name = if self.shared_experts {
                    format!("Shared Expert {}", j)
                } else {
                    format!("{} Expert {}", specialization, j)
                };
                ExpertProfile {
                    name,
                    expertise_area: if self.shared_experts {
                        format!("Shared Area {}", j)
                    } else {
                        specialization.to_string()
                    },
                    background: "Decorated veteran of the field".to_string(),
                    credibility_score: 0.85,
                }
            })
            .collect())
    }

    async fn interview_questions(
        &self,
        topic: &str,
        _specialization: &str,
        _expertise: &str,
    ) -> Result<Vec<String>> {
        Ok(vec![
            format!("What is the strongest evidence about {}?", topic),
            "Which sources corroborate the central claims?".to_string(),
        ])
    }

    async fn interview_answers(
        &self,
        _topic: &str,
        _expert_background: &str,
        questions: &[String],
    ) -> Result<Vec<InterviewResponse>> {
        if self.fail_answers {
            return Err(AppError::Generation("mock interview failure".to_string()));
        }

        Ok(questions
            .iter()
            .map(|question| InterviewResponse {
                question: question.clone(),
                answer: format!("Detailed answer to: {}", question),
                sources: vec!["Reuters".to_string()],
                credibility_notes: "Corroborated by wire reporting".to_string(),
                misinformation_flags: vec![],
            })
            .collect())
    }

    async fn credibility_assessment(
        &self,
        _topic: &str,
        _responses: &[InterviewResponse],
    ) -> Result<CredibilityAssessment> {
        if self.fail_assessment {
            return Err(AppError::Generation("mock assessment failure".to_string()));
        }

        Ok(CredibilityAssessment {
            overall_credibility: self.credibility,
            credibility_assessment: "Consistent and well sourced".to_string(),
            fake_news_indicators: vec![],
            verified_facts: vec!["Core claim confirmed".to_string()],
            recommendations: vec![],
        })
    }

    async fn final_report(&self, input: &ReportInput) -> Result<FinalReport> {
        self.report_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_report {
            return Err(AppError::Generation("mock report failure".to_string()));
        }

        Ok(FinalReport {
            executive_summary: format!("Findings on {}", input.topic),
            key_findings: vec!["Finding one".to_string()],
            verified_facts: vec!["Core claim confirmed".to_string()],
            potential_misinformation: vec![],
            source_analysis: "Sources were largely verified outlets".to_string(),
            perspectives: ReportPerspectives::default(),
            recommendations: vec!["Continue monitoring".to_string()],
            conclusion: "Topic coverage is broadly accurate".to_string(),
            credibility_score: input.aggregate_credibility,
            experts_consulted: input.experts_consulted.len(),
            methodology: "Multi-agent analysis with parallel interviews and source verification"
                .to_string(),
        })
    }
}
