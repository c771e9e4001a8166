use crate::generation::{ContentGenerator, ReportInput};
use crate::llm::LLMClient;
use crate::types::{
    AnalystProfile, AppError, CredibilityAssessment, ExpertProfile, FinalReport,
    InterviewResponse, Result,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Content generator backed by an [`LLMClient`].
///
/// Prompts demand a single JSON object; the response is deserialized into
/// the typed artifact and scores are clamped into [0, 1] before anything
/// downstream sees them.
pub struct LlmContentGenerator {
    llm: Box<dyn LLMClient>,
}

impl LlmContentGenerator {
    pub fn new(llm: Box<dyn LLMClient>) -> Self {
        Self { llm }
    }

    async fn generate_payload<T: DeserializeOwned>(&self, prompt: &str, kind: &str) -> Result<T> {
        let raw = self.llm.generate_json(prompt).await?;
        parse_payload(&raw, kind)
    }
}

#[derive(Deserialize)]
struct AnalystRosterPayload {
    #[serde(default)]
    analysts: Vec<AnalystProfile>,
}

#[derive(Deserialize)]
struct ExpertRosterPayload {
    #[serde(default)]
    experts: Vec<ExpertProfile>,
}

#[derive(Deserialize)]
struct QuestionsPayload {
    #[serde(default)]
    questions: Vec<String>,
}

#[derive(Deserialize)]
struct ResponsesPayload {
    #[serde(default)]
    responses: Vec<InterviewResponse>,
}

#[async_trait]
impl ContentGenerator for LlmContentGenerator {
    async fn analyst_roster(&self, topic: &str, count: usize) -> Result<Vec<AnalystProfile>> {
        let prompt = format!(
            r#"Create a team of {count} news analysts to research the topic: "{topic}"

Each analyst should have a unique name, a specific specialization relevant
to the topic, and a research focus area. Provide diverse perspectives and
specializations that comprehensively cover the topic.

Respond with JSON in this format:
{{
    "analysts": [
        {{
            "name": "analyst name",
            "specialization": "specific area of expertise",
            "research_focus": "what aspects they will investigate"
        }}
    ]
}}"#
        );

        let payload: AnalystRosterPayload = self.generate_payload(&prompt, "analyst roster").await?;
        Ok(payload.analysts)
    }

    async fn expert_roster(
        &self,
        topic: &str,
        specialization: &str,
    ) -> Result<Vec<ExpertProfile>> {
        let prompt = format!(
            r#"For the research topic "{topic}" and analyst specialization
"{specialization}", create 2-3 experts who would have valuable insights.

Each expert needs a realistic name, an expertise area relevant to the
topic, a background description, and a credibility score (0.0 to 1.0).
Focus on experts from credible institutions, verified sources, and
established authorities.

Respond with JSON in this format:
{{
    "experts": [
        {{
            "name": "expert name",
            "expertise_area": "area of expertise",
            "background": "professional background and credentials",
            "credibility_score": 0.9
        }}
    ]
}}"#
        );

        let payload: ExpertRosterPayload = self.generate_payload(&prompt, "expert roster").await?;
        Ok(payload
            .experts
            .into_iter()
            .map(|mut expert| {
                expert.credibility_score = expert.credibility_score.clamp(0.0, 1.0);
                expert
            })
            .collect())
    }

    async fn interview_questions(
        &self,
        topic: &str,
        specialization: &str,
        expertise: &str,
    ) -> Result<Vec<String>> {
        let prompt = format!(
            r#"Generate 5-7 insightful interview questions for researching: "{topic}"

Context:
- Analyst specialization: {specialization}
- Expert expertise: {expertise}

Focus on fact verification and source credibility, identifying potential
misinformation, getting authoritative insights, understanding different
perspectives, and uncovering key facts and evidence.

Respond with JSON in this format:
{{
    "questions": [
        "question 1",
        "question 2",
        "..."
    ]
}}"#
        );

        let payload: QuestionsPayload = self
            .generate_payload(&prompt, "interview questions")
            .await?;
        Ok(payload.questions)
    }

    async fn interview_answers(
        &self,
        topic: &str,
        expert_background: &str,
        questions: &[String],
    ) -> Result<Vec<InterviewResponse>> {
        let questions_text = questions
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{}. {}", i + 1, q))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            r#"You are an expert with the following background: {expert_background}

You are being interviewed about the topic: "{topic}"

Provide detailed, authoritative responses to these questions:
{questions_text}

For each response: give factual, evidence-based answers, cite credible
sources when possible, flag any potential misinformation you are aware of,
and maintain your expertise perspective.

Respond with JSON in this format:
{{
    "responses": [
        {{
            "question": "the question",
            "answer": "detailed answer",
            "sources": ["source1", "source2"],
            "credibility_notes": "notes about information reliability",
            "misinformation_flags": ["any red flags identified"]
        }}
    ]
}}"#
        );

        let payload: ResponsesPayload = self
            .generate_payload(&prompt, "interview responses")
            .await?;
        Ok(payload.responses)
    }

    async fn credibility_assessment(
        &self,
        topic: &str,
        responses: &[InterviewResponse],
    ) -> Result<CredibilityAssessment> {
        let responses_text = serde_json::to_string_pretty(responses)
            .map_err(|e| AppError::Generation(format!("Failed to encode responses: {}", e)))?;

        let prompt = format!(
            r#"Analyze the credibility of these interview responses about "{topic}":

{responses_text}

Assess source reliability and verification, fact-checking against known
information, potential bias or misinformation, consistency across
responses, and red flags for fake news.

Respond with JSON in this format:
{{
    "overall_credibility": 0.85,
    "credibility_assessment": "detailed assessment",
    "fake_news_indicators": ["list of potential issues"],
    "verified_facts": ["list of verified information"],
    "recommendations": ["recommendations for further verification"]
}}"#
        );

        let mut assessment: CredibilityAssessment = self
            .generate_payload(&prompt, "credibility assessment")
            .await?;
        assessment.overall_credibility = assessment.overall_credibility.clamp(0.0, 1.0);
        Ok(assessment)
    }

    async fn final_report(&self, input: &ReportInput) -> Result<FinalReport> {
        let interviews_text = serde_json::to_string_pretty(&input.interviews)
            .map_err(|e| AppError::Generation(format!("Failed to encode interviews: {}", e)))?;
        let experts_text = input.experts_consulted.join("\n");
        let notes_text = input
            .human_notes
            .as_deref()
            .map(|notes| format!("\n\nReviewer instructions: {}", notes))
            .unwrap_or_default();

        let prompt = format!(
            r#"Create a comprehensive research report on: "{topic}"

Based on the following analyst-expert interviews:
{interviews_text}{notes_text}

Experts consulted:
{experts_text}

The report must include an executive summary, key findings, verified
facts vs. potential misinformation, source credibility analysis, multiple
perspectives, recommendations, and a conclusion. Focus on factual
accuracy, source verification, and identification of fake news or
misinformation.

Respond with JSON in this format:
{{
    "executive_summary": "brief but complete executive summary",
    "key_findings": ["finding 1", "finding 2", "..."],
    "verified_facts": ["verified fact 1", "..."],
    "potential_misinformation": ["concern 1", "..."],
    "source_analysis": "detailed analysis of source credibility",
    "perspectives": {{
        "political_perspective": "political and governmental perspective",
        "economic_perspective": "economic and fiscal perspective",
        "international_perspective": "international and trade perspective"
    }},
    "recommendations": ["recommendation 1", "..."],
    "conclusion": "detailed final conclusion",
    "credibility_score": {aggregate:.2},
    "experts_consulted": {expert_count},
    "methodology": "Multi-agent analysis with parallel interviews and source verification"
}}"#,
            topic = input.topic,
            aggregate = input.aggregate_credibility,
            expert_count = input.experts_consulted.len(),
        );

        let mut report: FinalReport = self.generate_payload(&prompt, "final report").await?;
        report.credibility_score = report.credibility_score.clamp(0.0, 1.0);
        Ok(report)
    }
}

/// Deserialize a model response into `T`, tolerating markdown fencing.
fn parse_payload<T: DeserializeOwned>(raw: &str, kind: &str) -> Result<T> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(AppError::Generation(format!("Empty {} response", kind)));
    }
    serde_json::from_str(cleaned)
        .map_err(|e| AppError::Generation(format!("Unparseable {} response: {}", kind, e)))
}

/// Some models wrap JSON in ``` fences even when told not to.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
