use serde::Deserialize;
use serde_json::json;

use super::attributes::UserAttributes;
use crate::catalog::GoverningAttribute;
use super::backend::{parse_reply, BackendError};
use super::classification::{ClassificationResult, IssueType, Urgency};
use super::eligibility::Verdict;
use super::response::SchemeAssessment;
use super::strategy::{Resolved, StrategySelector};

const ELIGIBLE_STEPS_SHOWN: usize = 3;
const MISSING_SHOWN: usize = 2;
const SUGGESTIONS_SHOWN: usize = 2;

/// Everything the narrative is built from.
#[derive(Debug, Clone, Copy)]
pub struct ExplanationInput<'a> {
    pub classification: &'a ClassificationResult,
    pub assessments: &'a [SchemeAssessment],
    pub attributes: &'a UserAttributes,
}

fn bullets(lines: &mut Vec<String>, items: &[String], limit: usize) {
    for item in items.iter().take(limit) {
        lines.push(format!("    - {item}"));
    }
}

fn greeting(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::High => "Assalam-o-Alaikum! Main aapki urgent madad kar raha hun. (I am prioritising your urgent request.)",
        Urgency::Medium | Urgency::Low => {
            "Assalam-o-Alaikum! Main aapki madad kar raha hun. (I am here to help you.)"
        }
    }
}

fn income_bracket(income: u32) -> (&'static str, &'static str) {
    match income {
        0..=20_000 => (
            "Low income: multiple schemes available",
            "Priority: emergency cash, BISP, health cards",
        ),
        20_001..=30_000 => (
            "Moderate income: several schemes available",
            "Priority: education grants, health insurance",
        ),
        30_001..=50_000 => (
            "Higher income: limited schemes available",
            "Priority: housing loans, education initiatives",
        ),
        _ => (
            "High income: very limited schemes",
            "Priority: housing schemes, business loans",
        ),
    }
}

fn assessment_section(lines: &mut Vec<String>, assessment: &SchemeAssessment) {
    let verdict = &assessment.eligibility;
    match verdict.verdict {
        Verdict::Eligible => {
            lines.push(format!("  [ELIGIBLE] {}", assessment.scheme));
            lines.push(format!("    Reason: {}", verdict.summary()));
            if !verdict.next_steps.is_empty() {
                lines.push("    Next steps:".to_string());
                bullets(lines, &verdict.next_steps, ELIGIBLE_STEPS_SHOWN);
            }
        }
        Verdict::Ineligible | Verdict::Indeterminate => {
            let tag = if verdict.verdict == Verdict::Ineligible {
                "NOT ELIGIBLE"
            } else {
                "MORE INFO NEEDED"
            };
            lines.push(format!("  [{tag}] {}", assessment.scheme));
            lines.push(format!("    Reason: {}", verdict.summary()));
            if !verdict.missing_requirements.is_empty() {
                let heading = if verdict.verdict == Verdict::Ineligible {
                    "    Missing requirements:"
                } else {
                    "    Information still needed:"
                };
                lines.push(heading.to_string());
                bullets(lines, &verdict.missing_requirements, MISSING_SHOWN);
            }
            if !verdict.next_steps.is_empty() {
                lines.push("    Suggestions:".to_string());
                bullets(lines, &verdict.next_steps, SUGGESTIONS_SHOWN);
            }
        }
    }
}

/// Deterministic narrative. Identical input always renders identical text.
pub fn render_narrative(input: &ExplanationInput<'_>) -> String {
    let classification = input.classification;
    let mut lines: Vec<String> = Vec::new();

    lines.push(greeting(classification.urgency).to_string());
    lines.push(String::new());

    if classification.issue_type == IssueType::General {
        lines.push(
            "Main aapke issue ko samjha hun aur aapke liye best options dhund raha hun.".to_string(),
        );
    } else {
        lines.push(format!(
            "Aapka issue {} category mein aata hai.",
            classification.issue_type.label()
        ));
    }
    if !classification.detected_needs.is_empty() {
        lines.push("Detected needs:".to_string());
        for need in &classification.detected_needs {
            lines.push(format!("  - {}", need.describe()));
        }
    }
    lines.push(String::new());

    if !classification.relevant_schemes.is_empty() {
        lines.push("Aapke liye ye schemes suitable hain:".to_string());
        for (index, scheme) in classification.relevant_schemes.iter().enumerate() {
            lines.push(format!("  {}. {scheme}", index + 1));
        }
        lines.push(String::new());
    }

    let eligible_count = input
        .assessments
        .iter()
        .filter(|assessment| assessment.eligibility.is_eligible())
        .count();
    if !input.assessments.is_empty() {
        lines.push(format!(
            "Eligibility check results ({eligible_count}/{} eligible):",
            input.assessments.len()
        ));
        for assessment in input.assessments {
            assessment_section(&mut lines, assessment);
        }
        lines.push(String::new());
    }

    if let Some(income) = input.attributes.value_of(GoverningAttribute::MonthlyIncome) {
        let (bracket, priority) = income_bracket(income);
        lines.push("Aapki financial analysis:".to_string());
        lines.push(format!("  {bracket}"));
        lines.push(format!("  {priority}"));
        lines.push(String::new());
    }

    if let Some(location) = &input.attributes.location {
        lines.push(format!("Location: {location}"));
        lines.push("  Visit your local government office".to_string());
        lines.push("  Contact local helpline numbers".to_string());
        lines.push(String::new());
    }

    lines.push("Immediate action steps:".to_string());
    lines.push("  1. Gather required documents".to_string());
    lines.push("  2. Visit official websites".to_string());
    lines.push("  3. Call helpline numbers".to_string());
    lines.push("  4. Visit local government office".to_string());
    lines.push(String::new());

    if eligible_count > 0 {
        lines.push("Good news! Aap kuch schemes ke liye eligible hain.".to_string());
        lines.push("Contact the helpline for detailed guidance.".to_string());
    } else {
        lines.push("Don't worry! Other options are available.".to_string());
        lines.push("Contact the helpline for alternative solutions.".to_string());
    }
    lines.push(String::new());
    lines.push("Allah aapki madad kare! (May Allah help you!)".to_string());

    lines.join("\n")
}

fn explanation_digest(input: &ExplanationInput<'_>) -> String {
    let results: Vec<_> = input
        .assessments
        .iter()
        .map(|assessment| {
            json!({
                "scheme": assessment.scheme,
                "verdict": assessment.eligibility.verdict,
                "reasons": assessment.eligibility.reasons,
                "missing_requirements": assessment.eligibility.missing_requirements,
                "next_steps": assessment.eligibility.next_steps,
            })
        })
        .collect();

    json!({
        "issue_type": input.classification.issue_type,
        "urgency": input.classification.urgency,
        "detected_needs": input.classification.detected_needs,
        "relevant_schemes": input.classification.relevant_schemes,
        "eligibility_results": results,
        "user_info": input.attributes,
    })
    .to_string()
}

fn explanation_prompt(input: &ExplanationInput<'_>) -> String {
    format!(
        r#"You are a friendly government services assistant in Pakistan. Explain the assessment below to the citizen in simple language, mixing Roman Urdu and English.
Cover the schemes that fit, why they are or are not eligible, what information is missing, and what to do next. Do not change any eligibility outcome.

Assessment: {digest}

Respond with a single JSON object and nothing else:
{{"explanation": "..."}}"#,
        digest = explanation_digest(input)
    )
}

#[derive(Debug, Deserialize)]
struct ExplanationReply {
    explanation: String,
}

fn accept_reply(reply: ExplanationReply) -> Result<String, BackendError> {
    let text = reply.explanation.trim();
    if text.is_empty() {
        return Err(BackendError::Malformed("empty explanation".to_string()));
    }
    Ok(text.to_string())
}

/// Turns pipeline results into one citizen-facing narrative.
#[derive(Debug, Clone, Default)]
pub struct ExplanationAgent {
    strategy: StrategySelector,
}

impl ExplanationAgent {
    pub fn new(strategy: StrategySelector) -> Self {
        Self { strategy }
    }

    pub async fn explain(&self, input: &ExplanationInput<'_>) -> String {
        self.explain_resolved(input).await.value
    }

    pub(crate) async fn explain_resolved(&self, input: &ExplanationInput<'_>) -> Resolved<String> {
        self.strategy
            .resolve(
                "explanation",
                || explanation_prompt(input),
                |raw| parse_reply::<ExplanationReply>(raw).and_then(accept_reply),
                || render_narrative(input),
            )
            .await
    }
}
