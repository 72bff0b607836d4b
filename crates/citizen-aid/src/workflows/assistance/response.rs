use serde::{Deserialize, Serialize};

use super::classification::ClassificationResult;
use super::eligibility::{EligibilityVerdict, Verdict};
use super::helpline::HelplineInfo;
use crate::catalog::SchemeDetails;
use crate::config::ResolutionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Success,
    /// An internal fault interrupted the run; the body was rebuilt from the deterministic path.
    Partial,
}

/// One candidate scheme paired with its verdict, in classification order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeAssessment {
    pub scheme: String,
    pub eligibility: EligibilityVerdict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequirement {
    pub scheme: String,
    pub documents: Vec<String>,
    pub message: String,
}

/// Which strategy produced each agent's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionTrace {
    pub classification: ResolutionMode,
    pub eligibility: Vec<ResolutionMode>,
    pub explanation: ResolutionMode,
}

impl ResolutionTrace {
    pub fn deterministic(schemes: usize) -> Self {
        Self {
            classification: ResolutionMode::Deterministic,
            eligibility: vec![ResolutionMode::Deterministic; schemes],
            explanation: ResolutionMode::Deterministic,
        }
    }
}

/// Aggregate result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResponse {
    pub status: PipelineStatus,
    pub issue_analysis: ClassificationResult,
    pub eligibility_results: Vec<SchemeAssessment>,
    pub scheme_details: Vec<SchemeDetails>,
    pub document_requirements: Vec<DocumentRequirement>,
    pub helpline_info: HelplineInfo,
    pub explanation: String,
    pub recommendations: Vec<String>,
    pub next_actions: Vec<String>,
    pub resolution: ResolutionTrace,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl PipelineResponse {
    pub fn eligible_schemes(&self) -> impl Iterator<Item = &str> {
        self.eligibility_results
            .iter()
            .filter(|assessment| assessment.eligibility.is_eligible())
            .map(|assessment| assessment.scheme.as_str())
    }

    pub fn verdict_for(&self, scheme: &str) -> Option<Verdict> {
        self.eligibility_results
            .iter()
            .find(|assessment| assessment.scheme == scheme)
            .map(|assessment| assessment.eligibility.verdict)
    }
}

pub(crate) fn recommendations(assessments: &[SchemeAssessment]) -> Vec<String> {
    if assessments.is_empty() {
        return vec![
            "Contact your local government office for personalized assistance".to_string(),
            "Check online government portals for more schemes".to_string(),
        ];
    }

    assessments
        .iter()
        .map(|assessment| {
            let verdict = &assessment.eligibility;
            match verdict.verdict {
                Verdict::Eligible => format!(
                    "[ELIGIBLE] Apply for {} - You are eligible!",
                    assessment.scheme
                ),
                Verdict::Ineligible => format!(
                    "[NOT ELIGIBLE] {} - Not eligible: {}",
                    assessment.scheme,
                    verdict.summary()
                ),
                Verdict::Indeterminate => format!(
                    "[MORE INFO NEEDED] {} - {}",
                    assessment.scheme,
                    verdict.missing_requirements.join(", ")
                ),
            }
        })
        .collect()
}

pub(crate) fn next_actions(assessments: &[SchemeAssessment]) -> Vec<String> {
    let any_eligible = assessments
        .iter()
        .any(|assessment| assessment.eligibility.is_eligible());

    let mut actions: Vec<String> = if any_eligible {
        vec![
            "You are eligible for some schemes! Consider applying.".to_string(),
            "Check the required documents for each eligible scheme.".to_string(),
            "Visit the official websites to start your application.".to_string(),
            "Contact helplines if you need assistance with the application process.".to_string(),
        ]
    } else {
        vec![
            "Contact the helpline numbers provided for personalized assistance.".to_string(),
            "Visit your local government office for alternative options.".to_string(),
            "Check other government schemes that might be suitable.".to_string(),
        ]
    };
    actions.push("Keep your reference number safe if you contact helplines.".to_string());
    actions
}
