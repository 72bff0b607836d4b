use serde::{Deserialize, Serialize};

use super::rules::{CheckOutcome, PredicateCheck};
use crate::catalog::{GoverningAttribute, Scheme};

/// Three-valued eligibility outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Eligible,
    Ineligible,
    Indeterminate,
}

impl Verdict {
    pub const fn label(self) -> &'static str {
        match self {
            Verdict::Eligible => "eligible",
            Verdict::Ineligible => "ineligible",
            Verdict::Indeterminate => "indeterminate",
        }
    }
}

/// Eligibility of one request against one scheme. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub verdict: Verdict,
    pub reasons: Vec<String>,
    pub missing_requirements: Vec<String>,
    pub next_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<PredicateCheck>,
}

impl EligibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        self.verdict == Verdict::Eligible
    }

    pub fn summary(&self) -> String {
        if self.reasons.is_empty() {
            "eligibility determined from the provided information".to_string()
        } else {
            self.reasons.join("; ")
        }
    }

    /// Verdict reported for a scheme name the catalog does not know.
    pub fn scheme_not_found() -> Self {
        Self {
            verdict: Verdict::Indeterminate,
            reasons: vec!["scheme not found".to_string()],
            missing_requirements: vec!["Valid scheme name required".to_string()],
            next_steps: vec![
                "Contact helpline for assistance".to_string(),
                "Check official government websites".to_string(),
            ],
            checks: Vec::new(),
        }
    }

    /// Verdict used when an internal fault prevented the assessment from completing.
    pub fn assessment_unavailable() -> Self {
        Self {
            verdict: Verdict::Indeterminate,
            reasons: vec!["eligibility could not be assessed".to_string()],
            missing_requirements: vec!["Manual review by the scheme helpline".to_string()],
            next_steps: vec![
                "Contact helpline for assistance".to_string(),
                "Submit your request again later".to_string(),
            ],
            checks: Vec::new(),
        }
    }
}

fn information_required(attribute: GoverningAttribute) -> String {
    format!("{} information required", attribute.describe())
}

fn list_attributes(attributes: &[GoverningAttribute]) -> String {
    attributes
        .iter()
        .map(|attribute| attribute.describe().to_lowercase())
        .collect::<Vec<_>>()
        .join(" and ")
}

pub(crate) fn apply_checklist(scheme: &Scheme) -> Vec<String> {
    let mut steps = vec![
        format!("Apply online through the official website ({})", scheme.website),
        "Gather all required documents".to_string(),
    ];
    if scheme.credit_check_required {
        steps.push("Obtain a recent credit report for the mandatory credit check".to_string());
    }
    steps.push(format!("Contact helpline {} for guidance", scheme.helpline));
    steps.push("Visit your local office for assistance".to_string());
    steps
}

pub(crate) fn alternatives_checklist(unknown: &[GoverningAttribute]) -> Vec<String> {
    let mut steps = Vec::new();
    if !unknown.is_empty() {
        steps.push(format!(
            "Provide your {} for an accurate assessment",
            list_attributes(unknown)
        ));
    }
    steps.extend([
        "Check other available schemes that might be suitable".to_string(),
        "Contact helpline for alternative options".to_string(),
        "Visit local government office for personalized assistance".to_string(),
        "Consider ways to improve eligibility criteria".to_string(),
    ]);
    steps
}

/// Combines predicate outcomes into a verdict.
///
/// Any evaluated failure is a definite rejection. Eligibility requires every predicate to
/// pass. Anything else is indeterminate and names exactly the attributes still unknown.
pub(crate) fn decide_verdict(scheme: &Scheme, checks: Vec<PredicateCheck>) -> EligibilityVerdict {
    let mut unknown: Vec<GoverningAttribute> = Vec::new();
    for check in checks
        .iter()
        .filter(|check| check.outcome == CheckOutcome::Unknown)
    {
        if !unknown.contains(&check.predicate.attribute) {
            unknown.push(check.predicate.attribute);
        }
    }

    let settled_notes: Vec<String> = checks
        .iter()
        .filter(|check| check.outcome != CheckOutcome::Unknown)
        .map(|check| check.note.clone())
        .collect();
    let failed: Vec<String> = checks
        .iter()
        .filter(|check| check.outcome == CheckOutcome::Failed)
        .map(|check| check.note.clone())
        .collect();

    if checks.is_empty() {
        return EligibilityVerdict {
            verdict: Verdict::Indeterminate,
            reasons: vec![format!(
                "{} publishes no numeric eligibility thresholds",
                scheme.name
            )],
            missing_requirements: vec!["Detailed assessment by the scheme helpline".to_string()],
            next_steps: alternatives_checklist(&[]),
            checks,
        };
    }

    if !failed.is_empty() {
        return EligibilityVerdict {
            verdict: Verdict::Ineligible,
            reasons: settled_notes,
            missing_requirements: failed,
            next_steps: alternatives_checklist(&[]),
            checks,
        };
    }

    if unknown.is_empty() {
        let mut reasons = settled_notes;
        reasons.push(format!("You are eligible for {}", scheme.name));
        return EligibilityVerdict {
            verdict: Verdict::Eligible,
            reasons,
            missing_requirements: Vec::new(),
            next_steps: apply_checklist(scheme),
            checks,
        };
    }

    let reasons = if settled_notes.is_empty() {
        vec![format!(
            "Insufficient information: please provide {} for an accurate assessment",
            list_attributes(&unknown)
        )]
    } else {
        let mut reasons = settled_notes;
        reasons.push(format!(
            "Still unknown: {}",
            list_attributes(&unknown)
        ));
        reasons
    };

    EligibilityVerdict {
        verdict: Verdict::Indeterminate,
        reasons,
        missing_requirements: unknown.iter().copied().map(information_required).collect(),
        next_steps: alternatives_checklist(&unknown),
        checks,
    }
}
