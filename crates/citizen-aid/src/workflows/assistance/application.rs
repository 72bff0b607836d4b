use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::eligibility::{EligibilityVerdict, Verdict};
use crate::catalog::{Scheme, SchemeCatalog};

/// Application guidance for one scheme, tagged by readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ApplicationGuidance {
    Ready {
        scheme_name: String,
        steps: Vec<String>,
        application_process: String,
        website: String,
        helpline: String,
        message: String,
    },
    NotEligible {
        reason: String,
        missing_requirements: Vec<String>,
        suggestions: Vec<String>,
    },
    NeedsInformation {
        missing_requirements: Vec<String>,
        suggestions: Vec<String>,
    },
    Error {
        message: String,
    },
}

fn application_steps(scheme: &Scheme) -> Vec<String> {
    let mut steps = Vec::new();

    if !scheme.required_documents.is_empty() {
        steps.push("Prepare required documents:".to_string());
        steps.extend(
            scheme
                .required_documents
                .iter()
                .map(|document| format!("  - {document}")),
        );
    }

    if scheme.application_process.to_lowercase().contains("online") {
        steps.push("Apply online:".to_string());
        steps.extend(
            [
                "Visit the official website",
                "Create an account",
                "Fill out the application form",
                "Upload required documents",
                "Submit application",
            ]
            .into_iter()
            .map(|step| format!("  - {step}")),
        );
    }

    steps.push("Verification process:".to_string());
    steps.extend(
        [
            "Documents will be verified",
            "You may be contacted for additional information",
            "Application status can be checked online",
        ]
        .into_iter()
        .map(|step| format!("  - {step}")),
    );

    steps.push("After approval:".to_string());
    steps.extend(
        [
            "You will receive notification via SMS/email",
            "Benefits will be disbursed as per scheme rules",
            "Keep your application reference number safe",
        ]
        .into_iter()
        .map(|step| format!("  - {step}")),
    );

    steps
}

/// Walks an eligible citizen through applying; everyone else gets what is missing.
#[derive(Debug, Clone)]
pub struct ApplicationAssistant {
    catalog: Arc<SchemeCatalog>,
}

impl ApplicationAssistant {
    pub fn new(catalog: Arc<SchemeCatalog>) -> Self {
        Self { catalog }
    }

    pub fn guide(&self, scheme_name: &str, verdict: &EligibilityVerdict) -> ApplicationGuidance {
        let Some(scheme) = self.catalog.lookup_by_name(scheme_name) else {
            return ApplicationGuidance::Error {
                message: "Scheme not found".to_string(),
            };
        };

        match verdict.verdict {
            Verdict::Eligible => ApplicationGuidance::Ready {
                scheme_name: scheme.name.clone(),
                steps: application_steps(scheme),
                application_process: scheme.application_process.clone(),
                website: scheme.website.clone(),
                helpline: scheme.helpline.clone(),
                message: format!(
                    "Great! You are eligible for {}. Here's how to apply:",
                    scheme.name
                ),
            },
            Verdict::Ineligible => ApplicationGuidance::NotEligible {
                reason: verdict.summary(),
                missing_requirements: verdict.missing_requirements.clone(),
                suggestions: verdict.next_steps.clone(),
            },
            Verdict::Indeterminate => ApplicationGuidance::NeedsInformation {
                missing_requirements: verdict.missing_requirements.clone(),
                suggestions: verdict.next_steps.clone(),
            },
        }
    }
}
