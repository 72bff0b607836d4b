use std::sync::Arc;

use tracing::{debug, error, info};

use super::application::{ApplicationAssistant, ApplicationGuidance};
use super::attributes::UserAttributes;
use super::classification::{
    classify_by_keywords, ClassificationAgent, ClassificationResult, IssueType,
};
use super::documents::{DocumentAgent, DocumentCollection};
use super::eligibility::{EligibilityAgent, EligibilityVerdict};
use super::explanation::{render_narrative, ExplanationAgent, ExplanationInput};
use super::helpline::{Department, ForwardedQuery, HelplineAgent, HelplineInfo};
use super::response::{
    next_actions, recommendations, DocumentRequirement, PipelineResponse, PipelineStatus,
    ResolutionTrace, SchemeAssessment,
};
use super::strategy::{Resolved, StrategySelector};
use crate::catalog::{SchemeCatalog, SchemeDetails};
use crate::config::ResolutionMode;

const DEGRADED_NOTICE: &str =
    "Some checks could not be completed. Results below come from the rule-based assessment only.";
const SCHEME_FAULT_NOTICE: &str =
    "Some eligibility checks could not be completed. Those schemes need review by their helpline.";

struct Agents {
    catalog: Arc<SchemeCatalog>,
    strategy: StrategySelector,
    classification: ClassificationAgent,
    eligibility: EligibilityAgent,
    documents: DocumentAgent,
    helpline: HelplineAgent,
    explanation: ExplanationAgent,
    application: ApplicationAssistant,
}

/// Sequences the agents into one pipeline run per request.
///
/// Cloning is cheap; clones share the catalog and the agents. No state is kept between runs.
#[derive(Clone)]
pub struct AssistanceOrchestrator {
    agents: Arc<Agents>,
}

impl AssistanceOrchestrator {
    pub fn new(catalog: Arc<SchemeCatalog>, strategy: StrategySelector) -> Self {
        let agents = Agents {
            classification: ClassificationAgent::new(Arc::clone(&catalog), strategy.clone()),
            eligibility: EligibilityAgent::new(Arc::clone(&catalog), strategy.clone()),
            documents: DocumentAgent::new(Arc::clone(&catalog)),
            helpline: HelplineAgent::new(Arc::clone(&catalog)),
            explanation: ExplanationAgent::new(strategy.clone()),
            application: ApplicationAssistant::new(Arc::clone(&catalog)),
            catalog,
            strategy,
        };

        Self {
            agents: Arc::new(agents),
        }
    }

    /// Orchestrator that never contacts a generative backend.
    pub fn deterministic(catalog: Arc<SchemeCatalog>) -> Self {
        Self::new(catalog, StrategySelector::deterministic())
    }

    pub fn mode(&self) -> ResolutionMode {
        self.agents.strategy.mode()
    }

    pub fn catalog(&self) -> &SchemeCatalog {
        &self.agents.catalog
    }

    pub fn classification(&self) -> &ClassificationAgent {
        &self.agents.classification
    }

    pub fn eligibility(&self) -> &EligibilityAgent {
        &self.agents.eligibility
    }

    pub fn documents(&self) -> &DocumentAgent {
        &self.agents.documents
    }

    pub fn helpline(&self) -> &HelplineAgent {
        &self.agents.helpline
    }

    pub fn explanation(&self) -> &ExplanationAgent {
        &self.agents.explanation
    }

    /// Runs the full pipeline. Never fails: an internal fault yields a `partial` response.
    pub async fn solve(&self, issue_text: &str, attributes: &UserAttributes) -> PipelineResponse {
        let agents = Arc::clone(&self.agents);
        let issue = issue_text.to_string();
        let owned_attributes = attributes.clone();

        let run = tokio::spawn(async move { agents.run(&issue, &owned_attributes).await });
        match run.await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "assistance pipeline aborted, returning partial result");
                self.agents.degraded(issue_text, attributes)
            }
        }
    }

    pub async fn check_eligibility(
        &self,
        scheme_name: &str,
        attributes: &UserAttributes,
    ) -> EligibilityVerdict {
        self.agents.eligibility.check(scheme_name, attributes).await
    }

    pub fn collect_documents(
        &self,
        scheme_name: &str,
        attributes: &UserAttributes,
    ) -> DocumentCollection {
        self.agents.documents.collect(scheme_name, attributes)
    }

    pub fn helplines(
        &self,
        scheme_name: Option<&str>,
        issue_type: Option<IssueType>,
    ) -> HelplineInfo {
        self.agents.helpline.resolve(scheme_name, issue_type)
    }

    pub fn forward(
        &self,
        issue_text: &str,
        attributes: &UserAttributes,
        department: Option<Department>,
    ) -> ForwardedQuery {
        self.agents.helpline.forward(issue_text, attributes, department)
    }

    /// Eligibility first, then step-by-step guidance for the scheme.
    pub async fn assist_application(
        &self,
        scheme_name: &str,
        attributes: &UserAttributes,
    ) -> ApplicationGuidance {
        let verdict = self.agents.eligibility.check(scheme_name, attributes).await;
        self.agents.application.guide(scheme_name, &verdict)
    }
}

impl std::fmt::Debug for AssistanceOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistanceOrchestrator")
            .field("strategy", &self.agents.strategy)
            .field("schemes", &self.agents.catalog.schemes().len())
            .finish()
    }
}

/// Runs one scheme's check on its own task so a fault only costs that scheme's verdict.
async fn check_isolated(
    agents: &Arc<Agents>,
    scheme: &str,
    attributes: &UserAttributes,
) -> Option<Resolved<EligibilityVerdict>> {
    let agents = Arc::clone(agents);
    let scheme_name = scheme.to_string();
    let attributes = attributes.clone();
    let check = tokio::spawn(async move {
        agents
            .eligibility
            .check_resolved(&scheme_name, &attributes)
            .await
    });

    match check.await {
        Ok(resolved) => Some(resolved),
        Err(err) => {
            error!(scheme, error = %err, "eligibility check aborted");
            None
        }
    }
}

impl Agents {
    async fn run(self: Arc<Self>, issue_text: &str, attributes: &UserAttributes) -> PipelineResponse {
        let classified = self.classification.classify_resolved(issue_text).await;
        let classification = classified.value;
        debug!(
            issue_type = classification.issue_type.label(),
            strategy = classified.strategy.label(),
            candidates = classification.relevant_schemes.len(),
            "issue classified"
        );

        let mut assessments = Vec::with_capacity(classification.relevant_schemes.len());
        let mut eligibility_trace = Vec::with_capacity(classification.relevant_schemes.len());
        let mut document_requirements = Vec::new();
        let mut faulted = 0_usize;
        for scheme in &classification.relevant_schemes {
            let resolved = match check_isolated(&self, scheme, attributes).await {
                Some(resolved) => resolved,
                None => {
                    faulted += 1;
                    Resolved::deterministic(EligibilityVerdict::assessment_unavailable())
                }
            };
            debug!(
                scheme = scheme.as_str(),
                verdict = resolved.value.verdict.label(),
                strategy = resolved.strategy.label(),
                "eligibility checked"
            );

            if resolved.value.is_eligible() {
                if let DocumentCollection::Success {
                    required_documents,
                    collection_message,
                    ..
                } = self.documents.collect(scheme, attributes)
                {
                    document_requirements.push(DocumentRequirement {
                        scheme: scheme.clone(),
                        documents: required_documents,
                        message: collection_message,
                    });
                }
            }

            eligibility_trace.push(resolved.strategy);
            assessments.push(SchemeAssessment {
                scheme: scheme.clone(),
                eligibility: resolved.value,
            });
        }

        let helpline_info = self.helpline.resolve(
            classification.relevant_schemes.first().map(String::as_str),
            Some(classification.issue_type),
        );

        let explained = self
            .explanation
            .explain_resolved(&ExplanationInput {
                classification: &classification,
                assessments: &assessments,
                attributes,
            })
            .await;

        let eligible = assessments
            .iter()
            .filter(|assessment| assessment.eligibility.is_eligible())
            .count();
        info!(
            issue_type = classification.issue_type.label(),
            schemes = assessments.len(),
            eligible,
            faulted,
            "assistance request resolved"
        );

        let (status, notice) = if faulted > 0 {
            (PipelineStatus::Partial, Some(SCHEME_FAULT_NOTICE.to_string()))
        } else {
            (PipelineStatus::Success, None)
        };

        PipelineResponse {
            status,
            scheme_details: self.scheme_details(&classification),
            recommendations: recommendations(&assessments),
            next_actions: next_actions(&assessments),
            resolution: ResolutionTrace {
                classification: classified.strategy,
                eligibility: eligibility_trace,
                explanation: explained.strategy,
            },
            issue_analysis: classification,
            eligibility_results: assessments,
            document_requirements,
            helpline_info,
            explanation: explained.value,
            notice,
        }
    }

    /// Best-effort response after a fault: keyword classification, every candidate kept with
    /// an unavailable verdict.
    fn degraded(&self, issue_text: &str, attributes: &UserAttributes) -> PipelineResponse {
        let classification = classify_by_keywords(issue_text);
        let assessments: Vec<SchemeAssessment> = classification
            .relevant_schemes
            .iter()
            .map(|scheme| SchemeAssessment {
                scheme: scheme.clone(),
                eligibility: EligibilityVerdict::assessment_unavailable(),
            })
            .collect();

        let helpline_info = self.helpline.resolve(None, Some(classification.issue_type));
        let explanation = render_narrative(&ExplanationInput {
            classification: &classification,
            assessments: &assessments,
            attributes,
        });

        PipelineResponse {
            status: PipelineStatus::Partial,
            scheme_details: self.scheme_details(&classification),
            recommendations: recommendations(&assessments),
            next_actions: next_actions(&assessments),
            resolution: ResolutionTrace::deterministic(assessments.len()),
            issue_analysis: classification,
            eligibility_results: assessments,
            document_requirements: Vec::new(),
            helpline_info,
            explanation,
            notice: Some(DEGRADED_NOTICE.to_string()),
        }
    }

    fn scheme_details(&self, classification: &ClassificationResult) -> Vec<SchemeDetails> {
        classification
            .relevant_schemes
            .iter()
            .filter_map(|scheme| self.catalog.scheme_details(scheme))
            .collect()
    }
}
