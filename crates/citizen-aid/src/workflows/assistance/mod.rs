//! Hybrid-resolution assistance pipeline.
//!
//! Each agent answers through a [`StrategySelector`]: a generative backend when one is
//! configured and healthy, otherwise the rule-based fallback. Callers only see the result
//! shape, never which strategy produced it (the [`ResolutionTrace`] records that for audit).

pub mod application;
pub mod attributes;
pub mod backend;
pub mod classification;
pub mod documents;
pub mod eligibility;
pub mod explanation;
pub mod helpline;
pub mod orchestrator;
pub mod response;
pub mod router;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use application::{ApplicationAssistant, ApplicationGuidance};
pub use attributes::UserAttributes;
pub use backend::{BackendError, GenerativeBackend, HttpGenerativeBackend};
pub use classification::{
    classify_by_keywords, ClassificationAgent, ClassificationResult, IssueType, NeedTag, Urgency,
};
pub use documents::{DocumentAgent, DocumentCollection, DocumentState, DocumentStatus};
pub use eligibility::{
    CheckOutcome, EligibilityAgent, EligibilityVerdict, PredicateCheck, Verdict,
};
pub use explanation::{render_narrative, ExplanationAgent, ExplanationInput};
pub use helpline::{ContactEntry, ContactKind, Department, ForwardedQuery, HelplineAgent, HelplineInfo};
pub use orchestrator::AssistanceOrchestrator;
pub use response::{
    DocumentRequirement, PipelineResponse, PipelineStatus, ResolutionTrace, SchemeAssessment,
};
pub use router::assistance_router;
pub use strategy::{Resolved, StrategySelector};
