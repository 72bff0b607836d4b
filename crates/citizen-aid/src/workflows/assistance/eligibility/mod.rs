//! Eligibility determination against the catalog's threshold predicates.
//!
//! `rules` evaluates each predicate of a scheme to passed / failed / unknown and `policy`
//! folds those outcomes into a three-valued verdict. The rule path is authoritative; a
//! generative reply can only restate or narrow it.

mod policy;
mod rules;

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

pub use policy::{EligibilityVerdict, Verdict};
pub use rules::{CheckOutcome, PredicateCheck};

pub(crate) use policy::apply_checklist;
pub(crate) use rules::format_pkr;

use super::attributes::UserAttributes;
use super::backend::parse_reply;
use super::strategy::{Resolved, StrategySelector};
use crate::catalog::{Scheme, SchemeCatalog};
use crate::config::ResolutionMode;

/// Deterministic verdict for a scheme record.
pub fn evaluate(scheme: &Scheme, attributes: &UserAttributes) -> EligibilityVerdict {
    policy::decide_verdict(scheme, rules::evaluate_predicates(scheme, attributes))
}

#[derive(Debug, Deserialize)]
struct EligibilityReply {
    #[serde(alias = "eligible_status")]
    verdict: Verdict,
    #[serde(default)]
    reasons: Vec<String>,
    #[serde(default)]
    missing_requirements: Vec<String>,
    #[serde(default)]
    next_steps: Vec<String>,
}

/// Reconciles a model reply with the rule verdict. The model may not grant eligibility the
/// rules do not, and it may not invent a rejection the rules cannot support.
fn reconcile(reply: EligibilityReply, by_rules: EligibilityVerdict) -> EligibilityVerdict {
    let agrees = match reply.verdict {
        Verdict::Eligible => by_rules.verdict == Verdict::Eligible,
        Verdict::Ineligible => by_rules.verdict == Verdict::Ineligible,
        Verdict::Indeterminate => by_rules.verdict != Verdict::Ineligible,
    };
    if !agrees || reply.reasons.is_empty() {
        return by_rules;
    }

    let missing_requirements = if reply.verdict == Verdict::Eligible {
        Vec::new()
    } else if reply.missing_requirements.is_empty() {
        by_rules.missing_requirements
    } else {
        reply.missing_requirements
    };
    let next_steps = if reply.next_steps.is_empty() {
        by_rules.next_steps
    } else {
        reply.next_steps
    };

    EligibilityVerdict {
        verdict: reply.verdict,
        reasons: reply.reasons,
        missing_requirements,
        next_steps,
        checks: by_rules.checks,
    }
}

fn eligibility_prompt(scheme: &Scheme, attributes: &UserAttributes) -> String {
    let scheme_json = serde_json::to_string_pretty(scheme).unwrap_or_else(|_| json!({}).to_string());
    let attributes_json =
        serde_json::to_string_pretty(attributes).unwrap_or_else(|_| json!({}).to_string());
    format!(
        r#"You are an eligibility officer for Pakistan government schemes. Decide whether this citizen qualifies for the scheme below.

Scheme: {scheme_json}

Citizen information: {attributes_json}

Treat missing information as unknown, never as failing. Answer "indeterminate" when a required value is missing.
Respond with a single JSON object and nothing else:
{{"verdict": "eligible|ineligible|indeterminate", "reasons": ["..."], "missing_requirements": ["..."], "next_steps": ["..."]}}"#
    )
}

/// Checks declared attributes against a scheme's eligibility thresholds.
#[derive(Debug, Clone)]
pub struct EligibilityAgent {
    catalog: Arc<SchemeCatalog>,
    strategy: StrategySelector,
}

impl EligibilityAgent {
    pub fn new(catalog: Arc<SchemeCatalog>, strategy: StrategySelector) -> Self {
        Self { catalog, strategy }
    }

    /// Rule-only verdict; unknown schemes are indeterminate.
    pub fn check_by_rules(&self, scheme_name: &str, attributes: &UserAttributes) -> EligibilityVerdict {
        match self.catalog.lookup_by_name(scheme_name) {
            Some(scheme) => evaluate(scheme, attributes),
            None => EligibilityVerdict::scheme_not_found(),
        }
    }

    pub async fn check(&self, scheme_name: &str, attributes: &UserAttributes) -> EligibilityVerdict {
        self.check_resolved(scheme_name, attributes).await.value
    }

    pub(crate) async fn check_resolved(
        &self,
        scheme_name: &str,
        attributes: &UserAttributes,
    ) -> Resolved<EligibilityVerdict> {
        let Some(scheme) = self.catalog.lookup_by_name(scheme_name) else {
            return Resolved {
                value: EligibilityVerdict::scheme_not_found(),
                strategy: ResolutionMode::Deterministic,
            };
        };

        let by_rules = evaluate(scheme, attributes);
        let fallback = by_rules.clone();
        self.strategy
            .resolve(
                "eligibility",
                || eligibility_prompt(scheme, attributes),
                |raw| parse_reply::<EligibilityReply>(raw).map(|reply| reconcile(reply, by_rules)),
                || fallback,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant() -> Scheme {
        SchemeCatalog::standard()
            .lookup_by_name("Ehsaas Education Grant")
            .cloned()
            .expect("standard catalog carries the education grant")
    }

    #[test]
    fn reconcile_refuses_unearned_eligibility() {
        let by_rules = evaluate(&grant(), &UserAttributes::default().with_monthly_income(25_000));
        assert_eq!(by_rules.verdict, Verdict::Indeterminate);

        let reply = EligibilityReply {
            verdict: Verdict::Eligible,
            reasons: vec!["Looks fine".to_string()],
            missing_requirements: Vec::new(),
            next_steps: Vec::new(),
        };
        let reconciled = reconcile(reply, by_rules.clone());
        assert_eq!(reconciled, by_rules);
    }

    #[test]
    fn reconcile_fills_next_steps_from_rules() {
        let attributes = UserAttributes::default()
            .with_monthly_income(20_000)
            .with_children(2);
        let by_rules = evaluate(&grant(), &attributes);
        assert_eq!(by_rules.verdict, Verdict::Eligible);

        let reply = EligibilityReply {
            verdict: Verdict::Eligible,
            reasons: vec!["Income and children both qualify".to_string()],
            missing_requirements: vec!["stray".to_string()],
            next_steps: Vec::new(),
        };
        let reconciled = reconcile(reply, by_rules.clone());
        assert_eq!(reconciled.verdict, Verdict::Eligible);
        assert_eq!(reconciled.reasons, vec!["Income and children both qualify"]);
        assert!(reconciled.missing_requirements.is_empty());
        assert_eq!(reconciled.next_steps, by_rules.next_steps);
    }
}
