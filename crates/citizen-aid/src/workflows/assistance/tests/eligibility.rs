use std::sync::Arc;

use serde_json::json;

use super::common::*;
use crate::catalog::GoverningAttribute;
use crate::config::ResolutionMode;
use crate::workflows::assistance::attributes::UserAttributes;
use crate::workflows::assistance::eligibility::{
    evaluate, CheckOutcome, EligibilityAgent, EligibilityVerdict, Verdict,
};

fn agent() -> EligibilityAgent {
    EligibilityAgent::new(catalog(), Default::default())
}

#[tokio::test]
async fn education_grant_within_limits_is_eligible() {
    let verdict = agent()
        .check(EDUCATION_GRANT, &income_and_children(25_000, 3))
        .await;

    assert_eq!(verdict.verdict, Verdict::Eligible);
    assert!(verdict
        .reasons
        .iter()
        .any(|reason| reason.starts_with("Income is within limit")));
    assert!(verdict
        .reasons
        .iter()
        .any(|reason| reason.starts_with("Children requirement met")));
    assert!(verdict.missing_requirements.is_empty());
    assert!(!verdict.next_steps.is_empty());
}

#[tokio::test]
async fn education_grant_over_income_is_ineligible() {
    let verdict = agent()
        .check(EDUCATION_GRANT, &income_and_children(35_000, 3))
        .await;

    assert_eq!(verdict.verdict, Verdict::Ineligible);
    assert_eq!(
        verdict.missing_requirements,
        vec!["Income exceeds limit (your income: PKR 35,000, max allowed: PKR 30,000)"]
    );
    assert!(verdict
        .next_steps
        .iter()
        .any(|step| step.contains("other available schemes")));
}

#[tokio::test]
async fn education_grant_without_information_is_indeterminate() {
    let verdict = agent()
        .check(EDUCATION_GRANT, &UserAttributes::default())
        .await;

    assert_eq!(verdict.verdict, Verdict::Indeterminate);
    assert_eq!(
        verdict.missing_requirements,
        vec![
            "Monthly income information required",
            "Number of children information required"
        ]
    );
    assert!(verdict.reasons[0].starts_with("Insufficient information"));
}

#[test]
fn partial_information_reports_satisfied_and_unknown() {
    let verdict = agent().check_by_rules(
        EDUCATION_GRANT,
        &UserAttributes::default().with_monthly_income(25_000),
    );

    assert_eq!(verdict.verdict, Verdict::Indeterminate);
    assert_eq!(
        verdict.reasons,
        vec![
            "Income is within limit (PKR 25,000 ≤ PKR 30,000)",
            "Still unknown: number of children"
        ]
    );
    assert_eq!(
        verdict.missing_requirements,
        vec!["Number of children information required"]
    );
    assert!(verdict.next_steps[0].starts_with("Provide your number of children"));
}

#[test]
fn present_failure_rejects_even_with_unknowns() {
    let verdict = agent().check_by_rules(
        EDUCATION_GRANT,
        &UserAttributes::default().with_monthly_income(35_000),
    );
    assert_eq!(verdict.verdict, Verdict::Ineligible);

    let outcomes: Vec<CheckOutcome> = verdict.checks.iter().map(|check| check.outcome).collect();
    assert_eq!(outcomes, vec![CheckOutcome::Failed, CheckOutcome::Unknown]);
}

#[tokio::test]
async fn unknown_scheme_is_indeterminate() {
    let verdict = agent()
        .check("Imaginary Relief Fund", &income_and_children(10_000, 2))
        .await;
    assert_eq!(verdict, EligibilityVerdict::scheme_not_found());
    assert_eq!(verdict.reasons, vec!["scheme not found"]);
}

#[test]
fn lookup_does_not_fold_case() {
    let verdict = agent().check_by_rules("ehsaas education grant", &income_and_children(25_000, 3));
    assert_eq!(verdict.verdict, Verdict::Indeterminate);
}

#[test]
fn age_window_is_inclusive() {
    let agent = agent();
    for (age, expected) in [
        (17, Verdict::Ineligible),
        (18, Verdict::Eligible),
        (35, Verdict::Eligible),
        (36, Verdict::Ineligible),
    ] {
        let verdict =
            agent.check_by_rules("Kamyab Jawan Program", &UserAttributes::default().with_age(age));
        assert_eq!(verdict.verdict, expected, "age {age}");
    }
}

#[test]
fn credit_check_schemes_add_credit_report_step() {
    let verdict = agent().check_by_rules(
        "Naya Pakistan Housing Scheme",
        &UserAttributes::default().with_monthly_income(40_000),
    );
    assert_eq!(verdict.verdict, Verdict::Eligible);
    assert!(verdict
        .next_steps
        .iter()
        .any(|step| step.contains("credit report")));
}

#[test]
fn children_ages_stand_in_for_missing_count() {
    let attributes: UserAttributes = serde_json::from_value(json!({
        "monthly_income": 18000,
        "children_ages": [7, 11]
    }))
    .expect("attributes deserialize");

    let verdict = agent().check_by_rules(EDUCATION_GRANT, &attributes);
    assert_eq!(verdict.verdict, Verdict::Eligible);
}

#[test]
fn malformed_values_count_as_absent() {
    let attributes: UserAttributes = serde_json::from_value(json!({
        "monthly_income": "twenty thousand",
        "number_of_children": 3
    }))
    .expect("attributes deserialize");

    let verdict = agent().check_by_rules(EDUCATION_GRANT, &attributes);
    assert_eq!(verdict.verdict, Verdict::Indeterminate);
    assert_eq!(
        verdict.missing_requirements,
        vec!["Monthly income information required"]
    );
}

#[test]
fn zero_children_set_directly_is_unknown_not_failing() {
    let attributes = UserAttributes {
        monthly_income: Some(25_000),
        number_of_children: Some(0),
        ..UserAttributes::default()
    };

    let verdict = agent().check_by_rules(EDUCATION_GRANT, &attributes);
    assert_eq!(verdict.verdict, Verdict::Indeterminate);
    assert_eq!(
        verdict.missing_requirements,
        vec!["Number of children information required"]
    );
}

#[test]
fn repeated_checks_are_identical() {
    let agent = agent();
    let attributes = income_and_children(28_000, 1);
    let first = agent.check_by_rules(EDUCATION_GRANT, &attributes);
    let second = agent.check_by_rules(EDUCATION_GRANT, &attributes);
    assert_eq!(first, second);
}

const SAMPLE_VALUES: [(GoverningAttribute, [u32; 2]); 4] = [
    (GoverningAttribute::MonthlyIncome, [15_000, 45_000]),
    (GoverningAttribute::FamilySize, [1, 4]),
    (GoverningAttribute::NumberOfChildren, [1, 3]),
    (GoverningAttribute::Age, [25, 50]),
];

fn with_value(attributes: UserAttributes, attribute: GoverningAttribute, value: u32) -> UserAttributes {
    match attribute {
        GoverningAttribute::MonthlyIncome => attributes.with_monthly_income(value),
        GoverningAttribute::FamilySize => attributes.with_family_size(value),
        GoverningAttribute::NumberOfChildren => attributes.with_children(value),
        GoverningAttribute::Age => attributes.with_age(value),
    }
}

/// Every combination of each sample attribute being absent or taking one of two values.
fn attribute_grid() -> Vec<UserAttributes> {
    let mut grid = vec![UserAttributes::default()];
    for (attribute, values) in SAMPLE_VALUES {
        let mut next = Vec::with_capacity(grid.len() * 3);
        for attributes in grid {
            next.push(attributes.clone());
            for value in values {
                next.push(with_value(attributes.clone(), attribute, value));
            }
        }
        grid = next;
    }
    grid
}

#[test]
fn eligible_requires_every_governing_attribute_passing() {
    let catalog = catalog();
    for scheme in catalog.schemes() {
        for attributes in attribute_grid() {
            let verdict = evaluate(scheme, &attributes);
            if verdict.verdict != Verdict::Eligible {
                continue;
            }
            for predicate in scheme.eligibility.predicates() {
                let value = attributes.value_of(predicate.attribute);
                assert!(
                    value.is_some_and(|value| predicate.comparator.admits(value, predicate.bound)),
                    "{} judged eligible with {:?} for {predicate:?}",
                    scheme.name,
                    value
                );
            }
        }
    }
}

#[test]
fn adding_information_never_flips_without_a_failure() {
    let catalog = catalog();
    for scheme in catalog.schemes() {
        for attributes in attribute_grid() {
            let before = evaluate(scheme, &attributes);
            for (attribute, values) in SAMPLE_VALUES {
                if attributes.value_of(attribute).is_some() {
                    continue;
                }
                for value in values {
                    let after = evaluate(scheme, &with_value(attributes.clone(), attribute, value));
                    if before.verdict == Verdict::Eligible {
                        assert_ne!(after.verdict, Verdict::Ineligible, "{}", scheme.name);
                    }
                    if before.verdict == Verdict::Indeterminate
                        && after.verdict == Verdict::Ineligible
                    {
                        assert!(
                            after.checks.iter().any(|check| check.predicate.attribute
                                == attribute
                                && check.outcome == CheckOutcome::Failed),
                            "{} flipped to ineligible without {attribute:?} failing",
                            scheme.name
                        );
                    }
                }
            }
        }
    }
}

#[tokio::test]
async fn generative_eligible_is_not_trusted_over_rules() {
    let backend = CannedBackend::new(
        r#"{"verdict": "eligible", "reasons": ["Everything looks good"], "next_steps": []}"#,
    );
    let agent = EligibilityAgent::new(catalog(), generative(backend.clone()));

    let resolved = agent
        .check_resolved(
            EDUCATION_GRANT,
            &UserAttributes::default().with_monthly_income(12_000),
        )
        .await;

    assert_eq!(backend.calls(), 1);
    assert_eq!(resolved.value.verdict, Verdict::Indeterminate);
    assert_eq!(
        resolved.value.missing_requirements,
        vec!["Number of children information required"]
    );
}

#[tokio::test]
async fn generative_reasons_are_used_when_consistent() {
    let backend = CannedBackend::new(
        r#"{"verdict": "eligible", "reasons": ["Low income family with school-going children"], "next_steps": []}"#,
    );
    let agent = EligibilityAgent::new(catalog(), generative(backend));

    let resolved = agent
        .check_resolved(EDUCATION_GRANT, &income_and_children(12_000, 2))
        .await;

    assert_eq!(resolved.strategy, ResolutionMode::Generative);
    assert_eq!(resolved.value.verdict, Verdict::Eligible);
    assert_eq!(
        resolved.value.reasons,
        vec!["Low income family with school-going children"]
    );
    assert!(!resolved.value.next_steps.is_empty());
}

#[tokio::test]
async fn unknown_scheme_never_reaches_backend() {
    let backend = CannedBackend::new(r#"{"verdict": "eligible", "reasons": ["yes"]}"#);
    let agent = EligibilityAgent::new(catalog(), generative(backend.clone()));

    let verdict = agent
        .check("Imaginary Relief Fund", &UserAttributes::default())
        .await;

    assert_eq!(verdict.verdict, Verdict::Indeterminate);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn failing_backend_matches_rule_verdict() {
    let agent = EligibilityAgent::new(catalog(), generative(Arc::new(FailingBackend)));
    let attributes = income_and_children(35_000, 3);

    let verdict = agent.check(EDUCATION_GRANT, &attributes).await;
    assert_eq!(verdict, agent.check_by_rules(EDUCATION_GRANT, &attributes));
}
