use serde::{Deserialize, Serialize};

use super::super::attributes::UserAttributes;
use crate::catalog::{Comparator, GoverningAttribute, Scheme, ThresholdPredicate};

/// Outcome of one predicate. `Unknown` means the governing attribute was not supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckOutcome {
    Passed,
    Failed,
    Unknown,
}

/// Audit entry for a single predicate of a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateCheck {
    pub predicate: ThresholdPredicate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
    pub outcome: CheckOutcome,
    pub note: String,
}

/// Renders a rupee amount with thousands separators, e.g. `PKR 30,000`.
pub(crate) fn format_pkr(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("PKR {grouped}")
}

fn passed_note(predicate: &ThresholdPredicate, value: u32) -> String {
    let bound = predicate.bound;
    match (predicate.attribute, predicate.comparator) {
        (GoverningAttribute::MonthlyIncome, Comparator::AtMost) => format!(
            "Income is within limit ({} ≤ {})",
            format_pkr(value),
            format_pkr(bound)
        ),
        (GoverningAttribute::MonthlyIncome, Comparator::AtLeast) => format!(
            "Income meets the minimum ({} ≥ {})",
            format_pkr(value),
            format_pkr(bound)
        ),
        (GoverningAttribute::NumberOfChildren, Comparator::AtLeast) => format!(
            "Children requirement met ({value} children, at least {bound} required)"
        ),
        (GoverningAttribute::FamilySize, Comparator::AtLeast) => format!(
            "Family size requirement met ({value} family members, at least {bound} required)"
        ),
        (GoverningAttribute::Age, Comparator::AtLeast) => {
            format!("Minimum age met ({value} years, at least {bound} required)")
        }
        (GoverningAttribute::Age, Comparator::AtMost) => {
            format!("Age is within limit ({value} years ≤ {bound} years)")
        }
        (attribute, Comparator::AtMost) => {
            format!("{} is within limit ({value} ≤ {bound})", attribute.describe())
        }
        (attribute, Comparator::AtLeast) => {
            format!("{} requirement met ({value} ≥ {bound})", attribute.describe())
        }
    }
}

fn failed_note(predicate: &ThresholdPredicate, value: u32) -> String {
    let bound = predicate.bound;
    match (predicate.attribute, predicate.comparator) {
        (GoverningAttribute::MonthlyIncome, Comparator::AtMost) => format!(
            "Income exceeds limit (your income: {}, max allowed: {})",
            format_pkr(value),
            format_pkr(bound)
        ),
        (GoverningAttribute::MonthlyIncome, Comparator::AtLeast) => format!(
            "Income too low (your income: {}, minimum required: {})",
            format_pkr(value),
            format_pkr(bound)
        ),
        (GoverningAttribute::NumberOfChildren, Comparator::AtLeast) => format!(
            "Need at least {bound} school-aged children (you have: {value})"
        ),
        (GoverningAttribute::FamilySize, Comparator::AtLeast) => {
            format!("Need at least {bound} family members (you have: {value})")
        }
        (GoverningAttribute::Age, Comparator::AtLeast) => format!(
            "Minimum age required (your age: {value} years, minimum required: {bound} years)"
        ),
        (GoverningAttribute::Age, Comparator::AtMost) => format!(
            "Age exceeds limit (your age: {value} years, max allowed: {bound} years)"
        ),
        (attribute, Comparator::AtMost) => {
            format!("{} exceeds limit ({value} > {bound})", attribute.describe())
        }
        (attribute, Comparator::AtLeast) => {
            format!("{} below minimum ({value} < {bound})", attribute.describe())
        }
    }
}

fn unknown_note(predicate: &ThresholdPredicate) -> String {
    let bound = match predicate.attribute {
        GoverningAttribute::MonthlyIncome => format_pkr(predicate.bound),
        _ => predicate.bound.to_string(),
    };
    let relation = match predicate.comparator {
        Comparator::AtMost => "at most",
        Comparator::AtLeast => "at least",
    };
    format!(
        "{} not provided (must be {relation} {bound})",
        predicate.attribute.describe()
    )
}

/// Evaluates every predicate of the scheme against the supplied attributes, in table order.
pub(crate) fn evaluate_predicates(
    scheme: &Scheme,
    attributes: &UserAttributes,
) -> Vec<PredicateCheck> {
    scheme
        .eligibility
        .predicates()
        .into_iter()
        .map(|predicate| {
            let value = attributes.value_of(predicate.attribute);
            let (outcome, note) = match value {
                Some(value) if predicate.comparator.admits(value, predicate.bound) => {
                    (CheckOutcome::Passed, passed_note(&predicate, value))
                }
                Some(value) => (CheckOutcome::Failed, failed_note(&predicate, value)),
                None => (CheckOutcome::Unknown, unknown_note(&predicate)),
            };
            PredicateCheck {
                predicate,
                value,
                outcome,
                note,
            }
        })
        .collect()
}
