use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::backend::{parse_reply, BackendError};
use super::strategy::{Resolved, StrategySelector};
use crate::catalog::{SchemeCatalog, SchemeCategory};

/// Issue category assigned to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    Education,
    Housing,
    Healthcare,
    Employment,
    General,
}

impl IssueType {
    pub const fn label(self) -> &'static str {
        match self {
            IssueType::Education => "education",
            IssueType::Housing => "housing",
            IssueType::Healthcare => "healthcare",
            IssueType::Employment => "employment",
            IssueType::General => "general",
        }
    }

    pub const fn category(self) -> Option<SchemeCategory> {
        match self {
            IssueType::Education => Some(SchemeCategory::Education),
            IssueType::Housing => Some(SchemeCategory::Housing),
            IssueType::Healthcare => Some(SchemeCategory::Healthcare),
            IssueType::Employment => Some(SchemeCategory::Employment),
            IssueType::General => None,
        }
    }

    const fn from_category(category: SchemeCategory) -> Self {
        match category {
            SchemeCategory::Education => IssueType::Education,
            SchemeCategory::Housing => IssueType::Housing,
            SchemeCategory::Healthcare => IssueType::Healthcare,
            SchemeCategory::Employment => IssueType::Employment,
        }
    }

    fn candidate_schemes(self) -> &'static [&'static str] {
        match self {
            IssueType::Education => &[
                "Ehsaas Education Grant",
                "Prime Minister's Education Initiative",
                "Benazir Income Support Programme (BISP)",
            ],
            IssueType::Housing => &["Naya Pakistan Housing Scheme", "Apna Ghar Scheme"],
            IssueType::Healthcare => &["Sehat Card Plus", "Ehsaas Health Insurance"],
            IssueType::Employment => &[
                "Ehsaas Emergency Cash",
                "Kamyab Jawan Program",
                "Benazir Income Support Programme (BISP)",
            ],
            IssueType::General => &[
                "Ehsaas Education Grant",
                "Sehat Card Plus",
                "Ehsaas Emergency Cash",
                "Benazir Income Support Programme (BISP)",
            ],
        }
    }

    fn required_info(self) -> &'static [&'static str] {
        match self {
            IssueType::Education => &[
                "monthly_income",
                "number_of_children",
                "children_ages",
                "location",
            ],
            IssueType::Housing => &[
                "monthly_income",
                "credit_score",
                "employment_status",
                "location",
            ],
            IssueType::Healthcare => &[
                "monthly_income",
                "family_size",
                "medical_condition",
                "location",
            ],
            IssueType::Employment => &["monthly_income", "family_size", "employment_status", "age"],
            IssueType::General => &["monthly_income", "family_size", "location", "specific_needs"],
        }
    }
}

/// Specific needs detected in the issue text. Not mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedTag {
    UrgentAssistance,
    FinancialSupport,
    FamilySupport,
    HealthcareSupport,
    EducationSupport,
    GeneralAssistance,
}

impl NeedTag {
    pub const fn describe(self) -> &'static str {
        match self {
            NeedTag::UrgentAssistance => "Urgent assistance required",
            NeedTag::FinancialSupport => "Financial support needed",
            NeedTag::FamilySupport => "Family support required",
            NeedTag::HealthcareSupport => "Healthcare support needed",
            NeedTag::EducationSupport => "Education support required",
            NeedTag::GeneralAssistance => "General assistance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub const fn label(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }
}

/// Output of the classification agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub issue_type: IssueType,
    pub relevant_schemes: Vec<String>,
    pub required_info: Vec<String>,
    pub confidence: f32,
    pub detected_needs: Vec<NeedTag>,
    pub urgency: Urgency,
    #[serde(default)]
    pub keyword_matches: BTreeMap<SchemeCategory, u32>,
}

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "school",
    "student",
    "study",
    "children",
    "kids",
    "tuition",
    "fees",
    "scholarship",
    "learning",
];
const HOUSING_KEYWORDS: &[&str] = &[
    "house",
    "housing",
    "home",
    "property",
    "loan",
    "mortgage",
    "apartment",
    "residence",
    "accommodation",
];
const HEALTHCARE_KEYWORDS: &[&str] = &[
    "health",
    "medical",
    "hospital",
    "treatment",
    "doctor",
    "medicine",
    "illness",
    "surgery",
    "card",
    "insurance",
];
const EMPLOYMENT_KEYWORDS: &[&str] = &[
    "job",
    "employment",
    "work",
    "income",
    "money",
    "cash",
    "salary",
    "business",
    "loan",
    "entrepreneur",
    "youth",
];

const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "emergency",
    "immediate",
    "asap",
    "critical",
    "desperate",
];
const MODERATE_KEYWORDS: &[&str] = &["soon", "quickly", "fast", "priority"];

const NEED_KEYWORDS: &[(NeedTag, &[&str])] = &[
    (
        NeedTag::UrgentAssistance,
        &["urgent", "emergency", "immediate", "asap"],
    ),
    (
        NeedTag::FinancialSupport,
        &["financial", "money", "cash", "income"],
    ),
    (NeedTag::FamilySupport, &["family", "children", "kids"]),
    (
        NeedTag::HealthcareSupport,
        &["medical", "health", "treatment"],
    ),
    (NeedTag::EducationSupport, &["education", "school", "study"]),
];

fn keywords_for(category: SchemeCategory) -> &'static [&'static str] {
    match category {
        SchemeCategory::Education => EDUCATION_KEYWORDS,
        SchemeCategory::Housing => HOUSING_KEYWORDS,
        SchemeCategory::Healthcare => HEALTHCARE_KEYWORDS,
        SchemeCategory::Employment => EMPLOYMENT_KEYWORDS,
    }
}

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

fn keyword_matches(lowered: &str) -> BTreeMap<SchemeCategory, u32> {
    SchemeCategory::ALL
        .into_iter()
        .map(|category| {
            let hits = keywords_for(category)
                .iter()
                .filter(|keyword| lowered.contains(*keyword))
                .count() as u32;
            (category, hits)
        })
        .collect()
}

fn detect_needs(lowered: &str) -> Vec<NeedTag> {
    let needs: Vec<NeedTag> = NEED_KEYWORDS
        .iter()
        .filter(|(_, keywords)| mentions_any(lowered, keywords))
        .map(|(tag, _)| *tag)
        .collect();

    if needs.is_empty() {
        vec![NeedTag::GeneralAssistance]
    } else {
        needs
    }
}

fn assess_urgency(lowered: &str) -> Urgency {
    if mentions_any(lowered, URGENT_KEYWORDS) {
        Urgency::High
    } else if mentions_any(lowered, MODERATE_KEYWORDS) {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Deterministic strategy: keyword scoring with a fixed category priority for ties.
pub fn classify_by_keywords(issue_text: &str) -> ClassificationResult {
    let lowered = issue_text.to_lowercase();
    let matches = keyword_matches(&lowered);

    // Strictly-greater comparison keeps the earlier category on ties.
    let mut best: Option<(SchemeCategory, u32)> = None;
    for category in SchemeCategory::ALL {
        let hits = matches.get(&category).copied().unwrap_or(0);
        if hits > best.map(|(_, top)| top).unwrap_or(0) {
            best = Some((category, hits));
        }
    }

    let (issue_type, top_hits) = match best {
        Some((category, hits)) => (IssueType::from_category(category), hits),
        None => (IssueType::General, 0),
    };

    ClassificationResult {
        issue_type,
        relevant_schemes: to_strings(issue_type.candidate_schemes()),
        required_info: to_strings(issue_type.required_info()),
        confidence: (0.5 + 0.1 * top_hits as f32).min(0.9),
        detected_needs: detect_needs(&lowered),
        urgency: assess_urgency(&lowered),
        keyword_matches: matches,
    }
}

#[derive(Debug, Deserialize)]
struct ClassificationReply {
    issue_type: IssueType,
    relevant_schemes: Vec<String>,
    #[serde(default)]
    required_info: Vec<String>,
    confidence: f32,
    #[serde(default)]
    detected_needs: Vec<NeedTag>,
    #[serde(default, alias = "urgency_level")]
    urgency: Option<Urgency>,
}

fn validate_reply(
    reply: ClassificationReply,
    catalog: &SchemeCatalog,
    issue_text: &str,
) -> Result<ClassificationResult, BackendError> {
    if !reply.confidence.is_finite() || !(0.0..=1.0).contains(&reply.confidence) {
        return Err(BackendError::Malformed(format!(
            "confidence {} outside [0, 1]",
            reply.confidence
        )));
    }

    let mut relevant_schemes: Vec<String> = Vec::new();
    for name in reply.relevant_schemes {
        let name = name.trim().to_string();
        if catalog.contains(&name) && !relevant_schemes.contains(&name) {
            relevant_schemes.push(name);
        }
    }
    if relevant_schemes.is_empty() {
        return Err(BackendError::Malformed(
            "reply named no known schemes".to_string(),
        ));
    }

    let lowered = issue_text.to_lowercase();
    let required_info = if reply.required_info.is_empty() {
        to_strings(reply.issue_type.required_info())
    } else {
        reply.required_info
    };
    let detected_needs = if reply.detected_needs.is_empty() {
        detect_needs(&lowered)
    } else {
        let mut needs = reply.detected_needs;
        needs.sort();
        needs.dedup();
        needs
    };

    Ok(ClassificationResult {
        issue_type: reply.issue_type,
        relevant_schemes,
        required_info,
        confidence: reply.confidence,
        detected_needs,
        urgency: reply.urgency.unwrap_or_else(|| assess_urgency(&lowered)),
        keyword_matches: keyword_matches(&lowered),
    })
}

fn classification_prompt(issue_text: &str, catalog: &SchemeCatalog) -> String {
    format!(
        r#"You are a policy expert for Pakistan government schemes. Analyze this citizen's issue and identify:
1. What type of help they need (education, housing, healthcare, employment or general)
2. Which specific schemes from the catalog are relevant, using their exact names
3. Which information is needed to determine eligibility

Citizen's issue: "{issue_text}"

Available schemes: {catalog}

Respond with a single JSON object and nothing else:
{{"issue_type": "education|housing|healthcare|employment|general", "relevant_schemes": ["exact scheme name"], "required_info": ["monthly_income"], "confidence": 0.8, "detected_needs": ["financial_support"], "urgency": "low|medium|high"}}"#,
        catalog = catalog.to_prompt_json(),
    )
}

/// Maps free-text issues to an issue type and ranked candidate schemes.
#[derive(Debug, Clone)]
pub struct ClassificationAgent {
    catalog: Arc<SchemeCatalog>,
    strategy: StrategySelector,
}

impl ClassificationAgent {
    pub fn new(catalog: Arc<SchemeCatalog>, strategy: StrategySelector) -> Self {
        Self { catalog, strategy }
    }

    /// Never fails: the keyword strategy is the terminal fallback.
    pub async fn classify(&self, issue_text: &str) -> ClassificationResult {
        self.classify_resolved(issue_text).await.value
    }

    pub(crate) async fn classify_resolved(
        &self,
        issue_text: &str,
    ) -> Resolved<ClassificationResult> {
        let catalog = self.catalog.as_ref();
        self.strategy
            .resolve(
                "classification",
                || classification_prompt(issue_text, catalog),
                |raw| {
                    parse_reply::<ClassificationReply>(raw)
                        .and_then(|reply| validate_reply(reply, catalog, issue_text))
                },
                || classify_by_keywords(issue_text),
            )
            .await
    }
}
