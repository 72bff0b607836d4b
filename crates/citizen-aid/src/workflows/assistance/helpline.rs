use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attributes::UserAttributes;
use super::classification::IssueType;
use crate::catalog::SchemeCatalog;

pub const CITIZEN_PORTAL_HELPLINE: &str = "0800-12345";
const EHSAAS_HELPLINE: &str = "0800-26477";
const GOVERNMENT_SERVICES_HELPLINE: &str = "0800-98765";
const FORWARD_RESPONSE_TIME: &str = "2-3 business days";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    SchemeSpecific,
    General,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub name: String,
    pub number: String,
    pub website: String,
    #[serde(rename = "type")]
    pub kind: ContactKind,
}

impl ContactEntry {
    fn new(name: &str, number: &str, website: &str, kind: ContactKind) -> Self {
        Self {
            name: name.to_string(),
            number: number.to_string(),
            website: website.to_string(),
            kind,
        }
    }
}

/// Ordered contact list; never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelplineInfo {
    pub helplines: Vec<ContactEntry>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Education,
    Health,
    Housing,
    Labor,
    General,
}

impl Department {
    pub const fn label(self) -> &'static str {
        match self {
            Department::Education => "Education Department",
            Department::Health => "Health Department",
            Department::Housing => "Housing Department",
            Department::Labor => "Labor Department",
            Department::General => "General Services Department",
        }
    }

    /// First keyword group that matches wins.
    pub fn for_issue(issue_text: &str) -> Self {
        const ROUTES: &[(Department, &[&str])] = &[
            (Department::Education, &["education", "school", "student", "study"]),
            (Department::Health, &["health", "medical", "hospital", "treatment"]),
            (Department::Housing, &["house", "housing", "home", "property"]),
            (Department::Labor, &["job", "employment", "work", "income"]),
        ];

        let lowered = issue_text.to_lowercase();
        ROUTES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
            .map(|(department, _)| *department)
            .unwrap_or(Department::General)
    }
}

/// Receipt for a query handed to a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardedQuery {
    pub reference_id: String,
    pub department: Department,
    pub department_name: String,
    pub message: String,
    pub estimated_response_time: String,
    pub helpline: String,
    pub next_steps: Vec<String>,
}

/// Resolves contact numbers and forwards queries to departments.
#[derive(Debug, Clone)]
pub struct HelplineAgent {
    catalog: Arc<SchemeCatalog>,
}

impl HelplineAgent {
    pub fn new(catalog: Arc<SchemeCatalog>) -> Self {
        Self { catalog }
    }

    /// Scheme helpline first, then issue-type helplines, then the universal fallback when
    /// nothing else applies.
    pub fn resolve(&self, scheme_name: Option<&str>, issue_type: Option<IssueType>) -> HelplineInfo {
        let mut helplines = Vec::new();

        if let Some(scheme) = scheme_name.and_then(|name| self.catalog.lookup_by_name(name)) {
            helplines.push(ContactEntry::new(
                &scheme.name,
                &scheme.helpline,
                &scheme.website,
                ContactKind::SchemeSpecific,
            ));
        }

        if let Some(issue_type) = issue_type {
            if matches!(
                issue_type,
                IssueType::Education | IssueType::Healthcare | IssueType::Employment
            ) {
                helplines.push(ContactEntry::new(
                    "Ehsaas Program Helpline",
                    EHSAAS_HELPLINE,
                    "https://ehsaas.gov.pk",
                    ContactKind::General,
                ));
            }
            helplines.push(ContactEntry::new(
                "Citizen Portal Helpline",
                CITIZEN_PORTAL_HELPLINE,
                "https://citizen.gov.pk",
                ContactKind::General,
            ));
        }

        if helplines.is_empty() {
            helplines.push(ContactEntry::new(
                "Government Services Helpline",
                GOVERNMENT_SERVICES_HELPLINE,
                "https://gov.pk",
                ContactKind::Fallback,
            ));
        }

        HelplineInfo {
            helplines,
            message: "Here are the relevant helpline numbers for your query:".to_string(),
        }
    }

    pub fn forward(
        &self,
        issue_text: &str,
        attributes: &UserAttributes,
        department: Option<Department>,
    ) -> ForwardedQuery {
        self.forward_at(issue_text, attributes, department, Utc::now())
    }

    /// Reference ids are second-resolution timestamps; two forwards in the same second share one.
    pub fn forward_at(
        &self,
        issue_text: &str,
        _attributes: &UserAttributes,
        department: Option<Department>,
        now: DateTime<Utc>,
    ) -> ForwardedQuery {
        let department = department.unwrap_or_else(|| Department::for_issue(issue_text));

        ForwardedQuery {
            reference_id: format!("QR{}", now.timestamp()),
            department,
            department_name: department.label().to_string(),
            message: format!("Your query has been forwarded to the {}", department.label()),
            estimated_response_time: FORWARD_RESPONSE_TIME.to_string(),
            helpline: CITIZEN_PORTAL_HELPLINE.to_string(),
            next_steps: vec![
                "Keep your reference number safe".to_string(),
                "You will receive SMS/email updates".to_string(),
                "Contact helpline if no response within 3 days".to_string(),
            ],
        }
    }
}
