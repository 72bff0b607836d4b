use serde::{Deserialize, Serialize};

/// Grouping used by the catalog and by the classification keyword sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeCategory {
    Education,
    Housing,
    Healthcare,
    Employment,
}

impl SchemeCategory {
    /// Fixed priority order; also the tie-break order for keyword classification.
    pub const ALL: [SchemeCategory; 4] = [
        SchemeCategory::Education,
        SchemeCategory::Housing,
        SchemeCategory::Healthcare,
        SchemeCategory::Employment,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            SchemeCategory::Education => "education",
            SchemeCategory::Housing => "housing",
            SchemeCategory::Healthcare => "healthcare",
            SchemeCategory::Employment => "employment",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            SchemeCategory::Education => "Education",
            SchemeCategory::Housing => "Housing",
            SchemeCategory::Healthcare => "Healthcare",
            SchemeCategory::Employment => "Employment",
        }
    }
}

/// User attribute referenced by a threshold predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoverningAttribute {
    MonthlyIncome,
    FamilySize,
    NumberOfChildren,
    Age,
}

impl GoverningAttribute {
    pub const fn key(self) -> &'static str {
        match self {
            GoverningAttribute::MonthlyIncome => "monthly_income",
            GoverningAttribute::FamilySize => "family_size",
            GoverningAttribute::NumberOfChildren => "number_of_children",
            GoverningAttribute::Age => "age",
        }
    }

    pub const fn describe(self) -> &'static str {
        match self {
            GoverningAttribute::MonthlyIncome => "Monthly income",
            GoverningAttribute::FamilySize => "Family size",
            GoverningAttribute::NumberOfChildren => "Number of children",
            GoverningAttribute::Age => "Age",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    AtMost,
    AtLeast,
}

impl Comparator {
    pub fn admits(self, value: u32, bound: u32) -> bool {
        match self {
            Comparator::AtMost => value <= bound,
            Comparator::AtLeast => value >= bound,
        }
    }
}

/// One row of a scheme's predicate table: `attribute <comparator> bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdPredicate {
    pub attribute: GoverningAttribute,
    pub comparator: Comparator,
    pub bound: u32,
}

/// Published numeric thresholds for a scheme. Absent bounds are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityThresholds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_monthly_income: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_monthly_income: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_children: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_family_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
}

impl EligibilityThresholds {
    /// Expands the thresholds into the uniform predicate table evaluated by the eligibility agent.
    pub fn predicates(&self) -> Vec<ThresholdPredicate> {
        use Comparator::{AtLeast, AtMost};
        use GoverningAttribute::{Age, FamilySize, MonthlyIncome, NumberOfChildren};

        [
            (MonthlyIncome, AtLeast, self.min_monthly_income),
            (MonthlyIncome, AtMost, self.max_monthly_income),
            (NumberOfChildren, AtLeast, self.min_children),
            (FamilySize, AtLeast, self.min_family_size),
            (Age, AtLeast, self.min_age),
            (Age, AtMost, self.max_age),
        ]
        .into_iter()
        .filter_map(|(attribute, comparator, bound)| {
            bound.map(|bound| ThresholdPredicate {
                attribute,
                comparator,
                bound,
            })
        })
        .collect()
    }

    /// Governing attributes in predicate order, without duplicates.
    pub fn governing_attributes(&self) -> Vec<GoverningAttribute> {
        let mut attributes = Vec::new();
        for predicate in self.predicates() {
            if !attributes.contains(&predicate.attribute) {
                attributes.push(predicate.attribute);
            }
        }
        attributes
    }
}

/// A named government assistance program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    pub category: SchemeCategory,
    pub description: String,
    #[serde(default)]
    pub eligibility: EligibilityThresholds,
    #[serde(default)]
    pub credit_check_required: bool,
    pub benefits: String,
    pub application_process: String,
    pub helpline: String,
    pub website: String,
    pub required_documents: Vec<String>,
}

/// Public view of a scheme returned alongside pipeline results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeDetails {
    pub name: String,
    pub description: String,
    pub benefits: String,
    pub application_process: String,
    pub helpline: String,
    pub website: String,
    pub required_documents: Vec<String>,
    pub category: String,
}

impl From<&Scheme> for SchemeDetails {
    fn from(scheme: &Scheme) -> Self {
        Self {
            name: scheme.name.clone(),
            description: scheme.description.clone(),
            benefits: scheme.benefits.clone(),
            application_process: scheme.application_process.clone(),
            helpline: scheme.helpline.clone(),
            website: scheme.website.clone(),
            required_documents: scheme.required_documents.clone(),
            category: scheme.category.title().to_string(),
        }
    }
}
