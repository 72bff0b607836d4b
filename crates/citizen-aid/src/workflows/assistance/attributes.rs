use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::catalog::GoverningAttribute;

/// Attributes a citizen declared for one request. Every field is optional and an absent
/// field means "unknown", never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttributes {
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub monthly_income: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub family_size: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub number_of_children: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_counts",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children_ages: Vec<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
}

impl UserAttributes {
    pub fn with_monthly_income(mut self, income: u32) -> Self {
        self.monthly_income = positive(income);
        self
    }

    pub fn with_family_size(mut self, size: u32) -> Self {
        self.family_size = positive(size);
        self
    }

    pub fn with_children(mut self, children: u32) -> Self {
        self.number_of_children = positive(children);
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = positive(age);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        self.location = (!location.trim().is_empty()).then(|| location.trim().to_string());
        self
    }

    /// Present value of a governing attribute. Zero reads as unknown, whichever way the
    /// struct was built. The children count falls back to the number of declared children ages.
    pub fn value_of(&self, attribute: GoverningAttribute) -> Option<u32> {
        match attribute {
            GoverningAttribute::MonthlyIncome => self.monthly_income.and_then(positive),
            GoverningAttribute::FamilySize => self.family_size.and_then(positive),
            GoverningAttribute::NumberOfChildren => {
                self.number_of_children.and_then(positive).or_else(|| {
                    u32::try_from(self.children_ages.len())
                        .ok()
                        .and_then(positive)
                })
            }
            GoverningAttribute::Age => self.age.and_then(positive),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn positive(value: u32) -> Option<u32> {
    (value > 0).then_some(value)
}

fn count_from_value(value: &Value) -> Option<u32> {
    let number = value.as_f64()?;
    if !number.is_finite() || number < 1.0 {
        return None;
    }
    Some(number.min(u32::MAX as f64) as u32)
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

fn lenient_counts<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(count_from_value).collect(),
        _ => Vec::new(),
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    })
}
