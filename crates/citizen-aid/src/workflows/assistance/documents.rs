use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::attributes::UserAttributes;
use crate::catalog::SchemeCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentState {
    Missing,
    Provided,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub required: bool,
    pub provided: bool,
    pub status: DocumentState,
}

impl DocumentStatus {
    fn missing() -> Self {
        Self {
            required: true,
            provided: false,
            status: DocumentState::Missing,
        }
    }
}

/// Document checklist for one scheme, or an inline error when the scheme is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentCollection {
    Success {
        scheme_name: String,
        required_documents: Vec<String>,
        document_status: BTreeMap<String, DocumentStatus>,
        collection_message: String,
    },
    Error {
        message: String,
    },
}

impl DocumentCollection {
    pub fn required_documents(&self) -> &[String] {
        match self {
            DocumentCollection::Success {
                required_documents, ..
            } => required_documents,
            DocumentCollection::Error { .. } => &[],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DocumentCollection::Success { .. })
    }
}

/// Looks up the documents a scheme requires. Catalog-only; there is no generative path.
#[derive(Debug, Clone)]
pub struct DocumentAgent {
    catalog: Arc<SchemeCatalog>,
}

impl DocumentAgent {
    pub fn new(catalog: Arc<SchemeCatalog>) -> Self {
        Self { catalog }
    }

    /// Every listed document starts out missing; provided documents are not accepted yet.
    pub fn collect(&self, scheme_name: &str, _attributes: &UserAttributes) -> DocumentCollection {
        let Some(scheme) = self.catalog.lookup_by_name(scheme_name) else {
            return DocumentCollection::Error {
                message: "Scheme not found".to_string(),
            };
        };

        let document_status = scheme
            .required_documents
            .iter()
            .map(|document| (document.clone(), DocumentStatus::missing()))
            .collect();

        DocumentCollection::Success {
            scheme_name: scheme.name.clone(),
            required_documents: scheme.required_documents.clone(),
            document_status,
            collection_message: format!(
                "To apply for {}, you need to provide the following documents:",
                scheme.name
            ),
        }
    }
}
