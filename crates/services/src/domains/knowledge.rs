use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::{default_fallback, Fallback};
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchHit {
    pub document_id: String,
    pub title: String,
    pub snippet: String,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResults {
    pub results: Vec<SearchHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

default_fallback!(SearchResults);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentSummary {
    pub summary: String,
    pub key_points: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for DocumentSummary {
    fn fallback(message: &str) -> Self {
        Self {
            summary: "Unable to summarize document due to an error.".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["summary"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

pub struct KnowledgeService {
    core: FacadeCore,
}

impl KnowledgeService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Knowledge, deps),
        }
    }

    pub async fn semantic_search(&self, query: &str, limit: usize) -> SearchResults {
        self.core
            .call(
                "semanticSearch",
                "knowledge-search",
                json!({ "query": query, "limit": limit }),
            )
            .await
    }

    pub async fn summarize_document(&self, document_id: &str) -> DocumentSummary {
        self.core
            .call(
                "summarizeDocument",
                "knowledge-summary",
                json!({ "documentId": document_id }),
            )
            .await
    }
}

ai_service!(KnowledgeService, ServiceType::Knowledge);
