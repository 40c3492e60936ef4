use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::{default_fallback, Fallback};
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InnovationInput {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub stage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InnovationAssessment {
    pub overall_score: f64,
    pub novelty_score: f64,
    pub feasibility_score: f64,
    pub impact_score: f64,
    pub readiness_level: String,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for InnovationAssessment {
    fn fallback(message: &str) -> Self {
        Self {
            readiness_level: "Unknown".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &[
            "overallScore",
            "noveltyScore",
            "feasibilityScore",
            "impactScore",
            "readinessLevel",
        ]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimilarInnovation {
    pub id: String,
    pub title: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimilarInnovations {
    pub innovations: Vec<SimilarInnovation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

default_fallback!(SimilarInnovations);

pub struct InnovationService {
    core: FacadeCore,
}

impl InnovationService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Innovation, deps),
        }
    }

    pub async fn assess_innovation(&self, innovation: &InnovationInput) -> InnovationAssessment {
        self.core
            .call(
                "assessInnovation",
                "innovation-assessment",
                json!({ "innovation": innovation }),
            )
            .await
    }

    /// Embedding-backed similarity search over previously submitted innovations.
    pub async fn find_similar_innovations(
        &self,
        innovation: &InnovationInput,
        limit: usize,
    ) -> SimilarInnovations {
        self.core
            .call(
                "findSimilarInnovations",
                "innovation-similarity",
                json!({ "innovation": innovation, "limit": limit }),
            )
            .await
    }
}

ai_service!(InnovationService, ServiceType::Innovation);
