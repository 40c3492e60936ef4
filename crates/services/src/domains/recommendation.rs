//! Personalized recommendations plus the user-feedback entry point.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::default_fallback;
use crate::feedback::{FeedbackItem, FeedbackQueue};
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub score: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Recommendations {
    pub recommendations: Vec<Recommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

default_fallback!(Recommendations);

pub struct RecommendationService {
    core: FacadeCore,
    feedback: FeedbackQueue,
}

impl RecommendationService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Recommendation, deps),
            feedback: deps.feedback.clone(),
        }
    }

    pub async fn personalized_recommendations(
        &self,
        user_id: &str,
        categories: &[String],
        limit: usize,
    ) -> Recommendations {
        self.core
            .call(
                "personalizedRecommendations",
                "personalized-recommendations",
                json!({ "userId": user_id, "categories": categories, "limit": limit }),
            )
            .await
    }

    /// Queue feedback on an earlier AI operation. Returns immediately; the
    /// item is sent with the next batch.
    pub fn record_feedback(&self, item: FeedbackItem) {
        self.feedback.record_feedback(item);
    }
}

ai_service!(RecommendationService, ServiceType::Recommendation);
