use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::{default_fallback, Fallback};
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommendedEvent {
    pub event_id: String,
    pub title: String,
    pub relevance: f64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventRecommendations {
    pub events: Vec<RecommendedEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

default_fallback!(EventRecommendations);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventSummary {
    pub summary: String,
    pub highlights: Vec<String>,
    pub action_items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for EventSummary {
    fn fallback(message: &str) -> Self {
        Self {
            summary: "Unable to summarize event due to an error.".to_string(),
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

pub struct EventsService {
    core: FacadeCore,
}

impl EventsService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Events, deps),
        }
    }

    pub async fn recommend_events(&self, user_id: &str, interests: &[String]) -> EventRecommendations {
        self.core
            .call(
                "recommendEvents",
                "event-recommendations",
                json!({ "userId": user_id, "interests": interests }),
            )
            .await
    }

    pub async fn summarize_event(&self, event_id: &str, notes: &str) -> EventSummary {
        self.core
            .call(
                "summarizeEvent",
                "event-summary",
                json!({ "eventId": event_id, "notes": notes }),
            )
            .await
    }
}

ai_service!(EventsService, ServiceType::Events);
