use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::{default_fallback, Fallback};
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModerationResult {
    pub approved: bool,
    pub flags: Vec<String>,
    pub reason: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// Content is held back when moderation is unavailable.
impl Fallback for ModerationResult {
    fn fallback(message: &str) -> Self {
        Self {
            approved: false,
            reason: "Unable to moderate content due to an error.".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["approved", "reason", "confidence"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionSuggestion {
    pub user_id: String,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionSuggestions {
    pub connections: Vec<ConnectionSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

default_fallback!(ConnectionSuggestions);

pub struct CommunityService {
    core: FacadeCore,
}

impl CommunityService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Community, deps),
        }
    }

    pub async fn moderate_content(&self, content: &str) -> ModerationResult {
        self.core
            .call(
                "moderateContent",
                "community-moderation",
                json!({ "content": content }),
            )
            .await
    }

    pub async fn suggest_connections(&self, user_id: &str) -> ConnectionSuggestions {
        self.core
            .call(
                "suggestConnections",
                "community-connections",
                json!({ "userId": user_id }),
            )
            .await
    }
}

ai_service!(CommunityService, ServiceType::Community);
