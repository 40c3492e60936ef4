use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::Fallback;
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SupportAnswer {
    pub answer: String,
    pub sources: Vec<String>,
    pub follow_up_questions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for SupportAnswer {
    fn fallback(message: &str) -> Self {
        Self {
            answer: "I'm sorry, I couldn't process your question right now. Please try again later."
                .to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["answer"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TicketClassification {
    pub category: String,
    pub priority: String,
    pub confidence: f64,
    pub suggested_team: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for TicketClassification {
    fn fallback(message: &str) -> Self {
        Self {
            category: "Unknown".to_string(),
            priority: "Unknown".to_string(),
            suggested_team: "Unknown".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["category", "priority", "confidence", "suggestedTeam"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

pub struct SupportService {
    core: FacadeCore,
}

impl SupportService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Support, deps),
        }
    }

    /// `history` is the prior chat transcript, oldest first.
    pub async fn answer_question(&self, question: &str, history: &[String]) -> SupportAnswer {
        self.core
            .call(
                "answerQuestion",
                "support-chat",
                json!({ "question": question, "history": history }),
            )
            .await
    }

    pub async fn classify_ticket(&self, subject: &str, body: &str) -> TicketClassification {
        self.core
            .call(
                "classifyTicket",
                "support-ticket-classifier",
                json!({ "subject": subject, "body": body }),
            )
            .await
    }
}

ai_service!(SupportService, ServiceType::Support);
