use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::{default_fallback, Fallback};
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChallengeSubmission {
    pub challenge_id: String,
    pub title: String,
    pub description: String,
    pub team_size: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionEvaluation {
    pub score: f64,
    pub criteria_scores: Vec<CriterionScore>,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CriterionScore {
    pub criterion: String,
    pub score: f64,
}

impl Fallback for SubmissionEvaluation {
    fn fallback(message: &str) -> Self {
        Self {
            feedback: "Unable to evaluate submission due to an error.".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["score", "feedback"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuggestedChallenge {
    pub title: String,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChallengeSuggestions {
    pub challenges: Vec<SuggestedChallenge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

default_fallback!(ChallengeSuggestions);

pub struct ChallengeService {
    core: FacadeCore,
}

impl ChallengeService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Challenge, deps),
        }
    }

    pub async fn evaluate_submission(&self, submission: &ChallengeSubmission) -> SubmissionEvaluation {
        self.core
            .call(
                "evaluateSubmission",
                "challenge-evaluation",
                json!({ "submission": submission }),
            )
            .await
    }

    pub async fn suggest_challenges(&self, focus_areas: &[String]) -> ChallengeSuggestions {
        self.core
            .call(
                "suggestChallenges",
                "challenge-suggestions",
                json!({ "focusAreas": focus_areas }),
            )
            .await
    }
}

ai_service!(ChallengeService, ServiceType::Challenge);
