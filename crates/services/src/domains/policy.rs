//! Health policy analysis: Vision 2030 alignment, impact simulation and
//! policy briefs.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::Fallback;
use crate::registry::ai_service;
use crate::service_type::ServiceType;

const UNABLE_TO_ANALYZE: &str = "Unable to analyze due to an error.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyInput {
    pub name: String,
    pub description: String,
    pub sector: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub objectives: Vec<String>,
}

impl PolicyInput {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        sector: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sector: sector.into(),
            objectives: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Vision2030AlignmentResult {
    pub alignment_score: f64,
    pub aligned_goals: Vec<String>,
    pub misaligned_areas: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for Vision2030AlignmentResult {
    fn fallback(message: &str) -> Self {
        Self {
            summary: "Unable to analyze alignment due to an error.".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["alignmentScore", "summary"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyImpactResult {
    pub impact_score: f64,
    pub stakeholder_impact: BTreeMap<String, Value>,
    pub economic_impact: String,
    pub social_impact: String,
    pub health_outcomes: String,
    pub implementation_challenges: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for PolicyImpactResult {
    fn fallback(message: &str) -> Self {
        Self {
            economic_impact: UNABLE_TO_ANALYZE.to_string(),
            social_impact: UNABLE_TO_ANALYZE.to_string(),
            health_outcomes: UNABLE_TO_ANALYZE.to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["impactScore", "economicImpact", "socialImpact", "healthOutcomes"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyBrief {
    pub title: String,
    pub executive_summary: String,
    pub key_points: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for PolicyBrief {
    fn fallback(message: &str) -> Self {
        Self {
            executive_summary: "Unable to generate policy brief due to an error.".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

pub struct PolicyService {
    core: FacadeCore,
}

impl PolicyService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Policy, deps),
        }
    }

    pub async fn analyze_vision2030_alignment(
        &self,
        policy: &PolicyInput,
    ) -> Vision2030AlignmentResult {
        self.core
            .call(
                "analyzeVision2030Alignment",
                "policy-vision-alignment",
                json!({ "policy": policy }),
            )
            .await
    }

    /// `context` carries optional scenario parameters (population, budget, horizon).
    pub async fn simulate_impact(&self, policy: &PolicyInput, context: Value) -> PolicyImpactResult {
        self.core
            .call(
                "simulateImpact",
                "policy-impact-simulation",
                json!({ "policy": policy, "context": context }),
            )
            .await
    }

    pub async fn generate_policy_brief(&self, policy: &PolicyInput, audience: &str) -> PolicyBrief {
        self.core
            .call(
                "generatePolicyBrief",
                "policy-brief",
                json!({ "policy": policy, "audience": audience }),
            )
            .await
    }
}

ai_service!(PolicyService, ServiceType::Policy);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_fallback_shape() {
        let fallback = PolicyImpactResult::fallback("timeout");
        let value = serde_json::to_value(&fallback).unwrap();

        assert_eq!(value["impactScore"], json!(0.0));
        assert_eq!(value["stakeholderImpact"], json!({}));
        assert_eq!(value["economicImpact"], UNABLE_TO_ANALYZE);
        assert_eq!(value["socialImpact"], UNABLE_TO_ANALYZE);
        assert_eq!(value["healthOutcomes"], UNABLE_TO_ANALYZE);
        assert_eq!(value["implementationChallenges"], json!([]));
        assert_eq!(value["error"], "timeout");
    }

    #[test]
    fn test_policy_input_omits_empty_objectives() {
        let input = PolicyInput::new("X", "Y", "healthcare");
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value, json!({"name": "X", "description": "Y", "sector": "healthcare"}));
    }
}
