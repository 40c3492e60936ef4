use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::{default_fallback, Fallback};
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrialDesign {
    pub title: String,
    pub phase: String,
    pub condition: String,
    pub primary_endpoint: String,
    pub sample_size: Option<u32>,
    pub inclusion_criteria: Vec<String>,
    pub exclusion_criteria: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrialDesignAnalysis {
    pub quality_score: f64,
    pub statistical_power: String,
    pub risks: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for TrialDesignAnalysis {
    fn fallback(message: &str) -> Self {
        Self {
            statistical_power: "Unknown".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["qualityScore", "statisticalPower"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Anonymized patient attributes used for trial matching. No identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientCriteria {
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub conditions: Vec<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrialMatch {
    pub trial_id: String,
    pub title: String,
    pub match_score: f64,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrialMatches {
    pub trials: Vec<TrialMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

default_fallback!(TrialMatches);

pub struct ClinicalService {
    core: FacadeCore,
}

impl ClinicalService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Clinical, deps),
        }
    }

    pub async fn analyze_trial_design(&self, design: &TrialDesign) -> TrialDesignAnalysis {
        self.core
            .call(
                "analyzeTrialDesign",
                "clinical-trial-analysis",
                json!({ "design": design }),
            )
            .await
    }

    pub async fn match_trials(&self, criteria: &PatientCriteria) -> TrialMatches {
        self.core
            .call(
                "matchTrials",
                "clinical-trial-matching",
                json!({ "criteria": criteria }),
            )
            .await
    }
}

ai_service!(ClinicalService, ServiceType::Clinical);
