use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::Fallback;
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceProfile {
    pub name: String,
    pub description: String,
    pub device_class: String,
    pub intended_use: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathwayStep {
    pub name: String,
    pub description: String,
    pub estimated_weeks: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegulatoryPathway {
    pub pathway: String,
    pub risk_classification: String,
    pub steps: Vec<PathwayStep>,
    pub required_documents: Vec<String>,
    pub estimated_timeline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for RegulatoryPathway {
    fn fallback(message: &str) -> Self {
        Self {
            pathway: "Unknown".to_string(),
            risk_classification: "Unknown".to_string(),
            estimated_timeline: "Unknown".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["pathway", "riskClassification", "estimatedTimeline"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegulationSummary {
    pub summary: String,
    pub key_requirements: Vec<String>,
    pub applicable_to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for RegulationSummary {
    fn fallback(message: &str) -> Self {
        Self {
            summary: "Unable to summarize regulation due to an error.".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

pub struct RegulatoryService {
    core: FacadeCore,
}

impl RegulatoryService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Regulatory, deps),
        }
    }

    pub async fn check_compliance_pathway(&self, device: &DeviceProfile) -> RegulatoryPathway {
        self.core
            .call(
                "checkCompliancePathway",
                "regulatory-pathway",
                json!({ "device": device }),
            )
            .await
    }

    pub async fn summarize_regulation(&self, regulation_text: &str) -> RegulationSummary {
        self.core
            .call(
                "summarizeRegulation",
                "regulatory-summary",
                json!({ "text": regulation_text }),
            )
            .await
    }
}

ai_service!(RegulatoryService, ServiceType::Regulatory);
