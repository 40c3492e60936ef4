use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::{default_fallback, Fallback};
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComplianceAssessment {
    pub compliance_score: f64,
    pub status: String,
    pub gaps: Vec<String>,
    pub remediation_steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for ComplianceAssessment {
    fn fallback(message: &str) -> Self {
        Self {
            status: "Unknown".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["complianceScore", "status"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChecklistItem {
    pub requirement: String,
    pub reference: String,
    pub mandatory: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComplianceChecklist {
    pub items: Vec<ChecklistItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

default_fallback!(ComplianceChecklist);

pub struct ComplianceService {
    core: FacadeCore,
}

impl ComplianceService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Compliance, deps),
        }
    }

    pub async fn assess_compliance(&self, organization_id: &str, standard: &str) -> ComplianceAssessment {
        self.core
            .call(
                "assessCompliance",
                "compliance-assessment",
                json!({ "organizationId": organization_id, "standard": standard }),
            )
            .await
    }

    pub async fn generate_checklist(&self, standard: &str) -> ComplianceChecklist {
        self.core
            .call(
                "generateChecklist",
                "compliance-checklist",
                json!({ "standard": standard }),
            )
            .await
    }
}

ai_service!(ComplianceService, ServiceType::Compliance);
