use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::{default_fallback, Fallback};
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlatformInsights {
    pub summary: String,
    pub trends: Vec<String>,
    pub key_metrics: Value,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for PlatformInsights {
    fn fallback(message: &str) -> Self {
        Self {
            summary: "Unable to generate insights due to an error.".to_string(),
            key_metrics: json!({}),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Anomaly {
    pub metric: String,
    pub severity: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnomalyReport {
    pub anomalies: Vec<Anomaly>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

default_fallback!(AnomalyReport);

pub struct AdminService {
    core: FacadeCore,
}

impl AdminService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Admin, deps),
        }
    }

    /// `timeframe` is passed through verbatim, e.g. `"30d"`.
    pub async fn generate_insights(&self, timeframe: &str) -> PlatformInsights {
        self.core
            .call(
                "generateInsights",
                "admin-insights",
                json!({ "timeframe": timeframe }),
            )
            .await
    }

    pub async fn detect_anomalies(&self, metrics: Value) -> AnomalyReport {
        self.core
            .call("detectAnomalies", "admin-anomalies", json!({ "metrics": metrics }))
            .await
    }
}

ai_service!(AdminService, ServiceType::Admin);
