use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::{default_fallback, Fallback};
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartupProfile {
    pub name: String,
    pub description: String,
    pub stage: String,
    pub sector: String,
    pub funding_sought: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StartupAnalysis {
    pub investment_score: f64,
    pub market_potential: String,
    pub risk_level: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for StartupAnalysis {
    fn fallback(message: &str) -> Self {
        Self {
            market_potential: "Unknown".to_string(),
            risk_level: "Unknown".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["investmentScore", "marketPotential", "riskLevel"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestorMatch {
    pub investor_id: String,
    pub name: String,
    pub match_score: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestorMatches {
    pub matches: Vec<InvestorMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

default_fallback!(InvestorMatches);

pub struct InvestmentService {
    core: FacadeCore,
}

impl InvestmentService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Investment, deps),
        }
    }

    pub async fn analyze_startup(&self, startup: &StartupProfile) -> StartupAnalysis {
        self.core
            .call("analyzeStartup", "investment-analysis", json!({ "startup": startup }))
            .await
    }

    pub async fn match_investors(&self, startup: &StartupProfile, limit: usize) -> InvestorMatches {
        self.core
            .call(
                "matchInvestors",
                "investor-matching",
                json!({ "startup": startup, "limit": limit }),
            )
            .await
    }
}

ai_service!(InvestmentService, ServiceType::Investment);
