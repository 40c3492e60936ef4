use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::facade::{FacadeCore, FacadeDeps};
use crate::fallback::{default_fallback, Fallback};
use crate::registry::ai_service;
use crate::service_type::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteRequest {
    pub service: String,
    pub description: String,
    pub quantity: u32,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteLine {
    pub item: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Quote {
    pub total: f64,
    pub currency: String,
    pub line_items: Vec<QuoteLine>,
    pub assumptions: Vec<String>,
    pub valid_until: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Fallback for Quote {
    fn fallback(message: &str) -> Self {
        Self {
            currency: "Unknown".to_string(),
            error: Some(message.to_string()),
            ..Default::default()
        }
    }

    fn salvage_fields() -> &'static [&'static str] {
        &["total", "currency", "validUntil"]
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteComparison {
    pub best_value_index: Option<usize>,
    pub analysis: String,
    pub differences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

default_fallback!(QuoteComparison);

pub struct QuotationService {
    core: FacadeCore,
}

impl QuotationService {
    pub fn new(deps: &FacadeDeps) -> Self {
        Self {
            core: FacadeCore::new(ServiceType::Quotation, deps),
        }
    }

    pub async fn generate_quote(&self, request: &QuoteRequest) -> Quote {
        self.core
            .call(
                "generateQuote",
                "quotation-generator",
                json!({ "request": request }),
            )
            .await
    }

    pub async fn compare_quotes(&self, quotes: &[Quote]) -> QuoteComparison {
        self.core
            .call(
                "compareQuotes",
                "quotation-comparison",
                json!({ "quotes": quotes }),
            )
            .await
    }
}

ai_service!(QuotationService, ServiceType::Quotation);
