//! Domain facades. Each wraps a handful of remote functions behind typed
//! methods that always return a value.

pub mod admin;
pub mod challenge;
pub mod clinical;
pub mod community;
pub mod compliance;
pub mod events;
pub mod innovation;
pub mod investment;
pub mod knowledge;
pub mod policy;
pub mod quotation;
pub mod recommendation;
pub mod regulatory;
pub mod support;

use std::sync::Arc;

use crate::facade::FacadeDeps;
use crate::registry::AiService;

pub use admin::AdminService;
pub use challenge::ChallengeService;
pub use clinical::ClinicalService;
pub use community::CommunityService;
pub use compliance::ComplianceService;
pub use events::EventsService;
pub use innovation::InnovationService;
pub use investment::InvestmentService;
pub use knowledge::KnowledgeService;
pub use policy::PolicyService;
pub use quotation::QuotationService;
pub use recommendation::RecommendationService;
pub use regulatory::RegulatoryService;
pub use support::SupportService;

/// One fresh instance of every facade, in `ServiceType::ALL` order.
pub fn build_all(deps: &FacadeDeps) -> Vec<Arc<dyn AiService>> {
    vec![
        Arc::new(InvestmentService::new(deps)),
        Arc::new(RegulatoryService::new(deps)),
        Arc::new(InnovationService::new(deps)),
        Arc::new(KnowledgeService::new(deps)),
        Arc::new(PolicyService::new(deps)),
        Arc::new(ChallengeService::new(deps)),
        Arc::new(SupportService::new(deps)),
        Arc::new(ClinicalService::new(deps)),
        Arc::new(EventsService::new(deps)),
        Arc::new(AdminService::new(deps)),
        Arc::new(ComplianceService::new(deps)),
        Arc::new(CommunityService::new(deps)),
        Arc::new(QuotationService::new(deps)),
        Arc::new(RecommendationService::new(deps)),
    ]
}
