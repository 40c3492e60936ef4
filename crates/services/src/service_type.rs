use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Slot occupied by a domain facade in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Investment,
    Regulatory,
    Innovation,
    Knowledge,
    Policy,
    Challenge,
    Support,
    Clinical,
    Events,
    Admin,
    Compliance,
    Community,
    Quotation,
    Recommendation,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown service type: {0}")]
pub struct UnknownServiceType(pub String);

impl ServiceType {
    pub const ALL: [ServiceType; 14] = [
        ServiceType::Investment,
        ServiceType::Regulatory,
        ServiceType::Innovation,
        ServiceType::Knowledge,
        ServiceType::Policy,
        ServiceType::Challenge,
        ServiceType::Support,
        ServiceType::Clinical,
        ServiceType::Events,
        ServiceType::Admin,
        ServiceType::Compliance,
        ServiceType::Community,
        ServiceType::Quotation,
        ServiceType::Recommendation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Investment => "investment",
            ServiceType::Regulatory => "regulatory",
            ServiceType::Innovation => "innovation",
            ServiceType::Knowledge => "knowledge",
            ServiceType::Policy => "policy",
            ServiceType::Challenge => "challenge",
            ServiceType::Support => "support",
            ServiceType::Clinical => "clinical",
            ServiceType::Events => "events",
            ServiceType::Admin => "admin",
            ServiceType::Compliance => "compliance",
            ServiceType::Community => "community",
            ServiceType::Quotation => "quotation",
            ServiceType::Recommendation => "recommendation",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = UnknownServiceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ServiceType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| UnknownServiceType(s.to_string()))
    }
}
