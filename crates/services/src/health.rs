//! Health map for AI services.
//!
//! Every entry starts healthy. The overall flag is a plain threshold over the
//! current entries: the platform is healthy while fewer than 30% of services
//! are marked unhealthy. No history is kept.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::service_type::ServiceType;

pub const UNHEALTHY_THRESHOLD: f64 = 0.3;

/// Copy of the health map at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub services: BTreeMap<String, bool>,
    pub overall: bool,
}

impl ServiceHealth {
    pub fn is_healthy(&self, service: &str) -> Option<bool> {
        self.services.get(service).copied()
    }

    pub fn unhealthy_services(&self) -> Vec<&str> {
        self.services
            .iter()
            .filter(|(_, healthy)| !**healthy)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[derive(Debug)]
struct HealthState {
    services: BTreeMap<String, bool>,
    overall: bool,
}

#[derive(Debug)]
pub struct ServiceHealthRegistry {
    state: RwLock<HealthState>,
}

impl ServiceHealthRegistry {
    /// One healthy entry per known service type
    pub fn new() -> Self {
        Self::with_services(ServiceType::ALL.iter().map(|s| s.as_str()))
    }

    pub fn with_services<I, S>(services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let services: BTreeMap<String, bool> =
            services.into_iter().map(|s| (s.into(), true)).collect();
        debug!("Creating health registry for {} services", services.len());

        Self {
            state: RwLock::new(HealthState {
                services,
                overall: true,
            }),
        }
    }

    pub fn get_service_health(&self) -> ServiceHealth {
        let state = self.state.read();
        ServiceHealth {
            services: state.services.clone(),
            overall: state.overall,
        }
    }

    /// Set one entry and recompute the overall flag. Unknown names are added.
    pub fn update_service_health(&self, service: &str, healthy: bool) {
        let mut state = self.state.write();
        let previous = state.services.insert(service.to_string(), healthy);
        let was_overall = state.overall;
        state.overall = compute_overall(&state.services);

        if previous != Some(healthy) {
            if healthy {
                info!(service = %service, "Service marked healthy");
            } else {
                warn!(service = %service, "Service marked unhealthy");
            }
        }
        if was_overall != state.overall {
            warn!(overall = state.overall, "Overall AI service health changed");
        }
    }

    pub fn update(&self, service: ServiceType, healthy: bool) {
        self.update_service_health(service.as_str(), healthy);
    }

    pub fn is_overall_healthy(&self) -> bool {
        self.state.read().overall
    }

    /// Current snapshot. Async so a future implementation can ping endpoints.
    pub async fn check_health(&self) -> ServiceHealth {
        self.get_service_health()
    }
}

impl Default for ServiceHealthRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// `unhealthy / total < 0.3`; an empty map counts as healthy.
fn compute_overall(services: &BTreeMap<String, bool>) -> bool {
    if services.is_empty() {
        return true;
    }
    let unhealthy = services.values().filter(|healthy| !**healthy).count();
    (unhealthy as f64 / services.len() as f64) < UNHEALTHY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_services() -> ServiceHealthRegistry {
        ServiceHealthRegistry::with_services((0..10).map(|i| format!("svc-{}", i)))
    }

    #[test]
    fn test_starts_all_healthy() {
        let registry = ServiceHealthRegistry::new();
        let health = registry.get_service_health();
        assert_eq!(health.services.len(), ServiceType::ALL.len());
        assert!(health.services.values().all(|h| *h));
        assert!(health.overall);
    }

    #[test]
    fn test_threshold_is_strict() {
        let registry = ten_services();
        registry.update_service_health("svc-0", false);
        registry.update_service_health("svc-1", false);
        assert!(registry.get_service_health().overall, "20% unhealthy stays healthy");

        registry.update_service_health("svc-2", false);
        assert!(!registry.get_service_health().overall, "30% unhealthy is not healthy");

        registry.update_service_health("svc-2", true);
        assert!(registry.is_overall_healthy());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let registry = ten_services();
        let before = registry.get_service_health();
        registry.update_service_health("svc-3", false);

        assert_eq!(before.is_healthy("svc-3"), Some(true));
        assert_eq!(
            registry.get_service_health().unhealthy_services(),
            vec!["svc-3"]
        );
    }

    #[test]
    fn test_unknown_service_is_added() {
        let registry = ten_services();
        registry.update_service_health("svc-new", false);
        let health = registry.get_service_health();
        assert_eq!(health.services.len(), 11);
        assert!(health.overall);
    }

    #[test]
    fn test_empty_registry_is_healthy() {
        let registry = ServiceHealthRegistry::with_services(Vec::<String>::new());
        assert!(registry.is_overall_healthy());
    }

    #[test]
    fn test_check_health_returns_snapshot() {
        let registry = ServiceHealthRegistry::new();
        registry.update(ServiceType::Policy, false);
        let health = tokio_test::block_on(async { registry.check_health().await });
        assert_eq!(health.is_healthy("policy"), Some(false));
        assert!(health.overall);
    }
}
