//! Typed registry of AI service singletons

use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domains;
use crate::facade::FacadeDeps;
use crate::service_type::ServiceType;

/// Anything that can occupy a registry slot
pub trait AiService: Send + Sync + 'static {
    fn service_type(&self) -> ServiceType;

    fn is_available(&self) -> bool {
        true
    }

    /// Upcast for typed lookups through [`ServiceRegistry::get_as`]
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Implements [`AiService`] for a facade holding a `core: FacadeCore` field.
macro_rules! ai_service {
    ($ty:ty, $service:expr) => {
        impl $crate::registry::AiService for $ty {
            fn service_type(&self) -> $crate::service_type::ServiceType {
                $service
            }

            fn is_available(&self) -> bool {
                self.core.is_available()
            }

            fn into_any(
                self: std::sync::Arc<Self>,
            ) -> std::sync::Arc<dyn std::any::Any + Send + Sync> {
                self
            }
        }
    };
}

pub(crate) use ai_service;

#[derive(Default)]
pub struct ServiceRegistry {
    services: RwLock<HashMap<ServiceType, Arc<dyn AiService>>>,
    initializations: AtomicU64,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `service` under `service_type`, replacing and returning any
    /// previous occupant.
    pub fn register(
        &self,
        service_type: ServiceType,
        service: Arc<dyn AiService>,
    ) -> Option<Arc<dyn AiService>> {
        if service.service_type() != service_type {
            warn!(
                slot = %service_type,
                declared = %service.service_type(),
                "Registering service under a slot it does not declare"
            );
        }

        let previous = self.services.write().insert(service_type, service);
        if previous.is_some() {
            debug!(service = %service_type, "Replaced registered service");
        } else {
            debug!(service = %service_type, "Registered service");
        }
        previous
    }

    /// Absent when nothing was registered; never an error.
    pub fn get(&self, service_type: ServiceType) -> Option<Arc<dyn AiService>> {
        self.services.read().get(&service_type).cloned()
    }

    /// Typed lookup. Absent when the slot is empty or holds another type.
    pub fn get_as<T: AiService>(&self, service_type: ServiceType) -> Option<Arc<T>> {
        self.get(service_type)
            .and_then(|service| service.into_any().downcast::<T>().ok())
    }

    /// Snapshot of every slot; later registrations do not affect it.
    pub fn get_all(&self) -> HashMap<ServiceType, Arc<dyn AiService>> {
        self.services.read().clone()
    }

    /// An empty slot counts as unavailable.
    pub fn is_available(&self, service_type: ServiceType) -> bool {
        self.get(service_type)
            .map(|service| service.is_available())
            .unwrap_or(false)
    }

    pub fn registered_types(&self) -> Vec<ServiceType> {
        let mut types: Vec<ServiceType> = self.services.read().keys().copied().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.services.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.read().is_empty()
    }

    /// Construct and register every known facade, replacing whatever is
    /// registered. Replaced instances are dropped once their last holder
    /// releases them. Returns the number of registered services.
    pub fn initialize(&self, deps: &FacadeDeps) -> usize {
        let round = self.initializations.fetch_add(1, Ordering::SeqCst) + 1;
        if round > 1 {
            warn!(round, "AI service registry initialized again; replacing all services");
        }

        let services = domains::build_all(deps);
        let mut slots = self.services.write();
        for service in services {
            slots.insert(service.service_type(), service);
        }

        info!(services = slots.len(), "AI service registry initialized");
        slots.len()
    }

    pub fn initialization_count(&self) -> u64 {
        self.initializations.load(Ordering::SeqCst)
    }
}
