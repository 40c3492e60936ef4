//! Explicitly constructed replacement for the process-wide singletons.
//!
//! Construction order is fixed: health, tracer, registry, feedback queue,
//! then the facades. Each context is isolated, so tests build their own.

use common::{FeedbackSettings, PlatformConfig, TracingSettings};
use edge::{FunctionInvoker, InvokeError, SupabaseFunctionsClient};
use std::sync::Arc;
use tracing::info;

use crate::domains::{
    AdminService, ChallengeService, ClinicalService, CommunityService, ComplianceService,
    EventsService, InnovationService, InvestmentService, KnowledgeService, PolicyService,
    QuotationService, RecommendationService, RegulatoryService, SupportService,
};
use crate::facade::FacadeDeps;
use crate::feedback::{FeedbackQueue, InvokerFeedbackSink};
use crate::health::{ServiceHealth, ServiceHealthRegistry};
use crate::registry::{AiService, ServiceRegistry};
use crate::service_type::ServiceType;
use crate::tracer::CallTracer;

#[derive(Debug, Clone, Default)]
pub struct ServiceSettings {
    pub tracing: TracingSettings,
    pub feedback: FeedbackSettings,
}

impl From<&PlatformConfig> for ServiceSettings {
    fn from(config: &PlatformConfig) -> Self {
        Self {
            tracing: config.tracing.clone(),
            feedback: config.feedback.clone(),
        }
    }
}

pub struct ServiceContext {
    health: Arc<ServiceHealthRegistry>,
    tracer: Arc<CallTracer>,
    registry: Arc<ServiceRegistry>,
    feedback: FeedbackQueue,
    invoker: Arc<dyn FunctionInvoker>,
}

impl ServiceContext {
    pub fn new(invoker: Arc<dyn FunctionInvoker>, settings: ServiceSettings) -> Self {
        let health = Arc::new(ServiceHealthRegistry::new());
        let tracer = Arc::new(CallTracer::from_settings(&settings.tracing));
        let registry = Arc::new(ServiceRegistry::new());

        let sink = Arc::new(InvokerFeedbackSink::new(
            Arc::clone(&invoker),
            settings.feedback.function.clone(),
        ));
        let feedback = FeedbackQueue::new(sink, settings.feedback.flush_delay());

        let context = Self {
            health,
            tracer,
            registry,
            feedback,
            invoker,
        };
        let registered = context.registry.initialize(&context.deps());
        info!(
            invoker = context.invoker.name(),
            services = registered,
            trace_capacity = context.tracer.capacity(),
            "AI service context ready"
        );
        context
    }

    /// Build against the Supabase Functions endpoint. Fails when the URL or
    /// API key is missing.
    pub fn from_config(config: &PlatformConfig) -> Result<Self, InvokeError> {
        let client = SupabaseFunctionsClient::from_config(config)?;
        Ok(Self::new(Arc::new(client), ServiceSettings::from(config)))
    }

    pub fn deps(&self) -> FacadeDeps {
        FacadeDeps {
            invoker: Arc::clone(&self.invoker),
            tracer: Arc::clone(&self.tracer),
            feedback: self.feedback.clone(),
        }
    }

    pub fn health(&self) -> &ServiceHealthRegistry {
        &self.health
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub fn tracer(&self) -> &CallTracer {
        &self.tracer
    }

    pub fn feedback(&self) -> &FeedbackQueue {
        &self.feedback
    }

    pub fn invoker(&self) -> &Arc<dyn FunctionInvoker> {
        &self.invoker
    }

    /// Register `service` in its own slot, replacing the current occupant.
    pub fn register<S: AiService>(&self, service: Arc<S>) -> Option<Arc<dyn AiService>> {
        let service_type = service.service_type();
        self.registry.register(service_type, service)
    }

    /// Replace every facade with a fresh instance.
    pub fn reinitialize(&self) -> usize {
        self.registry.initialize(&self.deps())
    }

    /// Ask each known slot whether it is available and feed the answers
    /// into the health map. Empty slots count as unhealthy.
    pub async fn probe_services(&self) -> ServiceHealth {
        for service_type in ServiceType::ALL {
            let available = self.registry.is_available(service_type);
            self.health.update(service_type, available);
        }
        self.health.check_health().await
    }

    /// Drain pending feedback; call before shutting down.
    pub async fn shutdown(&self) -> usize {
        let flushed = self.feedback.flush_now().await;
        info!(flushed, "AI service context shut down");
        flushed
    }

    pub fn policy(&self) -> Option<Arc<PolicyService>> {
        self.registry.get_as(ServiceType::Policy)
    }

    pub fn investment(&self) -> Option<Arc<InvestmentService>> {
        self.registry.get_as(ServiceType::Investment)
    }

    pub fn innovation(&self) -> Option<Arc<InnovationService>> {
        self.registry.get_as(ServiceType::Innovation)
    }

    pub fn regulatory(&self) -> Option<Arc<RegulatoryService>> {
        self.registry.get_as(ServiceType::Regulatory)
    }

    pub fn challenge(&self) -> Option<Arc<ChallengeService>> {
        self.registry.get_as(ServiceType::Challenge)
    }

    pub fn support(&self) -> Option<Arc<SupportService>> {
        self.registry.get_as(ServiceType::Support)
    }

    pub fn clinical(&self) -> Option<Arc<ClinicalService>> {
        self.registry.get_as(ServiceType::Clinical)
    }

    pub fn events(&self) -> Option<Arc<EventsService>> {
        self.registry.get_as(ServiceType::Events)
    }

    pub fn admin(&self) -> Option<Arc<AdminService>> {
        self.registry.get_as(ServiceType::Admin)
    }

    pub fn compliance(&self) -> Option<Arc<ComplianceService>> {
        self.registry.get_as(ServiceType::Compliance)
    }

    pub fn community(&self) -> Option<Arc<CommunityService>> {
        self.registry.get_as(ServiceType::Community)
    }

    pub fn knowledge(&self) -> Option<Arc<KnowledgeService>> {
        self.registry.get_as(ServiceType::Knowledge)
    }

    pub fn quotation(&self) -> Option<Arc<QuotationService>> {
        self.registry.get_as(ServiceType::Quotation)
    }

    pub fn recommendation(&self) -> Option<Arc<RecommendationService>> {
        self.registry.get_as(ServiceType::Recommendation)
    }
}
