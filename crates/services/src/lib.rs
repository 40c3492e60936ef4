//! AI service layer of the healthcare innovation platform.
//!
//! Domain facades forward typed requests to named remote functions and
//! always hand back a value: the decoded answer, or that type's fallback
//! with `error` set. Around them sit the service and health registries,
//! the call tracer and the feedback batching queue, all owned by a
//! [`ServiceContext`].

pub mod context;
pub mod domains;
pub mod facade;
pub mod fallback;
pub mod feedback;
pub mod health;
pub mod registry;
pub mod service_type;
pub mod tracer;

pub use context::{ServiceContext, ServiceSettings};
pub use facade::{FacadeCore, FacadeDeps};
pub use fallback::Fallback;
pub use feedback::{FeedbackItem, FeedbackQueue, FeedbackSink, InvokerFeedbackSink, DEFAULT_FLUSH_DELAY};
pub use health::{ServiceHealth, ServiceHealthRegistry, UNHEALTHY_THRESHOLD};
pub use registry::{AiService, ServiceRegistry};
pub use service_type::{ServiceType, UnknownServiceType};
pub use tracer::{CallTrace, CallTracer, TraceOptions, TraceStats, DEFAULT_TRACE_CAPACITY};
