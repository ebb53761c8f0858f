/// Allow normal error handling from structs
pub use super::Result;

// Structs that exist in the application descriptor

/// Traits that the structs can implement
pub mod traits;
pub use self::traits::Verify;

/// Container and service port wiring
mod ports;
pub use self::ports::Ports;

/// External exposure toggle
mod ingress;
pub use self::ingress::Ingress;

/// Horizontal pod autoscaler toggle and bounds
pub mod autoscaling;
pub use self::autoscaling::AutoScaling;

/// Kubernetes resource structs
pub mod resources;
pub use self::resources::{ResourceLimit, ResourceRequest, Resources};

/// Readiness and liveness probe checks
mod probes;

/// Kubernetes service types
mod service;
pub use self::service::ServiceType;

/// Numbers or strings coerced into strings
pub mod relaxed;
pub use self::relaxed::RelaxedString;
