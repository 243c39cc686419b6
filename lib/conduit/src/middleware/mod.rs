//! Tower middleware for the [`HyperClient`](crate::HyperClient) transport.
//!
//! Layers wrap the type-erased transport service and see every call before
//! the pipeline classifies it. Add them with
//! [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer).
//!
//! - [`LoggingLayer`] - traces each transport call with `tracing`

mod logging;

pub use logging::{LogDetail, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
