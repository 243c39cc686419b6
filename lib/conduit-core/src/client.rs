//! Collaborator traits used by the pipeline.
//!
//! - [`Transport`] - performs one network call
//! - [`Endpoint`] - builds the request for a call and says what to log

use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::{Request, Response, Result, TransportError};

/// Executes a single HTTP call.
///
/// No retries, no streaming: one request in, one buffered response out.
///
/// # Example
///
/// ```ignore
/// use conduit_core::{Request, Response, Transport, TransportError};
/// use bytes::Bytes;
///
/// struct Offline;
///
/// impl Transport for Offline {
///     async fn execute(&self, _request: Request<Bytes>) -> Result<Response<Bytes>, TransportError> {
///         Err(TransportError::not_connected("airplane mode"))
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Execute an HTTP request and return the response.
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = std::result::Result<Response<Bytes>, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = std::result::Result<Response<Bytes>, TransportError>> + Send {
        T::execute(self, request)
    }
}

/// Describes one API call: how to build its request and whether to log bodies.
pub trait Endpoint: Send + Sync {
    /// Build the request. Failures are returned to the caller without any I/O.
    fn request(&self) -> Result<Request<Bytes>>;

    /// Log the outgoing request body.
    fn should_log_request(&self) -> bool {
        false
    }

    /// Log the response body.
    fn should_log_response(&self) -> bool {
        false
    }
}

impl Endpoint for Request<Bytes> {
    fn request(&self) -> Result<Request<Bytes>> {
        Ok(self.clone())
    }
}

impl<E: Endpoint + ?Sized> Endpoint for &E {
    fn request(&self) -> Result<Request<Bytes>> {
        E::request(self)
    }

    fn should_log_request(&self) -> bool {
        E::should_log_request(self)
    }

    fn should_log_response(&self) -> bool {
        E::should_log_response(self)
    }
}
