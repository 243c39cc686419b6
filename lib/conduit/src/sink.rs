//! Transport sink: one request in, raw bytes or a typed error out.
//!
//! The sink owns every decision made between the network and the decoder:
//! cookie propagation, body logging, status classification and the custom
//! error chain. It performs exactly one transport call per request.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::FutureExt;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::{
    CookieJar, CookieStore, DomainError, Endpoint, Error, ErrorChain, ErrorDescriptor, LogLevel,
    LogSink, Outcome, Request, Result, StatusClass, Transport, TransportError, classify,
    cookies::CookieSync, log::TracingLogSink, pretty_json,
};

/// Which bodies an endpoint wants logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogFlags {
    /// Log the outgoing request body.
    pub request: bool,
    /// Log the response body.
    pub response: bool,
}

impl LogFlags {
    /// Read the flags of an endpoint.
    #[must_use]
    pub fn of<E: Endpoint + ?Sized>(endpoint: &E) -> Self {
        Self {
            request: endpoint.should_log_request(),
            response: endpoint.should_log_response(),
        }
    }
}

/// Failure bodies are error-logged only when the response body was not
/// already logged at information level.
const fn should_log_failure(log: LogFlags) -> bool {
    !log.response
}

struct Inner<C> {
    transport: C,
    cookies: CookieSync,
    errors: ErrorChain,
    logger: Option<Arc<dyn LogSink>>,
}

/// Sends requests and turns responses into `Outcome<Bytes>`.
pub struct TransportSink<C> {
    inner: Arc<Inner<C>>,
}

impl<C> Clone for TransportSink<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for TransportSink<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportSink")
            .field("transport", &self.inner.transport)
            .field("cookies", &self.inner.cookies)
            .field("errors", &self.inner.errors)
            .field("logger", &self.inner.logger.is_some())
            .finish()
    }
}

impl<C: Transport> TransportSink<C> {
    /// Sink with no base URL, no error descriptors and no body logging.
    #[must_use]
    pub fn new(transport: C) -> Self {
        Self::builder(transport).build()
    }

    /// Create a new sink builder.
    #[must_use]
    pub fn builder(transport: C) -> TransportSinkBuilder<C> {
        TransportSinkBuilder::new(transport)
    }

    /// Configured base URL.
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.inner.cookies.base_url()
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &C {
        &self.inner.transport
    }

    /// Send one request.
    pub async fn send(&self, request: Request<Bytes>, log: LogFlags) -> Outcome<Bytes> {
        self.process(request, log).await.into()
    }

    async fn process(&self, mut request: Request<Bytes>, log: LogFlags) -> Result<Bytes> {
        let inner = &*self.inner;
        inner.cookies.before_send(&mut request);

        let url = request.url().clone();
        if log.request
            && let Some(body) = request.body()
        {
            self.log_body(LogLevel::Information, &url, body);
        }

        let call = AssertUnwindSafe(inner.transport.execute(request)).catch_unwind();
        let response = match call.await {
            Ok(Ok(response)) => response,
            Ok(Err(error)) => return Err(transport_failure(error)),
            Err(panic) => {
                let error = TransportError::Panicked(panic_message(panic.as_ref()));
                return Err(Error::Transport(error));
            }
        };

        if log.response {
            self.log_body(LogLevel::Information, &url, response.body());
        }

        let class = classify(response.status());
        debug!(%url, %class, "response classified");

        match class {
            StatusClass::Success(_) => {
                inner.cookies.after_success(&url, &response);
                Ok(response.into_body())
            }
            StatusClass::Unauthorized => Err(Error::status_error(class, response.into_body())),
            StatusClass::Undefined(_) => {
                let body = response.into_body();
                if should_log_failure(log) {
                    self.log_body(LogLevel::Error, &url, &body);
                }
                Err(Error::status_error(class, body))
            }
            StatusClass::Failure(_) => {
                let body = response.into_body();
                if should_log_failure(log) {
                    self.log_body(LogLevel::Error, &url, &body);
                }
                match inner.errors.handle(&body) {
                    Some(domain_error) => Err(Error::Custom(domain_error)),
                    None => Err(Error::status_error(class, body)),
                }
            }
        }
    }

    /// Only JSON bodies are logged, pretty-printed.
    fn log_body(&self, level: LogLevel, url: &Url, body: &[u8]) {
        let Some(logger) = &self.inner.logger else {
            return;
        };
        if let Some(pretty) = pretty_json(body) {
            logger.log(level, Some(url), &pretty);
        }
    }
}

/// No connectivity is reported as a gateway timeout and a missing response as
/// gone, so callers branch on status alone.
fn transport_failure(error: TransportError) -> Error {
    if error.is_connectivity_loss() {
        debug!(%error, "connectivity lost, reporting gateway timeout");
        Error::status_error(StatusClass::gateway_timeout(), Bytes::new())
    } else if matches!(error, TransportError::InvalidResponse(_)) {
        debug!(%error, "no usable response, reporting gone");
        Error::status_error(StatusClass::gone(), Bytes::new())
    } else {
        Error::Transport(error)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`TransportSink`].
///
/// # Example
///
/// ```ignore
/// use conduit::{HyperClient, TransportSink};
///
/// let sink = TransportSink::builder(HyperClient::new())
///     .base_url("https://api.example.com")?
///     .error_json::<ApiError>()
///     .with_tracing()
///     .build();
/// ```
pub struct TransportSinkBuilder<C> {
    transport: C,
    base_url: Option<Url>,
    store: Option<Arc<dyn CookieStore>>,
    errors: ErrorChain,
    logger: Option<Arc<dyn LogSink>>,
}

impl<C: fmt::Debug> fmt::Debug for TransportSinkBuilder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportSinkBuilder")
            .field("transport", &self.transport)
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("cookies", &self.store.is_some())
            .field("errors", &self.errors)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl<C: Transport> TransportSinkBuilder<C> {
    /// Builder with an in-memory cookie jar and nothing else configured.
    #[must_use]
    pub fn new(transport: C) -> Self {
        Self {
            transport,
            base_url: None,
            store: Some(Arc::new(CookieJar::new())),
            errors: ErrorChain::new(),
            logger: None,
        }
    }

    /// Set the base URL; its origin scopes stored cookies.
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        let raw = base_url.as_ref();
        let parsed = Url::parse(raw)
            .map_err(|e| Error::message(format!("invalid base URL '{raw}': {e}")))?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    /// Share a cookie store, e.g. one jar between several clients.
    #[must_use]
    pub fn cookie_store(mut self, store: Arc<dyn CookieStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Disable cookie propagation.
    #[must_use]
    pub fn without_cookies(mut self) -> Self {
        self.store = None;
        self
    }

    /// Append a domain error descriptor; descriptors are tried in insertion order.
    #[must_use]
    pub fn error_descriptor(mut self, descriptor: impl ErrorDescriptor + 'static) -> Self {
        self.errors.push(descriptor);
        self
    }

    /// Append a descriptor parsing JSON bodies into `E`.
    #[must_use]
    pub fn error_json<E>(mut self) -> Self
    where
        E: DomainError + DeserializeOwned,
    {
        self.errors = self.errors.with_json::<E>();
        self
    }

    /// Replace the whole error chain.
    #[must_use]
    pub fn error_chain(mut self, errors: ErrorChain) -> Self {
        self.errors = errors;
        self
    }

    /// Send body logs to `sink`.
    #[must_use]
    pub fn log_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.logger = Some(Arc::new(sink));
        self
    }

    /// Send body logs to `tracing`.
    #[must_use]
    pub fn with_tracing(self) -> Self {
        self.log_sink(TracingLogSink)
    }

    /// Build the sink.
    #[must_use]
    pub fn build(self) -> TransportSink<C> {
        TransportSink {
            inner: Arc::new(Inner {
                transport: self.transport,
                cookies: CookieSync::new(self.base_url, self.store),
                errors: self.errors,
                logger: self.logger,
            }),
        }
    }
}
