//! Transport-level tracing.
//!
//! Body logging belongs to the pipeline's [`LogSink`](crate::LogSink); this
//! layer only records what happened on the wire: method, URL, status class,
//! elapsed time and transport failures.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::Bytes;
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

use crate::{Request, Response, TransportError, classify};

/// How much of each call to record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogDetail {
    /// Method, URL, status and timing.
    #[default]
    Summary,
    /// Also the request and response headers, at debug level.
    Headers,
}

/// Layer that traces transport calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    detail: LogDetail,
}

impl LoggingLayer {
    /// Summary tracing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracing that includes headers.
    #[must_use]
    pub const fn with_headers() -> Self {
        Self {
            detail: LogDetail::Headers,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            detail: self.detail,
        }
    }
}

/// Service produced by [`LoggingLayer`].
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    detail: LogDetail,
}

impl<S> Service<Request<Bytes>> for Logging<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = TransportError>
        + Clone
        + Send
        + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = TransportError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Response<Bytes>, TransportError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), TransportError>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Bytes>) -> Self::Future {
        let method = request.method().clone();
        let url = request.url().to_string();
        let detail = self.detail;
        if detail == LogDetail::Headers {
            debug!(%method, %url, headers = ?request.headers(), "sending request");
        }

        let span = span!(Level::INFO, "http_request", %method, %url);
        let mut inner = self.inner.clone();
        Box::pin(
            async move {
                let start = Instant::now();
                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                match &result {
                    Ok(response) => {
                        let class = classify(response.status());
                        if class.is_success() {
                            info!(%class, elapsed_ms, "transport call completed");
                        } else {
                            warn!(%class, elapsed_ms, "transport call returned a failure status");
                        }
                        if detail == LogDetail::Headers {
                            debug!(headers = ?response.headers(), "response headers");
                        }
                    }
                    Err(err) => {
                        warn!(
                            error = %err,
                            connectivity_loss = err.is_connectivity_loss(),
                            elapsed_ms,
                            "transport call failed"
                        );
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}
